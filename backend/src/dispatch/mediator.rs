//! Request routing with pre-handler validation.
//!
//! The mediator owns one handler per request kind plus the validation
//! passes registered for that kind. A request is validated first; any
//! violations become a failure outcome and the handler never runs. Store
//! faults pass through unchanged so callers can distinguish a rejected
//! request from a broken store.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::request::{Request, RequestKind, Response};
use super::validation::RequestRules;
use crate::domain::outcome::Outcome;
use crate::domain::ports::StoreError;

/// A handler serving exactly one request kind.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// The request kind this handler serves.
    fn kind(&self) -> RequestKind;

    /// Execute the request.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the store faults or the mediator
    /// routed a request of a foreign kind here.
    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError>;
}

/// Wiring mistakes caught while assembling a mediator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two handlers claimed the same request kind.
    #[error("a handler for {kind} is already registered")]
    DuplicateHandler {
        /// The contested request kind.
        kind: RequestKind,
    },
    /// A request kind was left without a handler.
    #[error("no handler registered for {kind}")]
    MissingHandler {
        /// The unserved request kind.
        kind: RequestKind,
    },
}

/// Faults raised while dispatching a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The underlying store faulted.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The request kind has no handler.
    #[error("no handler registered for {kind}")]
    Unhandled {
        /// The unserved request kind.
        kind: RequestKind,
    },
    /// A handler received a request of a foreign kind.
    #[error("handler for {expected} received a {actual} request")]
    Misrouted {
        /// The kind the handler serves.
        expected: RequestKind,
        /// The kind that arrived.
        actual: RequestKind,
    },
}

/// Assembles a [`Mediator`], enforcing one handler per request kind.
#[derive(Default)]
pub struct MediatorBuilder {
    handlers: HashMap<RequestKind, Box<dyn RequestHandler>>,
    rules: HashMap<RequestKind, Vec<RequestRules>>,
}

impl fmt::Debug for MediatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediatorBuilder").finish_non_exhaustive()
    }
}

impl MediatorBuilder {
    /// Start with no handlers and no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under the kind it reports.
    ///
    /// # Errors
    ///
    /// Rejects a second handler for a kind that is already served.
    pub fn register(mut self, handler: Box<dyn RequestHandler>) -> Result<Self, RegistryError> {
        let kind = handler.kind();
        match self.handlers.entry(kind) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateHandler { kind }),
            Entry::Vacant(slot) => {
                slot.insert(handler);
                Ok(self)
            }
        }
    }

    /// Append a validation pass for `kind`.
    ///
    /// Passes run in registration order and their violations concatenate.
    #[must_use]
    pub fn with_rules(mut self, kind: RequestKind, rules: RequestRules) -> Self {
        self.rules.entry(kind).or_default().push(rules);
        self
    }

    /// Finish assembly.
    ///
    /// # Errors
    ///
    /// Rejects a registry that leaves any request kind unserved.
    pub fn build(self) -> Result<Mediator, RegistryError> {
        for kind in RequestKind::ALL {
            if !self.handlers.contains_key(&kind) {
                return Err(RegistryError::MissingHandler { kind });
            }
        }
        Ok(Mediator {
            handlers: self.handlers,
            rules: self.rules,
        })
    }
}

/// Routes validated requests to their registered handler.
pub struct Mediator {
    handlers: HashMap<RequestKind, Box<dyn RequestHandler>>,
    rules: HashMap<RequestKind, Vec<RequestRules>>,
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator").finish_non_exhaustive()
    }
}

impl Mediator {
    /// Validate and execute `request`.
    ///
    /// Every rule pass registered for the request kind runs; collected
    /// violations come back as a failure outcome without touching the
    /// handler.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the handler hits a store fault or
    /// the request kind is unserved.
    pub async fn send(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let kind = request.kind();
        let violations = self.collect_violations(kind, &request);
        if !violations.is_empty() {
            debug!(%kind, count = violations.len(), "request rejected by validation");
            return Ok(Outcome::failures(violations));
        }

        let handler = self
            .handlers
            .get(&kind)
            .ok_or(DispatchError::Unhandled { kind })?;
        handler.handle(request).await
    }

    fn collect_violations(&self, kind: RequestKind, request: &Request) -> Vec<String> {
        self.rules.get(&kind).map_or_else(Vec::new, |passes| {
            passes.iter().flat_map(|rules| rules(request)).collect()
        })
    }
}
