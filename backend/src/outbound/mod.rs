//! Driven adapters: concrete implementations of the domain's outbound
//! ports.
//!
//! [`persistence`] provides the in-memory store behind the repository and
//! unit-of-work ports. [`security`] provides the credential hasher and the
//! signed token issuer.

pub mod persistence;
pub mod security;
