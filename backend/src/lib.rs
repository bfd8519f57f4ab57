//! Transactional command and query core for the weather forecast backend.
//!
//! Requests enter through [`dispatch::Mediator`], run the validation
//! pipeline, and are routed to exactly one handler backed by the domain
//! services. Write paths execute inside a unit-of-work transaction with
//! rollback on fault; reads go straight to the repositories. The outbound
//! layer supplies the in-memory store and fixture credential collaborators.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod outbound;
pub mod test_support;
