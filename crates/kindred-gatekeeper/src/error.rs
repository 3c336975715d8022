//! Gatekeeper error types
//!
//! Business-rule violations are never errors here; they are reported as
//! issues inside a `ValidationResult`.

use kindred_domain::{EdgeId, PersonId};
use kindred_graph::GraphError;
use thiserror::Error;

/// Errors that can occur during gatekeeper operations
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Store error during validation or write
    #[error("Store error: {0}")]
    Store(String),

    /// Failure while computing the family graph
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A person identifier that does not resolve to a record
    #[error("Unknown person: {0}")]
    UnknownPerson(PersonId),

    /// An edge identifier that does not resolve to a stored edge
    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),
}

impl GatekeeperError {
    pub(crate) fn store<E: std::fmt::Display>(e: E) -> Self {
        GatekeeperError::Store(e.to_string())
    }
}
