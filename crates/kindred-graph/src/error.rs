//! Graph error types

use thiserror::Error;

/// Errors that can occur while reading the family graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Store error while reading edges or persons
    #[error("Store error: {0}")]
    Store(String),
}

impl GraphError {
    pub(crate) fn store<E: std::fmt::Display>(e: E) -> Self {
        GraphError::Store(e.to_string())
    }
}
