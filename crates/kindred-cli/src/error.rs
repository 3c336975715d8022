//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] kindred_store::StoreError),

    /// Validation could not run
    #[error("Gatekeeper error: {0}")]
    Gatekeeper(#[from] kindred_gatekeeper::GatekeeperError),

    /// Family graph could not be read
    #[error("Graph error: {0}")]
    Graph(#[from] kindred_graph::GraphError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
