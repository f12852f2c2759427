//! Error types for permgraph

use thiserror::Error;

/// The main error type for permgraph operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input rejected before any store call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The same action is already in flight
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// Role editor action without an open editor
    #[error("No role is open for editing")]
    NoEditor,

    /// Connection-level failure talking to a remote collaborator
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote collaborator answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Remote body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Malformed permission tree
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for permgraph operations
pub type Result<T> = std::result::Result<T, Error>;
