//! Error types for laneboard-core

use thiserror::Error;

/// Main error type for the laneboard-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session log could not be interpreted
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Session root directory missing or unreadable
    #[error("session root not found: {0}")]
    SessionRootNotFound(String),
}

/// Result type alias for laneboard-core
pub type Result<T> = std::result::Result<T, Error>;
