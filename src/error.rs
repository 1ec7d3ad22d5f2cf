//! Error types for resplot.
//!
//! Every fallible operation in the crate returns [`Result`], and errors are
//! propagated to the immediate caller. Nothing is logged-and-continued.

use thiserror::Error;

/// The main error type for resplot operations.
#[derive(Error, Debug)]
pub enum ResplotError {
    /// IO errors (unreadable guideline or config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An `inherits` key names a sibling that does not exist
    #[error(
        "An error occurred while processing guidelines. Inheritance reference '{reference}' in '{key}' not found. Available references: {available:?}"
    )]
    UnresolvedInheritance {
        reference: String,
        key: String,
        available: Vec<String>,
    },

    /// A lookup into the resolved guidelines failed
    #[error("{kind} '{key}' not found in guidelines. Available: {available:?}")]
    KeyNotFound {
        kind: String,
        key: String,
        available: Vec<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Unit rescaling errors
    #[error("Rescale error: {message}")]
    Rescale { message: String },
}

impl ResplotError {
    /// Build a [`ResplotError::KeyNotFound`] from the keys of the searched node.
    pub fn key_not_found<'a, I>(kind: &str, key: &str, available: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        ResplotError::KeyNotFound {
            kind: kind.to_string(),
            key: key.to_string(),
            available: available.into_iter().cloned().collect(),
        }
    }
}

/// Convenience type alias for Results with ResplotError
pub type Result<T> = std::result::Result<T, ResplotError>;
