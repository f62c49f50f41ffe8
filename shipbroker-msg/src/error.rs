//! Error types for the shipbroker-msg crate.

use std::result;
use thiserror::Error;

/// Errors raised while building or serializing broker documents.
///
/// Rule failures are not errors: they are reported as
/// [`RuleViolation`](crate::validation::RuleViolation) values. This type
/// covers the few places where an operation refuses to proceed.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization was attempted on an entity with rule violations.
    #[error("{0} is not valid")]
    InvalidEntity(&'static str),

    /// A constructor-guarded field was given an unacceptable value.
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Wire name of the rejected field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// A code table rejected its input.
    #[error("Code error: {0}")]
    Codes(#[from] shipbroker_codes::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }
}

/// Custom Result type for broker document operations.
pub type Result<T> = result::Result<T, Error>;
