//! Core error types for ALGOLAB.

use std::fmt;

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Unknown algorithm tag
    UnknownAlgorithm {
        /// Tag as given
        tag: String,
    },

    /// Validation error
    Validation {
        /// Offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAlgorithm { tag } => write!(f, "Unknown algorithm: {}", tag),
            Self::Validation { field, reason } => {
                write!(f, "Validation failed for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for CoreError {}
