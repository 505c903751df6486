//! Port to an external code-generation assistant.
//!
//! The session treats the reply as opaque text: it is stored and shown,
//! never parsed, and never touches trace or playback state.

use algolab_core::Algorithm;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Request sent to the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRequest {
    /// Algorithm the user is looking at
    pub algorithm: Algorithm,
    /// Free-form user prompt
    pub prompt: String,
}

impl CodeRequest {
    /// Create a request
    #[must_use]
    pub fn new(algorithm: Algorithm, prompt: impl Into<String>) -> Self {
        Self {
            algorithm,
            prompt: prompt.into(),
        }
    }

    /// Reject requests not worth sending
    ///
    /// # Errors
    ///
    /// Returns error if the prompt is blank
    pub fn validate(&self) -> Result<(), AssistantError> {
        if self.prompt.trim().is_empty() {
            return Err(AssistantError::EmptyPrompt);
        }
        Ok(())
    }
}

/// Error from the assistant port
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// Prompt was blank
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Service could not be reached or is not configured
    #[error("assistant unavailable: {reason}")]
    Unavailable {
        /// Explanation
        reason: String,
    },

    /// Service answered with an error
    #[error("assistant failed: {message}")]
    Failed {
        /// Message from the service
        message: String,
    },
}

/// Code-generation service
#[async_trait]
pub trait CodeAssistant: Send + Sync {
    /// Generate code for `request`
    ///
    /// # Errors
    ///
    /// Returns error if the service is unavailable or fails
    async fn generate(&self, request: &CodeRequest) -> Result<String, AssistantError>;
}
