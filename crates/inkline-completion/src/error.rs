//! Error types for the inline completion core

use thiserror::Error;

/// Inline completion error
///
/// Only [`CompletionError::Backend`] crosses the public `fetch` boundary;
/// unrecognized or disabled languages yield empty results instead, and stray
/// stream chunks are dropped with a warning.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Structured failure reported in a backend acknowledgement
    #[error("Inline completion failed: {error_type}\n{traceback}")]
    Backend {
        /// Error class name reported by the backend
        error_type: String,
        /// Backend traceback text
        traceback: String,
    },

    /// Stream chunk arrived without a token; backend protocol breach
    #[error("Stream chunk is missing its token")]
    MissingToken,

    /// Transport-level failure while dispatching a request
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CompletionError {
    /// Create a backend failure from an acknowledgement error
    pub fn backend(error_type: impl Into<String>, traceback: impl Into<String>) -> Self {
        CompletionError::Backend {
            error_type: error_type.into(),
            traceback: traceback.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        CompletionError::Transport(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        CompletionError::Config(message.into())
    }
}

/// Result type for inline completion operations
pub type CompletionResult<T> = Result<T, CompletionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_message_carries_type_and_traceback() {
        let error = CompletionError::backend("ValueError", "Traceback (most recent call last)");
        let message = error.to_string();
        assert!(message.contains("ValueError"));
        assert!(message.contains("Traceback (most recent call last)"));
    }
}
