use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Renderer error: {renderer} - {message}")]
    Renderer { renderer: String, message: String },

    #[error("Renderer '{renderer}' timed out after {timeout_ms}ms")]
    Timeout { renderer: String, timeout_ms: u64 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn renderer(renderer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Renderer {
            renderer: renderer.into(),
            message: message.into(),
        }
    }

    pub fn timeout(renderer: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            renderer: renderer.into(),
            timeout_ms,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
