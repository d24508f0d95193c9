//! Catalog error types

use thiserror::Error;

/// Errors raised while registering or instantiating renderers
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Renderer not found: {renderer_id}")]
    NotFound { renderer_id: String },

    #[error("Renderer already registered: {renderer_id}")]
    AlreadyRegistered { renderer_id: String },

    #[error("Renderer ID '{renderer_id}' is reserved")]
    ReservedId { renderer_id: String },

    #[error("Renderer instantiation failed for '{renderer_id}': {message}")]
    InstantiationFailed {
        renderer_id: String,
        message: String,
    },

    #[error("Configuration error for '{renderer_id}': {message}")]
    Configuration {
        renderer_id: String,
        message: String,
    },
}

impl CatalogError {
    pub fn not_found(renderer_id: impl Into<String>) -> Self {
        Self::NotFound {
            renderer_id: renderer_id.into(),
        }
    }

    pub fn already_registered(renderer_id: impl Into<String>) -> Self {
        Self::AlreadyRegistered {
            renderer_id: renderer_id.into(),
        }
    }

    pub fn reserved_id(renderer_id: impl Into<String>) -> Self {
        Self::ReservedId {
            renderer_id: renderer_id.into(),
        }
    }

    pub fn instantiation_failed(
        renderer_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InstantiationFailed {
            renderer_id: renderer_id.into(),
            message: message.into(),
        }
    }

    pub fn configuration(renderer_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            renderer_id: renderer_id.into(),
            message: message.into(),
        }
    }
}
