//! Stored renderer chain configuration via TOML
//!
//! ```toml
//! [renderers.label]
//! enabled = true
//! weight = 0
//!
//! [renderers.label.settings]
//! field = "title"
//! ```
//!
//! Entries keep their order in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::chain::StoredChainConfig;

/// Error type for renderer configuration files
#[derive(Debug, Error)]
pub enum RendererConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root structure of a renderer configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RendererConfigFile {
    /// Stored chain, renderer id to settings
    #[serde(default)]
    pub renderers: StoredChainConfig,
}

impl RendererConfigFile {
    /// An empty configuration: every applicable renderer is new and disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RendererConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading renderer configuration");

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;

        debug!(
            renderers = config.renderers.len(),
            "Renderer configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, RendererConfigError> {
        let config: RendererConfigFile = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Try to load from file, falling back to an empty configuration
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "Renderer config file not found, using defaults");
            return Self::default();
        }

        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load renderer config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Renderer ids are validated while parsing; this rejects the reserved id
    fn validate(&self) -> Result<(), RendererConfigError> {
        if let Some((id, _)) = self.renderers.iter().find(|(id, _)| id.is_fallback()) {
            return Err(RendererConfigError::ValidationError(format!(
                "Renderer '{}' is reserved and cannot be configured",
                id
            )));
        }

        Ok(())
    }
}

impl From<RendererConfigFile> for StoredChainConfig {
    fn from(file: RendererConfigFile) -> Self {
        file.renderers
    }
}
