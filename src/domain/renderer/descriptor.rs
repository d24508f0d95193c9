//! Renderer identifiers and resolved descriptors

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Per-renderer settings bag
pub type Settings = BTreeMap<String, serde_json::Value>;

/// Id of the fallback renderer itself; it can never appear in its own chain
pub const FALLBACK_RENDERER_ID: &str = "fallback";

/// Maximum length for renderer IDs
pub const MAX_RENDERER_ID_LENGTH: usize = 64;

static RENDERER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_.\-]*$").unwrap());

/// Validate a renderer ID
pub fn validate_renderer_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::invalid_id("Renderer ID cannot be empty"));
    }

    if id.len() > MAX_RENDERER_ID_LENGTH {
        return Err(DomainError::invalid_id(format!(
            "Renderer ID too long: {} characters (max {})",
            id.len(),
            MAX_RENDERER_ID_LENGTH
        )));
    }

    if !RENDERER_ID_PATTERN.is_match(id) {
        return Err(DomainError::invalid_id(format!(
            "Invalid renderer ID format '{}': must be lowercase alphanumeric with '_', '-' or '.'",
            id
        )));
    }

    Ok(())
}

/// Renderer identifier, unique within a catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RendererId(String);

impl RendererId {
    /// Create a new RendererId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        validate_renderer_id(&id)?;
        Ok(Self(id))
    }

    /// Id of a renderer shipped with the crate; must match the ID format
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(validate_renderer_id(id).is_ok());
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved id of the fallback renderer itself
    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_RENDERER_ID
    }
}

impl TryFrom<String> for RendererId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RendererId> for String {
    fn from(id: RendererId) -> Self {
        id.0
    }
}

impl std::fmt::Display for RendererId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A renderer resolved into a chain: identity, ordering and effective settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererDescriptor {
    pub id: RendererId,
    pub label: String,
    pub enabled: bool,
    pub weight: i32,
    #[serde(default)]
    pub settings: Settings,
}

impl RendererDescriptor {
    pub fn new(id: RendererId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            enabled: true,
            weight: 0,
            settings: Settings::new(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}
