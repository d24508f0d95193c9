//! Renderer catalog trait and definitions

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::descriptor::{RendererDescriptor, RendererId, Settings};
use super::error::CatalogError;
use super::renderer::Renderer;
use crate::domain::record::{RecordContext, RecordType};

/// What a catalog knows about an installed renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererDefinition {
    pub id: RendererId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Record types this renderer declares support for
    pub record_types: Vec<String>,
    #[serde(default)]
    pub default_settings: Settings,
}

impl RendererDefinition {
    pub fn new(id: RendererId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            description: String::new(),
            record_types: Vec::new(),
            default_settings: Settings::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_record_types<I, S>(mut self, record_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.record_types = record_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_setting(
        mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.default_settings.insert(key.into(), value);
        self
    }

    /// Check if the renderer declares support for a record type
    pub fn supports(&self, record_type: &RecordType) -> bool {
        self.record_types.iter().any(|t| t == record_type.as_str())
    }
}

/// Configuration handed to a renderer implementation when it is instantiated
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfiguration {
    pub id: RendererId,
    pub settings: Settings,
}

impl RendererConfiguration {
    pub fn new(id: RendererId, settings: Settings) -> Self {
        Self { id, settings }
    }

    pub fn from_descriptor(descriptor: &RendererDescriptor) -> Self {
        Self::new(descriptor.id.clone(), descriptor.settings.clone())
    }

    /// Get a setting as a specific type
    pub fn get_setting<T: for<'de> Deserialize<'de>>(
        &self,
        key: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        match self.settings.get(key) {
            Some(value) => serde_json::from_value(value.clone()).map(Some),
            None => Ok(None),
        }
    }

    /// Get a setting with a default
    pub fn get_setting_or<T: for<'de> Deserialize<'de>>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, serde_json::Error> {
        self.get_setting(key).map(|opt| opt.unwrap_or(default))
    }
}

/// Source of renderer implementations.
///
/// Callers must hand the chain builder and executor a consistent view of the
/// catalog for the duration of one render call.
pub trait RendererCatalog: Send + Sync + Debug {
    /// Renderers usable for this record, in catalog order.
    ///
    /// Implementations have already checked the declared record types and each
    /// renderer's own applicability predicate. The fallback renderer is never
    /// included.
    fn applicable_renderers(&self, context: &RecordContext) -> Vec<RendererDefinition>;

    /// Definition of any installed renderer, applicable or not
    fn definition(&self, id: &RendererId) -> Option<RendererDefinition>;

    /// Create a renderer instance configured with the descriptor's settings
    fn instantiate(
        &self,
        descriptor: &RendererDescriptor,
        context: &RecordContext,
    ) -> Result<Arc<dyn Renderer>, CatalogError>;
}

impl<C: RendererCatalog + ?Sized> RendererCatalog for Arc<C> {
    fn applicable_renderers(&self, context: &RecordContext) -> Vec<RendererDefinition> {
        (**self).applicable_renderers(context)
    }

    fn definition(&self, id: &RendererId) -> Option<RendererDefinition> {
        (**self).definition(id)
    }

    fn instantiate(
        &self,
        descriptor: &RendererDescriptor,
        context: &RecordContext,
    ) -> Result<Arc<dyn Renderer>, CatalogError> {
        (**self).instantiate(descriptor, context)
    }
}
