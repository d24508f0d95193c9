//! In-memory renderer catalog
//!
//! Holds registered renderer plugins in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::record::RecordContext;
use crate::domain::renderer::{
    CatalogError, Renderer, RendererCatalog, RendererConfiguration, RendererDefinition,
    RendererDescriptor, RendererId, RendererPlugin,
};

/// Catalog of installed renderer plugins.
///
/// Populated at startup, then shared read-only (typically behind an `Arc`).
#[derive(Debug, Default)]
pub struct InMemoryRendererCatalog {
    /// Plugins in registration order
    plugins: Vec<Arc<dyn RendererPlugin>>,

    /// Index of renderer IDs into `plugins`
    index: HashMap<RendererId, usize>,
}

impl InMemoryRendererCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer plugin
    pub fn register(&mut self, plugin: Arc<dyn RendererPlugin>) -> Result<(), CatalogError> {
        let definition = plugin.definition();
        let renderer_id = definition.id.clone();

        if renderer_id.is_fallback() {
            return Err(CatalogError::reserved_id(renderer_id.as_str()));
        }

        if self.index.contains_key(&renderer_id) {
            return Err(CatalogError::already_registered(renderer_id.as_str()));
        }

        info!(
            renderer_id = %renderer_id,
            renderer_label = %definition.label,
            record_types = ?definition.record_types,
            "Registering renderer"
        );

        self.index.insert(renderer_id, self.plugins.len());
        self.plugins.push(plugin);

        Ok(())
    }

    /// Builder-style registration
    pub fn with_plugin(mut self, plugin: Arc<dyn RendererPlugin>) -> Result<Self, CatalogError> {
        self.register(plugin)?;
        Ok(self)
    }

    /// Get a plugin by renderer ID
    pub fn get_plugin(&self, id: &RendererId) -> Option<Arc<dyn RendererPlugin>> {
        self.index.get(id).map(|&i| self.plugins[i].clone())
    }

    /// Definitions of every registered renderer, in registration order
    pub fn list_definitions(&self) -> Vec<RendererDefinition> {
        self.plugins
            .iter()
            .map(|plugin| plugin.definition().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl RendererCatalog for InMemoryRendererCatalog {
    fn applicable_renderers(&self, context: &RecordContext) -> Vec<RendererDefinition> {
        self.plugins
            .iter()
            .filter(|plugin| plugin.definition().supports(context.record_type()))
            .filter(|plugin| plugin.is_applicable(context))
            .map(|plugin| plugin.definition().clone())
            .collect()
    }

    fn definition(&self, id: &RendererId) -> Option<RendererDefinition> {
        self.get_plugin(id).map(|plugin| plugin.definition().clone())
    }

    fn instantiate(
        &self,
        descriptor: &RendererDescriptor,
        _context: &RecordContext,
    ) -> Result<Arc<dyn Renderer>, CatalogError> {
        let plugin = self
            .get_plugin(&descriptor.id)
            .ok_or_else(|| CatalogError::not_found(descriptor.id.as_str()))?;

        debug!(renderer_id = %descriptor.id, "Instantiating renderer");

        plugin.create(RendererConfiguration::from_descriptor(descriptor))
    }
}
