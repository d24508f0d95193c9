//! Renderer plugin trait
//!
//! An installable renderer implementation, registered in a catalog.

use std::fmt::Debug;
use std::sync::Arc;

use super::catalog::{RendererConfiguration, RendererDefinition};
use super::error::CatalogError;
use super::renderer::Renderer;
use crate::domain::record::RecordContext;

pub trait RendererPlugin: Send + Sync + Debug {
    /// Identity, supported record types and default settings
    fn definition(&self) -> &RendererDefinition;

    /// Whether the renderer can be used for this particular record, beyond
    /// declaring support for its type
    fn is_applicable(&self, _context: &RecordContext) -> bool {
        true
    }

    /// Build a renderer instance from merged settings
    fn create(&self, config: RendererConfiguration) -> Result<Arc<dyn Renderer>, CatalogError>;
}
