//! Renderer domain - the pluggable rendering capability and how renderers are catalogued
//!
//! ## Core Traits
//!
//! - `Renderer` - Turns a subset of a record's items into output
//! - `RendererCatalog` - Enumerates the renderers usable for a record and instantiates them
//! - `RendererPlugin` - An installable renderer implementation registered in a catalog

mod catalog;
mod descriptor;
mod error;
mod plugin;
mod renderer;

pub use catalog::{RendererCatalog, RendererConfiguration, RendererDefinition};
pub use descriptor::{
    validate_renderer_id, RendererDescriptor, RendererId, Settings, FALLBACK_RENDERER_ID,
    MAX_RENDERER_ID_LENGTH,
};
pub use error::CatalogError;
pub use plugin::RendererPlugin;
pub use renderer::{RenderOutput, RenderedOutput, Renderer};

#[cfg(test)]
pub use catalog::mock as catalog_mock;
#[cfg(test)]
pub use renderer::mock;
