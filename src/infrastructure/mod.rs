//! Infrastructure layer - Catalogs, renderer implementations and configuration loading

pub mod catalog;
pub mod config;
pub mod logging;
pub mod renderer;

pub use catalog::{InMemoryRendererCatalog, TimeoutCatalog};
pub use config::{RendererConfigError, RendererConfigFile};
pub use renderer::{builtin_catalog, register_builtin_renderers, TimeoutRenderer};
