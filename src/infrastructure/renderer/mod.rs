//! Renderer implementations and decorators

pub mod builtin;
mod timeout;

pub use builtin::{
    builtin_catalog, register_builtin_renderers, JsonRendererPlugin, LabelRendererPlugin,
    PlainTextRendererPlugin,
};
pub use timeout::TimeoutRenderer;
