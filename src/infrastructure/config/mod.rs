//! Stored renderer configuration loading

mod renderer_config;

pub use renderer_config::{RendererConfigError, RendererConfigFile};
