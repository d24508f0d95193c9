//! Renderer chain domain - chain resolution and fallback execution

mod builder;
mod entity;
mod executor;
mod result;

pub use builder::{ChainBuilder, ConfigurationMismatch};
pub use entity::{Chain, ChainFilter, StoredChainConfig, StoredRendererConfig};
pub use executor::{FallbackExecutor, FallbackExecutorConfig};
pub use result::{RenderOutcome, RenderResult, RenderedItem, RendererAttempt};
