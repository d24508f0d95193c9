//! Fallback renderer
//!
//! Renders a multi-item record with an ordered chain of renderers. Each
//! renderer receives only the items earlier renderers left unrendered:
//! - Chains resolved from stored configuration and a renderer catalog
//! - Position-ordered results recording which renderer produced each item
//! - Human-readable summaries of a configured chain

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Chain, ChainBuilder, ChainFilter, DomainError, FallbackExecutor, FallbackExecutorConfig,
    Item, Record, RecordContext, RecordType, RenderResult, Renderer, RendererCatalog, RendererId,
    StoredChainConfig, StoredRendererConfig, SummaryReporter,
};
pub use infrastructure::{builtin_catalog, InMemoryRendererCatalog, RendererConfigFile};
