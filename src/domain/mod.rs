//! Domain layer - Core fallback rendering logic and entities

pub mod chain;
pub mod error;
pub mod record;
pub mod renderer;
pub mod summary;

pub use chain::{
    Chain, ChainBuilder, ChainFilter, ConfigurationMismatch, FallbackExecutor,
    FallbackExecutorConfig, RenderOutcome, RenderResult, RenderedItem, RendererAttempt,
    StoredChainConfig, StoredRendererConfig,
};
pub use error::DomainError;
pub use record::{Item, Position, Record, RecordContext, RecordType};
pub use renderer::{
    CatalogError, RenderOutput, RenderedOutput, Renderer, RendererCatalog, RendererConfiguration,
    RendererDefinition, RendererDescriptor, RendererId, RendererPlugin, Settings,
    FALLBACK_RENDERER_ID,
};
pub use summary::{Summary, SummaryEntry, SummaryReporter};
