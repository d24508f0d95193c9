//! Renderer catalog infrastructure
//!
//! - In-memory catalog holding registered renderer plugins
//! - Timeout decorator bounding every renderer a catalog hands out

pub mod in_memory;
pub mod timeout;

pub use in_memory::InMemoryRendererCatalog;
pub use timeout::TimeoutCatalog;
