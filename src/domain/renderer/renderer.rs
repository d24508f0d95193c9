//! Renderer trait and the output it produces

use std::collections::BTreeMap;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::record::{Item, Position, RecordContext};
use crate::domain::DomainError;

/// Output produced for a single item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedOutput {
    pub markup: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl RenderedOutput {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            visible: true,
        }
    }

    /// Output that exists but must not be shown (e.g. denied access)
    pub fn hidden(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            visible: false,
        }
    }

    /// Visible and carrying non-whitespace content
    pub fn is_visible(&self) -> bool {
        self.visible && !self.markup.trim().is_empty()
    }
}

/// What a renderer returns: output keyed by the position of the item it renders
pub type RenderOutput = BTreeMap<Position, RenderedOutput>;

/// A rendering strategy able to produce output for some of a record's items
#[async_trait]
pub trait Renderer: Send + Sync + Debug {
    /// Load whatever the renderer needs before `render` is called
    async fn prepare(&self, _items: &[Item], _context: &RecordContext) -> Result<(), DomainError> {
        Ok(())
    }

    /// Render the given items. Items keep their original positions; the
    /// returned map should only contain positions taken from `items`.
    async fn render(
        &self,
        items: &[Item],
        context: &RecordContext,
    ) -> Result<RenderOutput, DomainError>;

    /// Human-readable description of the renderer's effective settings
    fn summarize(&self) -> Vec<String> {
        Vec::new()
    }
}
