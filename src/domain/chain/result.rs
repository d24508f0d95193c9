//! Render results produced by walking a chain

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::record::Position;
use crate::domain::renderer::{RenderOutput, RenderedOutput, RendererId};

/// Output for one position together with the renderer that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedItem {
    pub renderer: RendererId,
    pub output: RenderedOutput,
}

/// Merged, position-ordered output of a render pass.
///
/// A position, once filled, is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderResult {
    items: BTreeMap<Position, RenderedItem>,
}

impl RenderResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: Position) -> Option<&RenderedItem> {
        self.items.get(&position)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.items.contains_key(&position)
    }

    /// Renderer that filled a position
    pub fn contributor(&self, position: Position) -> Option<&RendererId> {
        self.items.get(&position).map(|item| &item.renderer)
    }

    /// Covered positions, ascending
    pub fn positions(&self) -> Vec<Position> {
        self.items.keys().copied().collect()
    }

    /// Positions in `0..item_count` nobody rendered
    pub fn uncovered(&self, item_count: usize) -> Vec<Position> {
        (0..item_count).filter(|p| !self.contains(*p)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &RenderedItem)> {
        self.items.iter().map(|(position, item)| (*position, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Merge one renderer's output.
    ///
    /// Accepts only visible output for positions in `requested` that are not
    /// yet covered; everything else is returned as discarded.
    pub(crate) fn merge(
        &mut self,
        renderer: &RendererId,
        output: RenderOutput,
        requested: &BTreeSet<Position>,
    ) -> (Vec<Position>, Vec<Position>) {
        let mut accepted = Vec::new();
        let mut discarded = Vec::new();

        for (position, rendered) in output {
            if requested.contains(&position) && !self.contains(position) && rendered.is_visible()
            {
                self.items.insert(
                    position,
                    RenderedItem {
                        renderer: renderer.clone(),
                        output: rendered,
                    },
                );
                accepted.push(position);
            } else {
                discarded.push(position);
            }
        }

        (accepted, discarded)
    }
}

/// One renderer invocation during a render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RendererAttempt {
    pub renderer: RendererId,
    /// Positions the renderer was asked to render
    pub requested: Vec<Position>,
    /// Positions whose output was merged into the result
    pub accepted: Vec<Position>,
    /// Positions returned but rejected (not requested, already covered or not visible)
    pub discarded: Vec<Position>,
    /// Error message if the invocation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: u64,
}

impl RendererAttempt {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a render pass plus a record of every invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderOutcome {
    pub result: RenderResult,
    pub attempts: Vec<RendererAttempt>,
}

impl RenderOutcome {
    /// Number of renderers actually invoked
    pub fn invoked(&self) -> usize {
        self.attempts.len()
    }
}
