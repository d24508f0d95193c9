//! Renderer chain entity and stored chain configuration

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::renderer::{RendererDescriptor, RendererId, Settings};

/// Which descriptors a resolved chain keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainFilter {
    /// Only enabled renderers (rendering)
    EnabledOnly,
    /// Every applicable renderer, enabled or not (previews, settings screens)
    All,
}

impl Default for ChainFilter {
    fn default() -> Self {
        Self::EnabledOnly
    }
}

impl ChainFilter {
    pub fn from_show_all(show_all: bool) -> Self {
        if show_all { Self::All } else { Self::EnabledOnly }
    }
}

/// Persisted settings of one renderer within a fallback chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredRendererConfig {
    /// Whether the renderer takes part in rendering
    #[serde(default)]
    pub enabled: bool,
    /// Sort key; renderers without one get a default in resolution order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    /// Stored settings; override catalog defaults key by key
    #[serde(default)]
    pub settings: Settings,
}

impl StoredRendererConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.settings.insert(key.into(), value);
        self
    }
}

/// Stored chain configuration: renderer id to settings, in stored order.
///
/// May be stale (ids of renderers no longer installed) or incomplete
/// (renderers installed since it was saved); resolution handles both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredChainConfig(IndexMap<RendererId, StoredRendererConfig>);

impl StoredChainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(mut self, id: RendererId, config: StoredRendererConfig) -> Self {
        self.insert(id, config);
        self
    }

    /// Insert or replace; a replaced entry keeps its original place in the order
    pub fn insert(&mut self, id: RendererId, config: StoredRendererConfig) {
        self.0.insert(id, config);
    }

    pub fn get(&self, id: &RendererId) -> Option<&StoredRendererConfig> {
        self.0.get(id)
    }

    pub fn contains(&self, id: &RendererId) -> bool {
        self.0.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RendererId, &StoredRendererConfig)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(RendererId, StoredRendererConfig)> for StoredChainConfig {
    fn from_iter<T: IntoIterator<Item = (RendererId, StoredRendererConfig)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered list of renderers to try for one record, ascending by weight
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chain {
    descriptors: Vec<RendererDescriptor>,
}

impl Chain {
    /// Build a chain, sorting by weight. Equal weights keep the given order.
    pub fn new(mut descriptors: Vec<RendererDescriptor>) -> Self {
        descriptors.sort_by_key(|d| d.weight);
        Self { descriptors }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn descriptors(&self) -> &[RendererDescriptor] {
        &self.descriptors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RendererDescriptor> {
        self.descriptors.iter()
    }

    pub fn get(&self, id: &RendererId) -> Option<&RendererDescriptor> {
        self.descriptors.iter().find(|d| &d.id == id)
    }

    pub fn ids(&self) -> Vec<&RendererId> {
        self.descriptors.iter().map(|d| &d.id).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a RendererDescriptor;
    type IntoIter = std::slice::Iter<'a, RendererDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
