//! Chain builder - merges stored configuration with the catalog into an ordered chain

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::{Chain, ChainFilter, StoredChainConfig, StoredRendererConfig};
use crate::domain::record::RecordContext;
use crate::domain::renderer::{RendererCatalog, RendererDefinition, RendererDescriptor, RendererId};

/// A stored configuration entry that does not match the current catalog.
///
/// Never an error: resolution silently drops these entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationMismatch {
    /// No installed renderer has this id
    UnknownRenderer { id: RendererId },
    /// Installed, but not usable for this record
    InapplicableRenderer { id: RendererId, label: String },
}

impl ConfigurationMismatch {
    pub fn id(&self) -> &RendererId {
        match self {
            Self::UnknownRenderer { id } | Self::InapplicableRenderer { id, .. } => id,
        }
    }
}

impl fmt::Display for ConfigurationMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRenderer { id } => write!(f, "Unknown renderer {}.", id),
            Self::InapplicableRenderer { label, .. } => write!(f, "Invalid renderer {}.", label),
        }
    }
}

/// Resolves the chain of renderers to try for a record.
///
/// Pure function of its inputs; chains are rebuilt for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainBuilder;

impl ChainBuilder {
    /// Resolve the ordered chain for a record.
    ///
    /// Stored entries for renderers the catalog does not offer are dropped.
    /// Offered renderers missing from the stored configuration are appended
    /// disabled, in catalog order. Entries without a stored weight take a
    /// running default weight (0, 1, 2, ...) in that merged order, counting
    /// only entries that pass the filter. Stored settings override catalog
    /// defaults key by key.
    pub fn resolve<C: RendererCatalog + ?Sized>(
        context: &RecordContext,
        stored: &StoredChainConfig,
        catalog: &C,
        filter: ChainFilter,
    ) -> Chain {
        let allowed = applicable_by_id(context, catalog);

        let mut merged: Vec<(&RendererDefinition, Option<&StoredRendererConfig>)> =
            Vec::with_capacity(allowed.len());

        for (id, config) in stored.iter() {
            match allowed.get(id) {
                Some(definition) => merged.push((definition, Some(config))),
                None => debug!(
                    renderer = %id,
                    record_type = %context.record_type(),
                    "Dropping stored renderer not offered by catalog"
                ),
            }
        }

        for (id, definition) in &allowed {
            if !stored.contains(id) {
                merged.push((definition, None));
            }
        }

        let mut default_weight = 0;
        let mut descriptors = Vec::with_capacity(merged.len());

        for (definition, config) in merged {
            let enabled = config.is_some_and(|c| c.enabled);

            // Filtered-out entries never consume a default weight
            if filter == ChainFilter::EnabledOnly && !enabled {
                continue;
            }

            let weight = match config.and_then(|c| c.weight) {
                Some(weight) => weight,
                None => {
                    let weight = default_weight;
                    default_weight += 1;
                    weight
                }
            };

            let mut settings = config.map(|c| c.settings.clone()).unwrap_or_default();
            for (key, value) in &definition.default_settings {
                settings
                    .entry(key.clone())
                    .or_insert_with(|| value.clone());
            }

            descriptors.push(
                RendererDescriptor::new(definition.id.clone(), definition.label.clone())
                    .with_enabled(enabled)
                    .with_weight(weight)
                    .with_settings(settings),
            );
        }

        let chain = Chain::new(descriptors);

        debug!(
            record_type = %context.record_type(),
            filter = ?filter,
            renderers = chain.len(),
            "Resolved renderer chain"
        );

        chain
    }

    /// Report stored entries that resolution would drop, in stored order
    pub fn diagnose<C: RendererCatalog + ?Sized>(
        context: &RecordContext,
        stored: &StoredChainConfig,
        catalog: &C,
    ) -> Vec<ConfigurationMismatch> {
        let allowed = applicable_by_id(context, catalog);

        stored
            .iter()
            .filter(|(id, _)| !allowed.contains_key(*id))
            .map(|(id, _)| match catalog.definition(id) {
                Some(definition) if !id.is_fallback() => {
                    ConfigurationMismatch::InapplicableRenderer {
                        id: id.clone(),
                        label: definition.label,
                    }
                }
                _ => ConfigurationMismatch::UnknownRenderer { id: id.clone() },
            })
            .collect()
    }
}

/// Applicable definitions keyed by id, in catalog order; first entry wins on duplicates
fn applicable_by_id<C: RendererCatalog + ?Sized>(
    context: &RecordContext,
    catalog: &C,
) -> IndexMap<RendererId, RendererDefinition> {
    let mut allowed = IndexMap::new();

    for definition in catalog.applicable_renderers(context) {
        if definition.id.is_fallback() {
            continue;
        }
        allowed.entry(definition.id.clone()).or_insert(definition);
    }

    allowed
}
