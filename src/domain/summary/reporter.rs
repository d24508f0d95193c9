//! Summary reporter - numbered description of a record's renderer chain

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::domain::chain::{ChainBuilder, ChainFilter, ConfigurationMismatch, StoredChainConfig};
use crate::domain::record::RecordContext;
use crate::domain::renderer::{RendererCatalog, RendererId};

/// Shown when no renderer is enabled for the record
pub const EMPTY_SUMMARY: &str = "No renderers selected yet.";

/// One line of a chain summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryEntry {
    /// An enabled renderer that will be tried, with its own settings summary
    Active {
        id: RendererId,
        label: String,
        details: Vec<String>,
    },
    /// An enabled stored entry the catalog cannot honour
    Mismatch(ConfigurationMismatch),
}

impl fmt::Display for SummaryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active { label, details, .. } if details.is_empty() => write!(f, "{}", label),
            Self::Active { label, details, .. } => write!(f, "{}: {}", label, details.join(", ")),
            Self::Mismatch(mismatch) => write!(f, "{}", mismatch),
        }
    }
}

/// Ordered description of a chain, for display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub entries: Vec<SummaryEntry>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One display line per entry, numbered from 1
    pub fn lines(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_SUMMARY.to_string()];
        }

        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| format!("{}. {}", index + 1, entry))
            .collect()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReporter;

impl SummaryReporter {
    /// Describe the enabled chain, plus enabled stored entries that were dropped
    pub fn summarize<C: RendererCatalog + ?Sized>(
        context: &RecordContext,
        stored: &StoredChainConfig,
        catalog: &C,
    ) -> Summary {
        let chain = ChainBuilder::resolve(context, stored, catalog, ChainFilter::EnabledOnly);

        let mut weighted: Vec<(i32, SummaryEntry)> = chain
            .iter()
            .map(|descriptor| {
                let details = match catalog.instantiate(descriptor, context) {
                    Ok(renderer) => renderer.summarize(),
                    Err(e) => {
                        warn!(
                            renderer = %descriptor.id,
                            error = %e,
                            "Could not instantiate renderer for summary"
                        );
                        Vec::new()
                    }
                };

                (
                    descriptor.weight,
                    SummaryEntry::Active {
                        id: descriptor.id.clone(),
                        label: descriptor.label.clone(),
                        details,
                    },
                )
            })
            .collect();

        for mismatch in ChainBuilder::diagnose(context, stored, catalog) {
            let Some(config) = stored.get(mismatch.id()) else {
                continue;
            };

            if config.enabled {
                weighted.push((
                    config.weight.unwrap_or(i32::MAX),
                    SummaryEntry::Mismatch(mismatch),
                ));
            }
        }

        weighted.sort_by_key(|(weight, _)| *weight);

        Summary {
            entries: weighted.into_iter().map(|(_, entry)| entry).collect(),
        }
    }
}
