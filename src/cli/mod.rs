//! CLI module for the fallback renderer
//!
//! Provides subcommands that run a record through the built-in catalog:
//! - `render`: render a record through its fallback chain
//! - `summary`: describe the configured chain
//! - `chain`: show the resolved chain and configuration diagnostics

pub mod chain;
pub mod render;
pub mod summary;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::chain::StoredChainConfig;
use crate::domain::record::{Record, RecordContext, RecordType};
use crate::domain::renderer::RendererCatalog;
use crate::infrastructure::catalog::TimeoutCatalog;
use crate::infrastructure::config::RendererConfigFile;
use crate::infrastructure::logging;
use crate::infrastructure::renderer::builtin_catalog;

/// Fallback renderer - renders each item with the first renderer in a chain that can
#[derive(Parser)]
#[command(name = "fallback-renderer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a record through its fallback chain
    Render(render::RenderArgs),

    /// Print the summary of the configured chain
    Summary(summary::SummaryArgs),

    /// Print the resolved chain and configuration diagnostics
    Chain(chain::ChainArgs),
}

/// Arguments shared by every subcommand
#[derive(Args, Clone, Debug)]
pub struct RecordArgs {
    /// JSON file describing the record to render
    #[arg(long)]
    pub record: PathBuf,

    /// TOML file with the stored renderer chain (overrides config)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Record file format
#[derive(Debug, Clone, Deserialize)]
pub struct RecordFile {
    pub record_type: String,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub view_mode: Option<String>,
    #[serde(default)]
    pub langcode: Option<String>,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl RecordFile {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse record file {}", path.display()))
    }

    pub fn into_record(self) -> anyhow::Result<Record> {
        let mut context = RecordContext::new(RecordType::new(self.record_type)?);

        if let Some(field_name) = self.field_name {
            context = context.with_field_name(field_name);
        }
        if let Some(view_mode) = self.view_mode {
            context = context.with_view_mode(view_mode);
        }
        if let Some(langcode) = self.langcode {
            context = context.with_langcode(langcode);
        }

        Ok(Record::new(context, self.items))
    }
}

/// Everything a subcommand needs: app config, record, stored chain and catalog
pub struct Session {
    pub config: AppConfig,
    pub record: Record,
    pub stored: StoredChainConfig,
    pub catalog: Arc<dyn RendererCatalog>,
}

impl Session {
    /// Load configuration, set up logging and read the inputs named by `args`
    pub fn open(args: &RecordArgs) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = AppConfig::load().unwrap_or_default();
        logging::init_logging(&config.logging);

        let record = RecordFile::from_file(&args.record)?.into_record()?;
        let stored = load_stored_config(args.config.as_deref(), &config)?;
        let catalog = create_catalog(&config)?;

        debug!(
            record_type = %record.context().record_type(),
            items = record.len(),
            stored = stored.len(),
            "Session ready"
        );

        Ok(Self {
            config,
            record,
            stored,
            catalog,
        })
    }
}

/// An explicit `--config` must load; the configured path falls back to empty
fn load_stored_config(
    explicit: Option<&Path>,
    config: &AppConfig,
) -> anyhow::Result<StoredChainConfig> {
    if let Some(path) = explicit {
        let file = RendererConfigFile::from_file(path)
            .with_context(|| format!("Failed to load renderer config {}", path.display()))?;
        return Ok(file.into());
    }

    Ok(match config.renderer.config_path {
        Some(ref path) => RendererConfigFile::load_or_default(path).into(),
        None => StoredChainConfig::new(),
    })
}

/// Built-in catalog, bounded by the configured timeout if there is one
fn create_catalog(config: &AppConfig) -> anyhow::Result<Arc<dyn RendererCatalog>> {
    let catalog = builtin_catalog().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::anyhow!("Failed to register built-in renderers: {}", messages.join("; "))
    })?;

    Ok(match config.renderer.timeout() {
        Some(timeout) => Arc::new(TimeoutCatalog::new(catalog, timeout)),
        None => Arc::new(catalog),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_file_into_record() {
        let file: RecordFile = serde_json::from_value(json!({
            "record_type": "entity_reference",
            "field_name": "field_tags",
            "langcode": "en",
            "items": [{"label": "One"}, {"label": "Two"}]
        }))
        .unwrap();

        let record = file.into_record().unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.context().record_type().as_str(), "entity_reference");
        assert_eq!(record.context().field_name(), Some("field_tags"));
        assert_eq!(record.context().view_mode(), "default");
        assert_eq!(record.items()[1].position, 1);
    }

    #[test]
    fn test_record_file_rejects_blank_type() {
        let file: RecordFile =
            serde_json::from_value(json!({"record_type": "  ", "items": []})).unwrap();

        assert!(file.into_record().is_err());
    }

    #[test]
    fn test_create_catalog_with_timeout() {
        let mut config = AppConfig::default();
        config.renderer.timeout_ms = 100;

        let catalog = create_catalog(&config).unwrap();
        let context = RecordContext::new(RecordType::new("string").unwrap());

        assert_eq!(catalog.applicable_renderers(&context).len(), 2);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = load_stored_config(
            Some(Path::new("/nonexistent/renderers.toml")),
            &AppConfig::default(),
        );

        assert!(result.is_err());
    }
}
