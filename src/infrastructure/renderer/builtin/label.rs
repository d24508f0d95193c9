//! Label renderer
//!
//! Renders the label of a referenced entity or link, read from one key of an
//! object payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::record::{Item, RecordContext};
use crate::domain::renderer::{
    CatalogError, RenderOutput, RenderedOutput, Renderer, RendererConfiguration,
    RendererDefinition, RendererId, RendererPlugin,
};
use crate::domain::DomainError;

pub const LABEL_RENDERER_ID: &str = "label";

const DEFAULT_LABEL_FIELD: &str = "label";

/// Plugin for the label renderer
#[derive(Debug)]
pub struct LabelRendererPlugin {
    definition: RendererDefinition,
}

impl LabelRendererPlugin {
    pub fn new() -> Self {
        Self {
            definition: RendererDefinition::new(RendererId::from_static(LABEL_RENDERER_ID), "Label")
                .with_description("Renders the label of a referenced entity or link")
                .with_record_types(["entity_reference", "link"])
                .with_default_setting("field", json!(DEFAULT_LABEL_FIELD)),
        }
    }
}

impl Default for LabelRendererPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererPlugin for LabelRendererPlugin {
    fn definition(&self) -> &RendererDefinition {
        &self.definition
    }

    fn create(&self, config: RendererConfiguration) -> Result<Arc<dyn Renderer>, CatalogError> {
        let invalid =
            |e: serde_json::Error| CatalogError::configuration(config.id.as_str(), e.to_string());

        let field: String = config
            .get_setting_or("field", DEFAULT_LABEL_FIELD.to_string())
            .map_err(invalid)?;
        let link_to: Option<String> = config.get_setting("link_to").map_err(invalid)?;

        if field.trim().is_empty() {
            return Err(CatalogError::configuration(
                config.id.as_str(),
                "Setting 'field' cannot be empty",
            ));
        }

        Ok(Arc::new(LabelRenderer { field, link_to }))
    }
}

#[derive(Debug)]
pub struct LabelRenderer {
    /// Object key holding the label
    field: String,
    /// Object key holding a URL to append
    link_to: Option<String>,
}

impl LabelRenderer {
    fn label(&self, value: &Value) -> Option<String> {
        let object = value.as_object()?;
        let label = object.get(&self.field)?.as_str()?;

        let url = self
            .link_to
            .as_ref()
            .and_then(|key| object.get(key))
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty());

        Some(match url {
            Some(url) => format!("{} ({})", label, url),
            None => label.to_string(),
        })
    }
}

#[async_trait]
impl Renderer for LabelRenderer {
    async fn render(
        &self,
        items: &[Item],
        _context: &RecordContext,
    ) -> Result<RenderOutput, DomainError> {
        Ok(items
            .iter()
            .filter_map(|item| {
                self.label(&item.value)
                    .map(|label| (item.position, RenderedOutput::new(label)))
            })
            .collect())
    }

    fn summarize(&self) -> Vec<String> {
        let mut summary = vec![format!("Label from '{}'", self.field)];
        if let Some(ref link_to) = self.link_to {
            summary.push(format!("Linked via '{}'", link_to));
        }
        summary
    }
}
