//! JSON renderer
//!
//! Last-resort renderer: serializes any non-null payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::record::{Item, RecordContext};
use crate::domain::renderer::{
    CatalogError, RenderOutput, RenderedOutput, Renderer, RendererConfiguration,
    RendererDefinition, RendererId, RendererPlugin,
};
use crate::domain::DomainError;

pub const JSON_RENDERER_ID: &str = "json";

#[derive(Debug)]
pub struct JsonRendererPlugin {
    definition: RendererDefinition,
}

impl JsonRendererPlugin {
    pub fn new() -> Self {
        Self {
            definition: RendererDefinition::new(RendererId::from_static(JSON_RENDERER_ID), "JSON")
                .with_description("Serializes the raw item payload as JSON")
                .with_record_types([
                    "string",
                    "text",
                    "integer",
                    "decimal",
                    "entity_reference",
                    "link",
                ])
                .with_default_setting("pretty", json!(false)),
        }
    }
}

impl Default for JsonRendererPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererPlugin for JsonRendererPlugin {
    fn definition(&self) -> &RendererDefinition {
        &self.definition
    }

    fn create(&self, config: RendererConfiguration) -> Result<Arc<dyn Renderer>, CatalogError> {
        let pretty: bool = config
            .get_setting_or("pretty", false)
            .map_err(|e| CatalogError::configuration(config.id.as_str(), e.to_string()))?;

        Ok(Arc::new(JsonRenderer { pretty }))
    }
}

#[derive(Debug)]
pub struct JsonRenderer {
    pretty: bool,
}

#[async_trait]
impl Renderer for JsonRenderer {
    async fn render(
        &self,
        items: &[Item],
        _context: &RecordContext,
    ) -> Result<RenderOutput, DomainError> {
        let mut output = RenderOutput::new();

        for item in items.iter().filter(|item| !item.value.is_null()) {
            let markup = if self.pretty {
                serde_json::to_string_pretty(&item.value)
            } else {
                serde_json::to_string(&item.value)
            }
            .map_err(|e| DomainError::renderer(JSON_RENDERER_ID, e.to_string()))?;

            output.insert(item.position, RenderedOutput::new(markup));
        }

        Ok(output)
    }

    fn summarize(&self) -> Vec<String> {
        if self.pretty {
            vec!["Pretty printed".to_string()]
        } else {
            vec!["Compact".to_string()]
        }
    }
}
