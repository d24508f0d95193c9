//! Plain text renderer
//!
//! Renders scalar payloads as text, optionally trimmed.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::record::{Item, RecordContext};
use crate::domain::renderer::{
    CatalogError, RenderOutput, RenderedOutput, Renderer, RendererConfiguration,
    RendererDefinition, RendererId, RendererPlugin,
};
use crate::domain::DomainError;

pub const PLAIN_TEXT_RENDERER_ID: &str = "plain_text";

/// Plugin for the plain text renderer
#[derive(Debug)]
pub struct PlainTextRendererPlugin {
    definition: RendererDefinition,
}

impl PlainTextRendererPlugin {
    pub fn new() -> Self {
        Self {
            definition: RendererDefinition::new(
                RendererId::from_static(PLAIN_TEXT_RENDERER_ID),
                "Plain text",
            )
            .with_description("Renders strings and numbers as plain text")
            .with_record_types(["string", "text", "integer", "decimal"])
            .with_default_setting("trim_length", json!(0)),
        }
    }
}

impl Default for PlainTextRendererPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererPlugin for PlainTextRendererPlugin {
    fn definition(&self) -> &RendererDefinition {
        &self.definition
    }

    fn create(&self, config: RendererConfiguration) -> Result<Arc<dyn Renderer>, CatalogError> {
        let trim_length: usize = config
            .get_setting_or("trim_length", 0)
            .map_err(|e| CatalogError::configuration(config.id.as_str(), e.to_string()))?;

        Ok(Arc::new(PlainTextRenderer { trim_length }))
    }
}

/// Renders strings, numbers and booleans
#[derive(Debug)]
pub struct PlainTextRenderer {
    /// Maximum number of characters; 0 disables trimming
    trim_length: usize,
}

impl PlainTextRenderer {
    fn text(&self, value: &Value) -> Option<String> {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };

        if self.trim_length > 0 && text.chars().count() > self.trim_length {
            Some(text.chars().take(self.trim_length).collect())
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl Renderer for PlainTextRenderer {
    async fn render(
        &self,
        items: &[Item],
        _context: &RecordContext,
    ) -> Result<RenderOutput, DomainError> {
        Ok(items
            .iter()
            .filter_map(|item| {
                self.text(&item.value)
                    .map(|text| (item.position, RenderedOutput::new(text)))
            })
            .collect())
    }

    fn summarize(&self) -> Vec<String> {
        if self.trim_length > 0 {
            vec![format!("Trimmed to {} characters", self.trim_length)]
        } else {
            Vec::new()
        }
    }
}
