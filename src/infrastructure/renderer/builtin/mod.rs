//! Built-in renderers
//!
//! Reference renderer plugins that ship with the crate.

mod json;
mod label;
mod plain_text;

pub use json::{JsonRendererPlugin, JSON_RENDERER_ID};
pub use label::{LabelRendererPlugin, LABEL_RENDERER_ID};
pub use plain_text::{PlainTextRendererPlugin, PLAIN_TEXT_RENDERER_ID};

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::renderer::{CatalogError, RendererPlugin};
use crate::infrastructure::catalog::InMemoryRendererCatalog;

/// Register all built-in renderer plugins, in order of preference
pub fn register_builtin_renderers(
    catalog: &mut InMemoryRendererCatalog,
) -> Result<(), Vec<CatalogError>> {
    let plugins: Vec<Arc<dyn RendererPlugin>> = vec![
        Arc::new(LabelRendererPlugin::new()),
        Arc::new(PlainTextRendererPlugin::new()),
        Arc::new(JsonRendererPlugin::new()),
    ];
    let plugin_count = plugins.len();

    let mut errors = Vec::new();

    for plugin in plugins {
        let renderer_id = plugin.definition().id.clone();

        match catalog.register(plugin) {
            Ok(()) => debug!(renderer = %renderer_id, "Built-in renderer registered"),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        info!(count = plugin_count, "All built-in renderers registered");
        Ok(())
    } else {
        Err(errors)
    }
}

/// Catalog pre-populated with the built-in renderers
pub fn builtin_catalog() -> Result<InMemoryRendererCatalog, Vec<CatalogError>> {
    let mut catalog = InMemoryRendererCatalog::new();
    register_builtin_renderers(&mut catalog)?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{RecordContext, RecordType};
    use crate::domain::renderer::RendererCatalog;

    fn applicable(catalog: &InMemoryRendererCatalog, record_type: &str) -> Vec<String> {
        let context = RecordContext::new(RecordType::new(record_type).unwrap());
        catalog
            .applicable_renderers(&context)
            .into_iter()
            .map(|d| d.id.to_string())
            .collect()
    }

    #[test]
    fn test_register_all_builtin_renderers() {
        let catalog = builtin_catalog().unwrap();

        let ids: Vec<_> = catalog
            .list_definitions()
            .into_iter()
            .map(|d| d.id.to_string())
            .collect();
        assert_eq!(ids, vec!["label", "plain_text", "json"]);
    }

    #[test]
    fn test_builtin_applicability() {
        let catalog = builtin_catalog().unwrap();

        assert_eq!(applicable(&catalog, "entity_reference"), vec!["label", "json"]);
        assert_eq!(applicable(&catalog, "string"), vec!["plain_text", "json"]);
        assert!(applicable(&catalog, "image").is_empty());
    }

    #[test]
    fn test_registering_twice_reports_every_duplicate() {
        let mut catalog = builtin_catalog().unwrap();

        let errors = register_builtin_renderers(&mut catalog).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| matches!(e, CatalogError::AlreadyRegistered { .. })));
    }
}
