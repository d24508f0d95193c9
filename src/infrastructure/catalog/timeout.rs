//! Catalog decorator bounding every renderer invocation

use std::sync::Arc;
use std::time::Duration;

use crate::domain::record::RecordContext;
use crate::domain::renderer::{
    CatalogError, Renderer, RendererCatalog, RendererDefinition, RendererDescriptor, RendererId,
};
use crate::infrastructure::renderer::TimeoutRenderer;

/// Wraps each renderer instantiated by `inner` in a [`TimeoutRenderer`]
#[derive(Debug)]
pub struct TimeoutCatalog<C> {
    inner: C,
    timeout: Duration,
}

impl<C: RendererCatalog> TimeoutCatalog<C> {
    pub fn new(inner: C, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: RendererCatalog> RendererCatalog for TimeoutCatalog<C> {
    fn applicable_renderers(&self, context: &RecordContext) -> Vec<RendererDefinition> {
        self.inner.applicable_renderers(context)
    }

    fn definition(&self, id: &RendererId) -> Option<RendererDefinition> {
        self.inner.definition(id)
    }

    fn instantiate(
        &self,
        descriptor: &RendererDescriptor,
        context: &RecordContext,
    ) -> Result<Arc<dyn Renderer>, CatalogError> {
        let renderer = self.inner.instantiate(descriptor, context)?;

        Ok(Arc::new(TimeoutRenderer::new(
            renderer,
            descriptor.id.clone(),
            self.timeout,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::{Chain, FallbackExecutor, FallbackExecutorConfig};
    use crate::domain::record::{Item, RecordType};
    use crate::domain::renderer::catalog_mock::MockRendererCatalog;
    use crate::domain::renderer::mock::MockRenderer;
    use crate::domain::renderer::{RenderOutput, RenderedOutput};
    use crate::domain::DomainError;
    use async_trait::async_trait;
    use serde_json::json;

    #[derive(Debug)]
    struct StalledRenderer;

    #[async_trait]
    impl Renderer for StalledRenderer {
        async fn render(
            &self,
            items: &[Item],
            _context: &RecordContext,
        ) -> Result<RenderOutput, DomainError> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(items
                .iter()
                .map(|item| (item.position, RenderedOutput::new("late")))
                .collect())
        }
    }

    fn id(value: &str) -> RendererId {
        RendererId::new(value).unwrap()
    }

    #[test]
    fn test_definitions_are_delegated() {
        let inner = MockRendererCatalog::new().with_renderer(
            RendererDefinition::new(id("text"), "Text"),
            Arc::new(MockRenderer::new("text")),
        );
        let catalog = TimeoutCatalog::new(inner, Duration::from_millis(100));
        let context = RecordContext::new(RecordType::new("string").unwrap());

        assert_eq!(catalog.applicable_renderers(&context).len(), 1);
        assert!(catalog.definition(&id("text")).is_some());
        assert!(matches!(
            catalog
                .instantiate(&RendererDescriptor::new(id("ghost"), "Ghost"), &context)
                .unwrap_err(),
            CatalogError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_stalled_renderer_falls_through() {
        let inner = MockRendererCatalog::new()
            .with_renderer(
                RendererDefinition::new(id("stalled"), "Stalled"),
                Arc::new(StalledRenderer),
            )
            .with_renderer(
                RendererDefinition::new(id("backup"), "Backup"),
                Arc::new(MockRenderer::new("backup")),
            );
        let catalog = TimeoutCatalog::new(inner, Duration::from_millis(20));
        let executor = FallbackExecutor::new(catalog, FallbackExecutorConfig::default());

        let chain = Chain::new(vec![
            RendererDescriptor::new(id("stalled"), "Stalled").with_weight(0),
            RendererDescriptor::new(id("backup"), "Backup").with_weight(1),
        ]);
        let context = RecordContext::new(RecordType::new("string").unwrap());
        let items = vec![Item::new(0, json!("a")), Item::new(1, json!("b"))];

        let outcome = executor
            .render_detailed(&chain, &context, &items)
            .await
            .unwrap();

        assert_eq!(outcome.invoked(), 2);
        assert!(outcome.attempts[0].error.as_deref().unwrap().contains("timed out"));
        assert_eq!(outcome.result.contributor(0), Some(&id("backup")));
        assert_eq!(outcome.result.contributor(1), Some(&id("backup")));
    }
}
