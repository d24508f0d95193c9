//! Time-bounded renderer decorator

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::record::{Item, RecordContext};
use crate::domain::renderer::{RenderOutput, Renderer, RendererId};
use crate::domain::DomainError;

/// Wraps a renderer so `prepare` and `render` each fail with
/// [`DomainError::Timeout`] once `timeout` elapses.
#[derive(Debug)]
pub struct TimeoutRenderer {
    inner: Arc<dyn Renderer>,
    id: RendererId,
    timeout: Duration,
}

impl TimeoutRenderer {
    pub fn new(inner: Arc<dyn Renderer>, id: RendererId, timeout: Duration) -> Self {
        Self { inner, id, timeout }
    }

    fn elapsed(&self) -> DomainError {
        DomainError::timeout(self.id.as_str(), self.timeout.as_millis() as u64)
    }
}

#[async_trait]
impl Renderer for TimeoutRenderer {
    async fn prepare(&self, items: &[Item], context: &RecordContext) -> Result<(), DomainError> {
        tokio::time::timeout(self.timeout, self.inner.prepare(items, context))
            .await
            .map_err(|_| self.elapsed())?
    }

    async fn render(
        &self,
        items: &[Item],
        context: &RecordContext,
    ) -> Result<RenderOutput, DomainError> {
        tokio::time::timeout(self.timeout, self.inner.render(items, context))
            .await
            .map_err(|_| self.elapsed())?
    }

    fn summarize(&self) -> Vec<String> {
        self.inner.summarize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordType;
    use crate::domain::renderer::mock::MockRenderer;
    use crate::domain::renderer::RenderedOutput;
    use serde_json::json;

    #[derive(Debug)]
    struct SlowRenderer {
        delay: Duration,
    }

    #[async_trait]
    impl Renderer for SlowRenderer {
        async fn render(
            &self,
            items: &[Item],
            _context: &RecordContext,
        ) -> Result<RenderOutput, DomainError> {
            tokio::time::sleep(self.delay).await;
            Ok(items
                .iter()
                .map(|item| (item.position, RenderedOutput::new("slow")))
                .collect())
        }
    }

    fn context() -> RecordContext {
        RecordContext::new(RecordType::new("string").unwrap())
    }

    fn id(value: &str) -> RendererId {
        RendererId::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_fast_renderer_passes_through() {
        let inner = Arc::new(MockRenderer::new("fast").covering([0]));
        let renderer = TimeoutRenderer::new(inner, id("fast"), Duration::from_secs(5));

        let output = renderer
            .render(&[Item::new(0, json!("a"))], &context())
            .await
            .unwrap();

        assert_eq!(output.get(&0).unwrap().markup, MockRenderer::markup("fast", 0));
    }

    #[tokio::test]
    async fn test_slow_renderer_times_out() {
        let inner = Arc::new(SlowRenderer {
            delay: Duration::from_millis(500),
        });
        let renderer = TimeoutRenderer::new(inner, id("slow"), Duration::from_millis(20));

        let error = renderer
            .render(&[Item::new(0, json!("a"))], &context())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            DomainError::Timeout { ref renderer, timeout_ms: 20 } if renderer == "slow"
        ));
    }

    #[tokio::test]
    async fn test_inner_errors_are_preserved() {
        let inner = Arc::new(MockRenderer::new("bad").with_prepare_error("cache unavailable"));
        let renderer = TimeoutRenderer::new(inner, id("bad"), Duration::from_secs(5));

        let error = renderer.prepare(&[], &context()).await.unwrap_err();

        assert!(matches!(error, DomainError::Renderer { .. }));
    }

    #[test]
    fn test_summary_is_delegated() {
        let inner = Arc::new(MockRenderer::new("text").with_summary(&["Pretty printed"]));
        let renderer = TimeoutRenderer::new(inner, id("text"), Duration::from_secs(1));

        assert_eq!(renderer.summarize(), vec!["Pretty printed"]);
    }
}
