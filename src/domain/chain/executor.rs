//! Fallback executor - walks a renderer chain until every item is rendered

use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use metrics::{counter, histogram};
use tracing::{debug, warn};

use super::{Chain, RenderOutcome, RenderResult, RendererAttempt};
use crate::domain::record::{validate_positions, Item, Position, RecordContext};
use crate::domain::renderer::{RenderOutput, RendererCatalog, RendererDescriptor};
use crate::domain::DomainError;

/// Configuration for the fallback executor
#[derive(Debug, Clone)]
pub struct FallbackExecutorConfig {
    /// Whether to record invocation metrics
    pub collect_metrics: bool,
}

impl Default for FallbackExecutorConfig {
    fn default() -> Self {
        Self {
            collect_metrics: true,
        }
    }
}

/// Fallback executor - invokes each renderer of a chain, in order, on the
/// items earlier renderers left unrendered.
///
/// Holds no per-render state, so one executor serves concurrent render calls.
pub struct FallbackExecutor<C: RendererCatalog> {
    catalog: C,
    config: FallbackExecutorConfig,
}

impl<C: RendererCatalog> std::fmt::Debug for FallbackExecutor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackExecutor")
            .field("config", &self.config)
            .finish()
    }
}

impl<C: RendererCatalog> FallbackExecutor<C> {
    /// Create a new fallback executor
    pub fn new(catalog: C, config: FallbackExecutorConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Render items through the chain, returning position-ordered output
    pub async fn render(
        &self,
        chain: &Chain,
        context: &RecordContext,
        items: &[Item],
    ) -> Result<RenderResult, DomainError> {
        Ok(self.render_detailed(chain, context, items).await?.result)
    }

    /// Render items through the chain, also reporting every invocation.
    ///
    /// Fails only when `items` are not at positions `0..len`. Renderer
    /// failures are recorded and the walk moves on to the next renderer.
    pub async fn render_detailed(
        &self,
        chain: &Chain,
        context: &RecordContext,
        items: &[Item],
    ) -> Result<RenderOutcome, DomainError> {
        validate_positions(items)?;

        let mut result = RenderResult::new();
        let mut attempts = Vec::new();

        for descriptor in chain {
            let remaining: Cow<'_, [Item]> = if result.is_empty() {
                Cow::Borrowed(items)
            } else {
                Cow::Owned(
                    items
                        .iter()
                        .filter(|item| !result.contains(item.position))
                        .cloned()
                        .collect(),
                )
            };

            if remaining.is_empty() {
                debug!(
                    renderer = %descriptor.id,
                    "All items rendered, skipping remaining renderers"
                );
                break;
            }

            let requested: BTreeSet<Position> = remaining.iter().map(|i| i.position).collect();

            debug!(
                renderer = %descriptor.id,
                remaining = requested.len(),
                "Invoking renderer"
            );

            let start = Instant::now();
            let outcome = self.invoke(descriptor, context, &remaining).await;
            let latency = start.elapsed();

            let attempt = match outcome {
                Ok(output) => {
                    let (accepted, discarded) = result.merge(&descriptor.id, output, &requested);

                    if !discarded.is_empty() {
                        debug!(
                            renderer = %descriptor.id,
                            discarded = ?discarded,
                            "Discarded output outside the unrendered set"
                        );
                    }

                    RendererAttempt {
                        renderer: descriptor.id.clone(),
                        requested: requested.into_iter().collect(),
                        accepted,
                        discarded,
                        error: None,
                        latency_ms: latency.as_millis() as u64,
                    }
                }
                Err(e) => {
                    warn!(
                        renderer = %descriptor.id,
                        error = %e,
                        "Renderer failed, falling back to next renderer"
                    );

                    RendererAttempt {
                        renderer: descriptor.id.clone(),
                        requested: requested.into_iter().collect(),
                        accepted: Vec::new(),
                        discarded: Vec::new(),
                        error: Some(e.to_string()),
                        latency_ms: latency.as_millis() as u64,
                    }
                }
            };

            if self.config.collect_metrics {
                record_attempt_metrics(&attempt, latency.as_secs_f64());
            }

            attempts.push(attempt);
        }

        let uncovered = items.len() - result.len();

        if self.config.collect_metrics && uncovered > 0 {
            counter!("fallback_render_uncovered_positions_total").increment(uncovered as u64);
        }

        debug!(
            record_type = %context.record_type(),
            items = items.len(),
            rendered = result.len(),
            uncovered,
            invoked = attempts.len(),
            "Fallback chain complete"
        );

        Ok(RenderOutcome { result, attempts })
    }

    /// Instantiate, prepare and run one renderer. A panic anywhere in the
    /// renderer is reported as a renderer error.
    async fn invoke(
        &self,
        descriptor: &RendererDescriptor,
        context: &RecordContext,
        items: &[Item],
    ) -> Result<RenderOutput, DomainError> {
        let run = async {
            let renderer = self
                .catalog
                .instantiate(descriptor, context)
                .map_err(|e| DomainError::renderer(descriptor.id.as_str(), e.to_string()))?;

            renderer.prepare(items, context).await?;
            renderer.render(items, context).await
        };

        AssertUnwindSafe(run)
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(DomainError::renderer(
                    descriptor.id.as_str(),
                    format!("panicked: {}", panic_message(payload.as_ref())),
                ))
            })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

fn record_attempt_metrics(attempt: &RendererAttempt, duration_secs: f64) {
    let renderer = attempt.renderer.to_string();
    let status = if attempt.succeeded() { "success" } else { "error" };

    counter!(
        "fallback_renderer_invocations_total",
        "renderer" => renderer.clone(),
        "status" => status
    )
    .increment(1);

    counter!("fallback_renderer_positions_rendered_total", "renderer" => renderer.clone())
        .increment(attempt.accepted.len() as u64);

    histogram!("fallback_renderer_duration_seconds", "renderer" => renderer).record(duration_secs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordType;
    use crate::domain::renderer::catalog_mock::MockRendererCatalog;
    use crate::domain::renderer::mock::MockRenderer;
    use crate::domain::renderer::{RendererDefinition, RendererId};
    use serde_json::json;
    use std::sync::Arc;

    fn id(value: &str) -> RendererId {
        RendererId::new(value).unwrap()
    }

    fn context() -> RecordContext {
        RecordContext::new(RecordType::new("string").unwrap())
    }

    fn items(count: usize) -> Vec<Item> {
        (0..count).map(|p| Item::new(p, json!(p))).collect()
    }

    fn descriptor(name: &str, weight: i32) -> RendererDescriptor {
        RendererDescriptor::new(id(name), name).with_weight(weight)
    }

    fn definition(name: &str) -> RendererDefinition {
        RendererDefinition::new(id(name), name)
    }

    fn executor(catalog: MockRendererCatalog) -> FallbackExecutor<MockRendererCatalog> {
        FallbackExecutor::new(
            catalog,
            FallbackExecutorConfig {
                collect_metrics: false,
            },
        )
    }

    fn markup(result: &RenderResult, position: Position) -> &str {
        &result.get(position).unwrap().output.markup
    }

    #[tokio::test]
    async fn test_partial_coverage_falls_back() {
        let a = MockRenderer::new("a").covering([0, 2]);
        let b = MockRenderer::new("b");
        let (a_log, b_log) = (a.log(), b.log());

        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("a"), Arc::new(a))
            .with_renderer(definition("b"), Arc::new(b));
        let chain = Chain::new(vec![descriptor("a", 0), descriptor("b", 1)]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(3))
            .await
            .unwrap();
        let result = &outcome.result;

        assert_eq!(result.positions(), vec![0, 1, 2]);
        assert_eq!(markup(result, 0), "a:0");
        assert_eq!(markup(result, 1), "b:1");
        assert_eq!(markup(result, 2), "a:2");
        assert_eq!(result.contributor(1), Some(&id("b")));

        assert_eq!(a_log.requested(), vec![vec![0, 1, 2]]);
        assert_eq!(b_log.requested(), vec![vec![1]]);
        assert_eq!(outcome.attempts[1].accepted, vec![1]);
    }

    #[tokio::test]
    async fn test_early_exit_when_first_covers_everything() {
        let a = MockRenderer::new("a");
        let b = MockRenderer::new("b");
        let b_log = b.log();

        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("a"), Arc::new(a))
            .with_renderer(definition("b"), Arc::new(b));
        let chain = Chain::new(vec![descriptor("a", 0), descriptor("b", 1)]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(4))
            .await
            .unwrap();

        assert_eq!(outcome.result.len(), 4);
        assert_eq!(outcome.invoked(), 1);
        assert_eq!(b_log.call_count(), 0);
    }

    #[tokio::test]
    async fn test_covered_position_never_overwritten() {
        // b claims position 0 as well, but only ever sees position 1
        let a = MockRenderer::new("a").covering([0]);
        let b = MockRenderer::new("b").with_extra(0, "b:stolen");

        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("a"), Arc::new(a))
            .with_renderer(definition("b"), Arc::new(b));
        let chain = Chain::new(vec![descriptor("a", 0), descriptor("b", 1)]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(2))
            .await
            .unwrap();

        assert_eq!(markup(&outcome.result, 0), "a:0");
        assert_eq!(markup(&outcome.result, 1), "b:1");
        assert_eq!(outcome.attempts[1].discarded, vec![0]);
    }

    #[tokio::test]
    async fn test_swapping_weights_changes_winner() {
        let catalog = Arc::new(
            MockRendererCatalog::new()
                .with_renderer(definition("a"), Arc::new(MockRenderer::new("a")))
                .with_renderer(definition("b"), Arc::new(MockRenderer::new("b"))),
        );
        let executor = FallbackExecutor::new(catalog, FallbackExecutorConfig::default());

        let a_first = Chain::new(vec![descriptor("a", 0), descriptor("b", 1)]);
        let b_first = Chain::new(vec![descriptor("a", 1), descriptor("b", 0)]);

        let first = executor.render(&a_first, &context(), &items(1)).await.unwrap();
        let second = executor.render(&b_first, &context(), &items(1)).await.unwrap();

        assert_eq!(first.contributor(0), Some(&id("a")));
        assert_eq!(second.contributor(0), Some(&id("b")));
    }

    #[tokio::test]
    async fn test_empty_chain_renders_nothing() {
        let outcome = executor(MockRendererCatalog::new())
            .render_detailed(&Chain::empty(), &context(), &items(3))
            .await
            .unwrap();

        assert!(outcome.result.is_empty());
        assert_eq!(outcome.invoked(), 0);
    }

    #[tokio::test]
    async fn test_failing_renderer_is_recovered() {
        let failing = MockRenderer::new("broken").with_error("backend unavailable");
        let catalog = MockRendererCatalog::new().with_renderer(definition("broken"), Arc::new(failing));
        let chain = Chain::new(vec![descriptor("broken", 0)]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(3))
            .await
            .unwrap();

        assert!(outcome.result.is_empty());
        assert_eq!(outcome.invoked(), 1);
        assert!(!outcome.attempts[0].succeeded());
        assert!(
            outcome.attempts[0]
                .error
                .as_deref()
                .unwrap()
                .contains("backend unavailable")
        );
    }

    #[tokio::test]
    async fn test_failure_continues_to_next_renderer() {
        let failing = MockRenderer::new("broken").with_error("boom");
        let prepare_failing = MockRenderer::new("unprepared").with_prepare_error("no data");
        let good = MockRenderer::new("good");
        let good_log = good.log();

        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("broken"), Arc::new(failing))
            .with_broken(definition("missing"))
            .with_renderer(definition("unprepared"), Arc::new(prepare_failing))
            .with_renderer(definition("good"), Arc::new(good));
        let chain = Chain::new(vec![
            descriptor("broken", 0),
            descriptor("missing", 1),
            descriptor("unprepared", 2),
            descriptor("good", 3),
        ]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(2))
            .await
            .unwrap();

        assert_eq!(outcome.result.len(), 2);
        assert_eq!(outcome.result.contributor(0), Some(&id("good")));
        assert_eq!(good_log.requested(), vec![vec![0, 1]]);

        let failed: Vec<bool> = outcome.attempts.iter().map(|a| a.succeeded()).collect();
        assert_eq!(failed, vec![false, false, false, true]);
    }

    #[derive(Debug)]
    struct PanickingRenderer;

    #[async_trait::async_trait]
    impl crate::domain::renderer::Renderer for PanickingRenderer {
        async fn render(
            &self,
            _items: &[Item],
            _context: &RecordContext,
        ) -> Result<RenderOutput, DomainError> {
            panic!("index out of range");
        }
    }

    #[tokio::test]
    async fn test_panicking_renderer_falls_through() {
        let first = MockRenderer::new("first").covering([0]);
        let good = MockRenderer::new("good");
        let good_log = good.log();

        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("first"), Arc::new(first))
            .with_renderer(definition("panicky"), Arc::new(PanickingRenderer))
            .with_renderer(definition("good"), Arc::new(good));
        let chain = Chain::new(vec![
            descriptor("first", 0),
            descriptor("panicky", 1),
            descriptor("good", 2),
        ]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(2))
            .await
            .unwrap();

        assert_eq!(markup(&outcome.result, 0), "first:0");
        assert_eq!(markup(&outcome.result, 1), "good:1");
        assert_eq!(good_log.requested(), vec![vec![1]]);

        let error = outcome.attempts[1].error.as_deref().unwrap();
        assert!(error.contains("panicked: index out of range"));
        assert!(outcome.attempts[1].accepted.is_empty());
    }

    #[tokio::test]
    async fn test_hidden_output_leaves_position_open() {
        let a = MockRenderer::new("a").hiding([1]);
        let b = MockRenderer::new("b");

        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("a"), Arc::new(a))
            .with_renderer(definition("b"), Arc::new(b));
        let chain = Chain::new(vec![descriptor("a", 0), descriptor("b", 1)]);

        let result = executor(catalog)
            .render(&chain, &context(), &items(2))
            .await
            .unwrap();

        assert_eq!(result.contributor(0), Some(&id("a")));
        assert_eq!(result.contributor(1), Some(&id("b")));
    }

    #[tokio::test]
    async fn test_unrequested_positions_discarded() {
        let a = MockRenderer::new("a").covering([0]).with_extra(7, "a:7");

        let catalog = MockRendererCatalog::new().with_renderer(definition("a"), Arc::new(a));
        let chain = Chain::new(vec![descriptor("a", 0)]);

        let outcome = executor(catalog)
            .render_detailed(&chain, &context(), &items(2))
            .await
            .unwrap();

        assert_eq!(outcome.result.positions(), vec![0]);
        assert_eq!(outcome.result.uncovered(2), vec![1]);
        assert_eq!(outcome.attempts[0].discarded, vec![7]);
    }

    #[tokio::test]
    async fn test_settings_passed_to_instantiation() {
        let catalog = Arc::new(
            MockRendererCatalog::new()
                .with_renderer(definition("a"), Arc::new(MockRenderer::new("a"))),
        );
        let chain = Chain::new(vec![descriptor("a", 0).with_setting("field", json!("title"))]);
        let executor = FallbackExecutor::new(catalog.clone(), FallbackExecutorConfig::default());

        executor.render(&chain, &context(), &items(1)).await.unwrap();

        let instantiated = catalog.instantiated();
        assert_eq!(instantiated.len(), 1);
        assert_eq!(instantiated[0].settings.get("field"), Some(&json!("title")));
    }

    #[tokio::test]
    async fn test_malformed_positions_rejected() {
        let catalog = MockRendererCatalog::new()
            .with_renderer(definition("a"), Arc::new(MockRenderer::new("a")));
        let chain = Chain::new(vec![descriptor("a", 0)]);
        let items = vec![Item::new(1, json!("x"))];

        let result = executor(catalog).render(&chain, &context(), &items).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_no_items_invokes_nothing() {
        let a = MockRenderer::new("a");
        let log = a.log();
        let catalog = MockRendererCatalog::new().with_renderer(definition("a"), Arc::new(a));
        let chain = Chain::new(vec![descriptor("a", 0)]);

        let result = executor(catalog).render(&chain, &context(), &[]).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(log.call_count(), 0);
    }
}
