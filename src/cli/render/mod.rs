//! Render command - runs a record through its fallback chain

use clap::Args;
use serde::Serialize;
use tracing::info;

use super::{RecordArgs, Session};
use crate::domain::chain::{
    ChainBuilder, ChainFilter, FallbackExecutor, FallbackExecutorConfig, RenderOutcome,
};
use crate::domain::record::Position;

/// Arguments for the render command
#[derive(Args, Clone, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Use every applicable renderer, enabled or not (preview)
    #[arg(long)]
    pub all: bool,

    /// Print the full render report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RenderReport<'a> {
    #[serde(flatten)]
    outcome: &'a RenderOutcome,
    uncovered: Vec<Position>,
}

/// Run the render command
pub async fn run(args: RenderArgs) -> anyhow::Result<()> {
    let session = Session::open(&args.record)?;
    let context = session.record.context();

    let chain = ChainBuilder::resolve(
        context,
        &session.stored,
        &*session.catalog,
        ChainFilter::from_show_all(args.all),
    );

    info!(
        record_type = %context.record_type(),
        renderers = chain.len(),
        items = session.record.len(),
        "Rendering record"
    );

    let executor = FallbackExecutor::new(
        session.catalog.clone(),
        FallbackExecutorConfig {
            collect_metrics: session.config.renderer.collect_metrics,
        },
    );

    let outcome = executor
        .render_detailed(&chain, context, session.record.items())
        .await?;
    let uncovered = outcome.result.uncovered(session.record.len());

    if args.json {
        let report = RenderReport {
            outcome: &outcome,
            uncovered,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (position, item) in outcome.result.iter() {
        println!("{}: {}", position, item.output.markup);
    }

    if !uncovered.is_empty() {
        let positions: Vec<String> = uncovered.iter().map(ToString::to_string).collect();
        eprintln!("warning: no renderer produced output for position(s) {}", positions.join(", "));
    }

    Ok(())
}
