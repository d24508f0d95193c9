//! Summary command - describes the configured chain

use clap::Args;

use super::{RecordArgs, Session};
use crate::domain::summary::SummaryReporter;

/// Arguments for the summary command
#[derive(Args, Clone, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub record: RecordArgs,
}

/// Run the summary command
pub async fn run(args: SummaryArgs) -> anyhow::Result<()> {
    let session = Session::open(&args.record)?;

    let summary =
        SummaryReporter::summarize(session.record.context(), &session.stored, &*session.catalog);

    println!("{}", summary);

    Ok(())
}
