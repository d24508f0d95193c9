//! Chain command - shows the resolved chain and configuration diagnostics

use clap::Args;

use super::{RecordArgs, Session};
use crate::domain::chain::{ChainBuilder, ChainFilter};

/// Arguments for the chain command
#[derive(Args, Clone, Debug)]
pub struct ChainArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Include disabled renderers
    #[arg(long)]
    pub all: bool,
}

/// Run the chain command
pub async fn run(args: ChainArgs) -> anyhow::Result<()> {
    let session = Session::open(&args.record)?;
    let context = session.record.context();

    let chain = ChainBuilder::resolve(
        context,
        &session.stored,
        &*session.catalog,
        ChainFilter::from_show_all(args.all),
    );

    if chain.is_empty() {
        println!("No renderers in chain.");
    }

    for descriptor in &chain {
        println!(
            "{:>4}  {:<16} {:<20} {}",
            descriptor.weight,
            descriptor.id.as_str(),
            descriptor.label,
            if descriptor.enabled { "enabled" } else { "disabled" }
        );
    }

    for mismatch in ChainBuilder::diagnose(context, &session.stored, &*session.catalog) {
        eprintln!("warning: {}", mismatch);
    }

    Ok(())
}
