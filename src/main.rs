use clap::Parser;
use fallback_renderer::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => cli::render::run(args).await,
        Command::Summary(args) => cli::summary::run(args).await,
        Command::Chain(args) => cli::chain::run(args).await,
    }
}
