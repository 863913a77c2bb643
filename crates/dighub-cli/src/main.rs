use clap::Parser;
use dighub_cli::{init_tracing, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet, cli.no_color);
    dighub_cli::run(cli).await
}
