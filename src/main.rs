use clap::Parser;
use clipsync_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clipsync_lib::run_cli(Cli::parse()).await
}
