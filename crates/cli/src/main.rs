use anyhow::Result;
use clap::Parser;
use pod_testing::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize tracing based on RUST_LOG, defaulting to info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().execute()
}
