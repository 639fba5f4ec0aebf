//! Bikeshare CLI binary.

use anyhow::Result;
use bikeshare::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the bikeshare CLI.
fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=bikeshare=debug cargo run
    // Logs go to stderr so they never interleave with prompts on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bikeshare=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting bikeshare CLI");

    let cli = Cli::parse_args();
    cli.execute()?;

    tracing::debug!("Bikeshare CLI completed successfully");
    Ok(())
}
