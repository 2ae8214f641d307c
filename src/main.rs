use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "advisory-recon")]
#[command(
    about = "Reconciles local .NET advisory records against upstream GitHub advisories and the NVD"
)]
#[command(version)]
struct Cli {
    /// Path to the local advisory-record directory
    #[arg(short, long, global = true, default_value = "cves")]
    records: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile upstream advisories against local records; exits non-zero
    /// when any advisory is unaccounted for
    Check,

    /// Validate that every local record file parses and is complete
    Lint,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Lint) => {
            cli::lint::lint_command(&cli.records).await?;
        }
        // Default: the CI reconciliation check.
        Some(Commands::Check) | None => {
            let report = cli::check::check_command(&cli.records).await?;
            if !report.is_clean() {
                // Drift is the designed failure mode, distinct from the
                // fatal abort paths that surface as errors above.
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
