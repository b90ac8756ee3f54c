//! Command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

/// Credential normalizer and health checker for OpenStack-compatible clouds.
#[derive(Parser)]
#[command(name = "osprobe", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a configuration file (defaults to osprobe.yaml + OSPROBE_* env)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify that every credential in a spec can authenticate
    Check(commands::check::CheckArgs),
    /// List the services visible to a spec's primary credential
    Info(commands::info::InfoArgs),
    /// Build a credential spec from OS_* environment variables
    Env(commands::env::EnvArgs),
    /// Clean up resources created on the platform (not implemented)
    Cleanup(commands::cleanup::CleanupArgs),
}

/// Print an error and terminate with a failure exit code.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({"error": format!("{err:#}")});
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
