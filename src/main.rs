//! osprobe CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use osprobe::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => {
            osprobe::cli::commands::check::execute(args, cli.config, cli.json).await
        }
        Commands::Info(args) => {
            osprobe::cli::commands::info::execute(args, cli.config, cli.json).await
        }
        Commands::Env(args) => osprobe::cli::commands::env::execute(args, cli.json).await,
        Commands::Cleanup(args) => osprobe::cli::commands::cleanup::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        osprobe::cli::handle_error(err, cli.json);
    }
}
