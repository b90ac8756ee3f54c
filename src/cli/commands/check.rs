//! `osprobe check` — platform health check.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::services::HealthChecker;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the platform spec file (YAML)
    #[arg(long, short)]
    pub spec: PathBuf,
}

pub async fn execute(args: CheckArgs, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = super::load_config(config.as_deref())?;
    let data = super::load_platform(&args.spec, &config)?;

    let checker = HealthChecker::new(super::connector());
    let report = checker.check(&data).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.available {
        println!("Platform is available.");
    } else {
        println!(
            "Platform is not available: {}",
            report.message.as_deref().unwrap_or("unknown reason")
        );
        if let Some(ref traceback) = report.traceback {
            eprintln!("{traceback}");
        }
    }

    if !report.available {
        std::process::exit(1);
    }
    Ok(())
}
