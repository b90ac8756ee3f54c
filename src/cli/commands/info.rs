//! `osprobe info` — service catalog listing.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use comfy_table::Table;

use crate::services::InfoReporter;

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the platform spec file (YAML)
    #[arg(long, short)]
    pub spec: PathBuf,
}

pub async fn execute(args: InfoArgs, config: Option<PathBuf>, json: bool) -> Result<()> {
    let config = super::load_config(config.as_deref())?;
    let data = super::load_platform(&args.spec, &config)?;

    let reporter = InfoReporter::new(super::connector());
    let info = reporter.info(&data).await.map_err(anyhow::Error::new)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Type", "Name"]);
        for service in &info.info.services {
            table.add_row(vec![
                service.service_type.clone(),
                service.name.clone().unwrap_or_default(),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}
