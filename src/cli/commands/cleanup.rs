//! `osprobe cleanup` — resource cleanup stub.

use anyhow::Result;
use clap::Args;

use crate::domain::models::CleanupReport;

#[derive(Args)]
pub struct CleanupArgs {}

pub async fn execute(_args: CleanupArgs, json: bool) -> Result<()> {
    let report = CleanupReport::not_implemented();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.message);
    }
    Ok(())
}
