//! `osprobe env` — build a spec from the process environment.

use anyhow::Result;
use clap::Args;

use crate::services::spec_from_env;

#[derive(Args)]
pub struct EnvArgs {
    /// Print the spec as YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

pub async fn execute(args: EnvArgs, json: bool) -> Result<()> {
    let vars: std::collections::HashMap<String, String> = std::env::vars().collect();
    let discovery = spec_from_env(&vars);

    if json {
        println!("{}", serde_json::to_string_pretty(&discovery)?);
    } else if let Some(ref spec) = discovery.spec {
        if args.yaml {
            println!("{}", serde_yaml::to_string(spec)?);
        } else {
            println!("{}", serde_json::to_string_pretty(spec)?);
        }
    } else {
        println!("{}", discovery.message);
    }

    if !discovery.available {
        std::process::exit(1);
    }
    Ok(())
}
