//! Configuration commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use cbrng_config::CbrngConfig;

/// Show the effective configuration after all sources are merged.
pub fn show(project: &Path, format: &str) -> Result<()> {
    let config = CbrngConfig::load_from_dir(project).context("Failed to load configuration")?;

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        "toml" => {
            print!("{}", config.to_toml()?);
        }
        other => bail!("Unknown format '{other}'. Use toml or json."),
    }

    Ok(())
}
