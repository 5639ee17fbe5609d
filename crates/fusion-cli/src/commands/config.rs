use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fusion_core::registration::config::RegistrationConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write parameters to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save an example RegistrationConfig as JSON.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let json = serde_json::to_string_pretty(&RegistrationConfig::example())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write parameters to {}", path.display()))?;
        println!("Example parameters saved to {}", path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
