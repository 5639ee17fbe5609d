use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use fusion_core::registration::config::RegistrationConfig;
use fusion_core::registration::register_stacks_reported;
use fusion_core::render::RenderClient;
use fusion_core::transform::TransformType;
use tracing::debug;

use crate::progress::BarReporter;
use crate::summary::{print_registration_result, print_registration_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum TransformTypeArg {
    Translation,
    Rigid,
    Similarity,
    Affine,
}

impl From<TransformTypeArg> for TransformType {
    fn from(arg: TransformTypeArg) -> Self {
        match arg {
            TransformTypeArg::Translation => TransformType::Translation,
            TransformTypeArg::Rigid => TransformType::Rigid,
            TransformTypeArg::Similarity => TransformType::Similarity,
            TransformTypeArg::Affine => TransformType::Affine,
        }
    }
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Parameters file (JSON, or TOML with a .toml extension)
    #[arg(long)]
    pub input_json: PathBuf,

    /// Output transform file (overrides output_json)
    #[arg(long)]
    pub output_json: Option<PathBuf>,

    /// Fixed reference stack (overrides stack_a)
    #[arg(long)]
    pub stack_a: Option<String>,

    /// Moving stack (overrides stack_b)
    #[arg(long)]
    pub stack_b: Option<String>,

    /// Transform model to fit (overrides transform_type)
    #[arg(long, value_enum)]
    pub transform_type: Option<TransformTypeArg>,

    /// Worker threads for coordinate batches (overrides pool_size)
    #[arg(long)]
    pub pool_size: Option<usize>,
}

pub fn run(args: &RegisterArgs) -> Result<()> {
    let config = load_config(args)?;
    config.validate().context("Invalid registration parameters")?;

    print_registration_summary(&config);

    let client = RenderClient::new(&config.render).context("Failed to create Render client")?;
    let reporter = Arc::new(BarReporter::new());
    let output = register_stacks_reported(&config, &client, reporter.clone())
        .with_context(|| format!("Failed to register {} onto {}", config.stack_b, config.stack_a))?;
    reporter.finish();

    print_registration_result(&config, &output);
    Ok(())
}

fn load_config(args: &RegisterArgs) -> Result<RegistrationConfig> {
    let mut config = RegistrationConfig::from_path(&args.input_json)
        .with_context(|| format!("Failed to read parameters {}", args.input_json.display()))?;

    if let Some(ref path) = args.output_json {
        config.output_json = Some(path.clone());
    }
    if let Some(ref stack) = args.stack_a {
        config.stack_a = stack.clone();
    }
    if let Some(ref stack) = args.stack_b {
        config.stack_b = stack.clone();
    }
    if let Some(kind) = args.transform_type {
        config.transform_type = kind.into();
    }
    if let Some(pool_size) = args.pool_size {
        config.pool_size = pool_size;
    }
    debug!(path = %args.input_json.display(), "Loaded registration parameters");
    Ok(config)
}
