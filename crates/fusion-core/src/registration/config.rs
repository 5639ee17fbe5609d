use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_POOL_SIZE;
use crate::error::{FusionError, Result};
use crate::transform::TransformType;

/// Connection parameters of the Render web service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConnection {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub owner: String,
    pub project: String,
    /// Location of Render's Java client scripts. Accepted for compatibility
    /// with existing parameter files; all mapping goes through the web service.
    #[serde(default)]
    pub client_scripts: Option<String>,
}

/// Parameters of one stack-to-stack registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    pub render: RenderConnection,
    /// Fixed reference stack.
    pub stack_a: String,
    /// Moving stack registered onto `stack_a`.
    pub stack_b: String,
    #[serde(default)]
    pub transform_type: TransformType,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    #[serde(default)]
    pub output_json: Option<PathBuf>,
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

impl RegistrationConfig {
    /// Load a parameters file: TOML for a `.toml` extension, JSON otherwise.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(serde_json::from_str(&contents)?)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stack_a.is_empty() || self.stack_b.is_empty() {
            return Err(FusionError::Config(
                "stack_a and stack_b must be non-empty".into(),
            ));
        }
        if self.pool_size == 0 {
            return Err(FusionError::Config("pool_size must be at least 1".into()));
        }
        self.output_path()?;
        Ok(())
    }

    pub fn output_path(&self) -> Result<&Path> {
        self.output_json
            .as_deref()
            .ok_or_else(|| FusionError::Config("output_json is required".into()))
    }

    /// A complete parameter set with placeholder values.
    pub fn example() -> Self {
        Self {
            render: RenderConnection {
                host: "em-131fs".into(),
                port: Some(8080),
                owner: "testuser".into(),
                project: "test".into(),
                client_scripts: Some(String::new()),
            },
            stack_a: "PARENTSTACK".into(),
            stack_b: "CHILDSTACK".into(),
            transform_type: TransformType::Rigid,
            pool_size: 12,
            output_json: Some(PathBuf::from("registration_transform.json")),
        }
    }
}
