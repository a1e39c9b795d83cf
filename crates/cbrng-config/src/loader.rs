//! Configuration loader with multi-source merging

use crate::{CbrngConfig, Paths};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
    env_vars: Option<config::Map<String, String>>,
    user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "CBRNG".to_string(),
            env_vars: None,
            user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "CBRNG")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read environment overrides from `vars` instead of the process environment
    pub fn with_env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Skip ~/.config/cbrng/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.user_config = false;
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<CbrngConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = CbrngConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/cbrng/config.toml)
        if self.user_config {
            if let Ok(user_config_file) = Paths::new().user_config_file() {
                if user_config_file.exists() {
                    tracing::debug!(path = %user_config_file.display(), "loading user config");
                    builder = builder.add_source(
                        config::File::from(user_config_file)
                            .required(false)
                            .format(config::FileFormat::Toml),
                    );
                }
            }
        }

        // 3. Project config (cbrng.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            tracing::debug!(path = %project_config_file.display(), "loading project config");
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Local config (cbrng.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            tracing::debug!(path = %local_config_file.display(), "loading local config");
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (CBRNG_*), CBRNG_DERIVE_KEYS=1,2,3 is a list
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("_")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("derive.keys")
                .source(self.env_vars.clone()),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        let mut cbrng_config: CbrngConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        cbrng_config
            .validate()
            .context("Configuration failed validation")?;

        // Resolve relative paths
        cbrng_config.resolve_paths(&self.project_dir);

        Ok(cbrng_config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> CbrngConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
