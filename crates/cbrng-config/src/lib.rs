//! Configuration management for cbrng
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence, applied by the caller)
//! 2. Environment variables (CBRNG_* prefix)
//! 3. cbrng.local.toml (gitignored, local overrides)
//! 4. cbrng.toml (git-tracked, project config)
//! 5. ~/.config/cbrng/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use anyhow::Result;
use cbrng_mapper::EngineKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod error;
mod loader;
mod paths;
mod word;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;
pub use word::parse_word;

/// Main cbrng configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CbrngConfig {
    pub engine: EngineConfig,
    pub derive: DeriveConfig,
    pub output: OutputConfig,
    pub state: StateConfig,
}

/// Which engine to run and how to seed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub kind: EngineKind,
    /// Scalar seed broadcast to every key word. Zero is the default key.
    ///
    /// Accepts an integer or a decimal or `0x` hex string, since TOML
    /// integers stop at `i64::MAX`.
    #[serde(with = "word")]
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::Threefry4x64,
            seed: 0,
        }
    }
}

/// Child streams to derive from the root engine, one per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveConfig {
    #[serde(with = "word::list")]
    pub keys: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Words to print per stream.
    pub count: u64,
    /// Words to discard before printing.
    pub skip: u64,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            count: 8,
            skip: 0,
            format: OutputFormat::Hex,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Zero-padded lowercase hex, one word per line.
    Hex,
    /// Decimal, one word per line.
    Decimal,
    /// A JSON array of numbers.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Hex => "hex",
            OutputFormat::Decimal => "decimal",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(OutputFormat::Hex),
            "decimal" | "dec" => Ok(OutputFormat::Decimal),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::ValidationError(format!(
                "unknown output format: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Where engine snapshots are written and read.
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".cbrng/state.bin"),
        }
    }
}

impl CbrngConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Check values that parse but cannot drive the selected engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bits = self.engine.kind.word_bits();
        if !fits(self.engine.seed, bits) {
            return Err(ConfigError::ValidationError(format!(
                "seed {:#x} does not fit the {bits}-bit words of {}",
                self.engine.seed, self.engine.kind
            )));
        }
        if let Some(key) = self.derive.keys.iter().find(|&&key| !fits(key, bits)) {
            return Err(ConfigError::ValidationError(format!(
                "derive key {key:#x} does not fit the {bits}-bit words of {}",
                self.engine.kind
            )));
        }
        Ok(())
    }

    /// Render as TOML, the format of `cbrng.toml`.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        if self.state.path.is_relative() {
            self.state.path = base.join(&self.state.path);
        }
    }
}

fn fits(value: u64, bits: u32) -> bool {
    bits >= 64 || value >> bits == 0
}
