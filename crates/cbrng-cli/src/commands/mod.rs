//! CLI command implementations.

pub mod config;
pub mod derive;
pub mod generate;
pub mod output;
pub mod state;
pub mod vectors;
pub mod version;

use std::path::Path;

use anyhow::{Context, Result};
use cbrng::Word;
use cbrng_config::{CbrngConfig, ConfigLoader};
use cbrng_mapper::{MapperWord, RandomEngineMapper};

use crate::StreamArgs;

/// Loads the merged configuration of a project directory.
pub fn load(project: &Path) -> Result<CbrngConfig> {
    ConfigLoader::new()
        .with_project_dir(project)
        .load()
        .with_context(|| format!("Failed to load configuration from {}", project.display()))
}

/// Loads the project configuration and applies flag overrides.
pub fn resolve(args: &StreamArgs) -> Result<CbrngConfig> {
    let mut config = load(&args.project)?;

    if let Some(kind) = args.kind {
        config.engine.kind = kind;
    }
    if let Some(seed) = args.seed {
        config.engine.seed = seed;
    }
    if let Some(count) = args.count {
        config.output.count = count;
    }
    if let Some(skip) = args.skip {
        config.output.skip = skip;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    config.validate()?;
    tracing::debug!(
        kind = %config.engine.kind,
        seed = config.engine.seed,
        skip = config.output.skip,
        "resolved stream settings"
    );
    Ok(config)
}

/// Narrows a validated configuration value to the engine's word.
pub fn word<W: Word>(value: u64) -> W {
    W::from_u128_truncating(u128::from(value))
}

/// Builds the configured root engine, seeded and skipped.
pub fn root_engine<W: MapperWord>(config: &CbrngConfig) -> Result<RandomEngineMapper<W>> {
    let mut engine = RandomEngineMapper::with_seed(config.engine.kind, word(config.engine.seed))?;
    engine.skip(u128::from(config.output.skip));
    Ok(engine)
}

/// Calls `f::<u32>` or `f::<u64>` to match the word width of `kind`.
macro_rules! dispatch_word {
    ($kind:expr, $f:ident ( $($arg:expr),* )) => {
        match $kind.word_bits() {
            32 => $f::<u32>($($arg),*),
            _ => $f::<u64>($($arg),*),
        }
    };
}

pub(crate) use dispatch_word;
