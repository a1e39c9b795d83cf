//! Derive command implementation.

use std::io::{self, Write};

use anyhow::{Result, bail};
use cbrng::derive_streams;
use cbrng_config::CbrngConfig;
use cbrng_mapper::MapperWord;

use super::output::{DerivedStream, write_streams};
use super::{dispatch_word, resolve, root_engine, word};
use crate::StreamArgs;

/// Derives one child per key from the configured root engine.
///
/// Keys given on the command line replace `derive.keys` from the
/// configuration.
pub fn run(args: &StreamArgs, keys: &[u64]) -> Result<()> {
    let mut config = resolve(args)?;
    if !keys.is_empty() {
        config.derive.keys = keys.to_vec();
        config.validate()?;
    }
    if config.derive.keys.is_empty() {
        bail!("No derivation keys. Pass --keys or set derive.keys in cbrng.toml.");
    }

    dispatch_word!(config.engine.kind, emit(&config))
}

fn emit<W: MapperWord>(config: &CbrngConfig) -> Result<()> {
    let root = root_engine::<W>(config)?;
    let children = derive_streams(&root, config.derive.keys.iter().map(|&key| word::<W>(key)));
    tracing::info!(
        kind = %config.engine.kind,
        streams = children.len(),
        "derived child streams"
    );

    let values: Vec<Vec<W>> = children
        .into_iter()
        .map(|mut child| (0..config.output.count).map(|_| child.generate()).collect())
        .collect();
    let streams: Vec<DerivedStream<'_, W>> = config
        .derive
        .keys
        .iter()
        .zip(&values)
        .map(|(&key, values)| DerivedStream { key, values })
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_streams(&mut out, &streams, config.output.format)?;
    out.flush()?;
    Ok(())
}
