//! Persisted engine state commands.
//!
//! A state file is the postcard encoding of the engine kind followed by the
//! engine's `(counter, key, elem)` snapshot.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cbrng::EngineState;
use cbrng_config::{CbrngConfig, OutputConfig};
use cbrng_mapper::{EngineKind, MapperWord, RandomEngineMapper};
use serde::Serialize;

use super::output::write_words;
use super::{dispatch_word, load, resolve, root_engine};
use crate::{ResumeArgs, StreamArgs};

/// Builds the configured engine and writes its state.
pub fn save(args: &StreamArgs, path: Option<PathBuf>) -> Result<()> {
    let config = resolve(args)?;
    let path = path.unwrap_or_else(|| config.state.path.clone());
    dispatch_word!(config.engine.kind, save_root(&config, &path))
}

fn save_root<W: MapperWord>(config: &CbrngConfig, path: &Path) -> Result<()> {
    let engine = root_engine::<W>(config)?;
    write_state(path, &engine)?;
    println!("Saved {} state to {}", engine.kind(), path.display());
    Ok(())
}

/// Prints a saved state as JSON.
pub fn show(project: &Path, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => load(project)?.state.path,
    };

    let bytes = read_bytes(&path)?;
    let (kind, rest) = split_kind(&bytes)?;
    dispatch_word!(kind, print_state(kind, rest))
}

#[derive(Serialize)]
struct ShownState<W> {
    kind: EngineKind,
    #[serde(flatten)]
    state: EngineState<W>,
}

fn print_state<W: MapperWord>(kind: EngineKind, bytes: &[u8]) -> Result<()> {
    let state = EngineState::<W>::from_bytes(bytes).context("Corrupt state file")?;
    let json = serde_json::to_string_pretty(&ShownState { kind, state })?;
    println!("{json}");
    Ok(())
}

/// Resumes a saved engine, prints words, and writes the advanced state back.
///
/// The engine comes from the state file alone; only output settings are
/// taken from the configuration and flags.
pub fn next(args: &ResumeArgs, path: Option<PathBuf>) -> Result<()> {
    let config = load(&args.project)?;
    let path = path.unwrap_or(config.state.path);

    let mut output = config.output;
    if let Some(count) = args.count {
        output.count = count;
    }
    if let Some(format) = args.format {
        output.format = format;
    }

    let bytes = read_bytes(&path)?;
    let (kind, rest) = split_kind(&bytes)?;
    tracing::debug!(%kind, path = %path.display(), "resuming saved engine");
    dispatch_word!(kind, resume(kind, rest, &output, &path))
}

fn resume<W: MapperWord>(
    kind: EngineKind,
    bytes: &[u8],
    output: &OutputConfig,
    path: &Path,
) -> Result<()> {
    let state = EngineState::<W>::from_bytes(bytes).context("Corrupt state file")?;
    let mut engine = RandomEngineMapper::<W>::restore(kind, &state)?;

    let words: Vec<W> = (0..output.count).map(|_| engine.generate()).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_words(&mut out, &words, output.format)?;
    out.flush()?;

    write_state(path, &engine)
}

fn write_state<W: MapperWord>(path: &Path, engine: &RandomEngineMapper<W>) -> Result<()> {
    let mut bytes = postcard::to_allocvec(&engine.kind())?;
    bytes.extend(engine.snapshot().to_bytes()?);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote engine state");
    Ok(())
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read state file {}", path.display()))
}

fn split_kind(bytes: &[u8]) -> Result<(EngineKind, &[u8])> {
    postcard::take_from_bytes::<EngineKind>(bytes).context("Corrupt state file header")
}
