//! Generate command implementation.

use std::io::{self, Write};

use anyhow::Result;
use cbrng_config::CbrngConfig;
use cbrng_mapper::MapperWord;

use super::output::write_words;
use super::{dispatch_word, resolve, root_engine};
use crate::StreamArgs;

pub fn run(args: &StreamArgs) -> Result<()> {
    let config = resolve(args)?;
    dispatch_word!(config.engine.kind, emit(&config))
}

fn emit<W: MapperWord>(config: &CbrngConfig) -> Result<()> {
    let mut engine = root_engine::<W>(config)?;
    let words: Vec<W> = (0..config.output.count).map(|_| engine.generate()).collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_words(&mut out, &words, config.output.format)?;
    out.flush()?;
    Ok(())
}
