//! Word formatting for stream output.

use std::io::Write;

use anyhow::Result;
use cbrng::Word;
use cbrng_config::OutputFormat;
use serde::Serialize;

/// One derived child stream, as rendered in JSON output.
#[derive(Debug, Serialize)]
pub struct DerivedStream<'a, W> {
    pub key: u64,
    pub values: &'a [W],
}

/// Writes `words` one per line, or as a JSON array.
pub fn write_words<W: Word>(out: &mut impl Write, words: &[W], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Hex => {
            let width = (W::BITS / 4) as usize;
            for word in words {
                writeln!(out, "{word:0width$x}")?;
            }
        }
        OutputFormat::Decimal => {
            for word in words {
                writeln!(out, "{word}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, words)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Writes one block per derived stream, or a single JSON array of streams.
pub fn write_streams<W: Word>(
    out: &mut impl Write,
    streams: &[DerivedStream<'_, W>],
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        serde_json::to_writer(&mut *out, streams)?;
        writeln!(out)?;
        return Ok(());
    }

    for stream in streams {
        writeln!(out, "# key {}", stream.key)?;
        write_words(out, stream.values, format)?;
    }
    Ok(())
}
