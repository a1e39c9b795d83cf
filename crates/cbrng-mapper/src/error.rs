//! Mapper error types.

use cbrng::CbrngError;

use crate::kind::EngineKind;

/// Errors from selecting or rebuilding an engine at runtime.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// The tag names no known engine.
    #[error("unknown engine kind: {0}")]
    UnknownKind(String),

    /// The engine's word width differs from the mapper's.
    #[error("{kind} produces {kind_bits}-bit words, mapper expects {mapper_bits}-bit")]
    WidthMismatch {
        kind: EngineKind,
        kind_bits: u32,
        mapper_bits: u32,
    },

    /// A persisted state did not fit the selected engine.
    #[error("invalid engine state: {0}")]
    State(#[from] CbrngError),
}

pub type Result<T> = std::result::Result<T, MapperError>;
