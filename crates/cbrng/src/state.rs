//! Persisted engine state.
//!
//! An engine is fully described by `(counter, key, elem)`: the buffered block
//! is always `mix(key, counter)` whenever `elem > 0`, so it is recomputed on
//! restore rather than stored. Words keep engine order (index 0 is the least
//! significant counter word).

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::word::Word;

/// A snapshot of a counter engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineState<W> {
    pub counter: Vec<W>,
    pub key: Vec<W>,
    /// Number of unconsumed words left in the current block.
    pub elem: usize,
}

impl<W: Word> EngineState<W> {
    /// Encodes the snapshot with postcard.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decodes a snapshot produced by [`EngineState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
