//! Engine selection tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapperError;

/// The concrete engines a mapper can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Threefry2x32,
    Threefry4x32,
    Threefry2x64,
    Threefry4x64,
}

impl EngineKind {
    pub const ALL: [EngineKind; 4] = [
        EngineKind::Threefry2x32,
        EngineKind::Threefry4x32,
        EngineKind::Threefry2x64,
        EngineKind::Threefry4x64,
    ];

    /// Width of the words the engine produces.
    pub const fn word_bits(self) -> u32 {
        match self {
            EngineKind::Threefry2x32 | EngineKind::Threefry4x32 => 32,
            EngineKind::Threefry2x64 | EngineKind::Threefry4x64 => 64,
        }
    }

    /// Number of words per mixed block.
    pub const fn lanes(self) -> usize {
        match self {
            EngineKind::Threefry2x32 | EngineKind::Threefry2x64 => 2,
            EngineKind::Threefry4x32 | EngineKind::Threefry4x64 => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EngineKind::Threefry2x32 => "threefry2x32",
            EngineKind::Threefry4x32 => "threefry4x32",
            EngineKind::Threefry2x64 => "threefry2x64",
            EngineKind::Threefry4x64 => "threefry4x64",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EngineKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MapperError::UnknownKind(s.to_string()))
    }
}
