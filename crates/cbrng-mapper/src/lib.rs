//! # cbrng-mapper: Runtime Engine Selection
//!
//! Lets a caller pick a concrete engine at runtime (from a config file or a
//! command-line flag) and drive it through one owned handle:
//!
//! ```text
//! "threefry4x64" ──parse──> EngineKind ──new──> RandomEngineMapper<u64>
//!                                                   │
//!                                   Box<dyn ErasedEngine<u64>>
//!                                                   │
//!                                      CounterEngine<Threefry4x64, 4>
//! ```
//!
//! The handle is generic over the word it produces, so a 32-bit mapper can
//! only own 32-bit engines. Asking for a mismatched kind is a
//! [`MapperError::WidthMismatch`].
//!
//! Hot loops should prefer the concrete engines from `cbrng`; the mapper
//! pays one virtual call per word.

mod erased;
mod error;
mod kind;
mod mapper;

pub use erased::{ErasedEngine, MappedEngine, MapperWord};
pub use error::{MapperError, Result};
pub use kind::EngineKind;
pub use mapper::{RandomEngineMapper, RandomEngineMapper32, RandomEngineMapper64};
