//! # cbrng: Counter-Based Random Number Generation
//!
//! A counter-based generator produces output by encrypting a counter under a
//! key. The whole state is `(key, counter)`, so any position in the stream can
//! be reached in constant time and independent streams are just distinct keys.
//!
//! This crate provides:
//!
//! - **[`Threefry`]**: the Threefry block mixer over 2 or 4 words of 32 or 64
//!   bits, with a compile-time round count (default 20)
//! - **[`CounterEngine`]**: a buffered scalar stream over any [`BlockMixer`],
//!   with skip-ahead, reseeding, snapshots and child-stream derivation
//! - **[`RandomEngine`] / [`DeriveStream`]**: the generic contract parallel
//!   code depends on, plus [`derive_stream`] to mint per-worker streams
//! - **`rand` interop**: every engine is a `rand::RngCore`, and each Threefry
//!   shape is `rand::SeedableRng`
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │  RandomEngine + DeriveStream       │  generic consumers
//! └─────────────────┬──────────────────┘
//!                   │
//! ┌─────────────────┴──────────────────┐
//! │  CounterEngine<M, N>               │
//! │    counter ──increment──┐          │
//! │                         ▼          │
//! │    buffer = M::mix(key, counter)   │
//! │    generate() drains buffer[elem]  │
//! └─────────────────┬──────────────────┘
//!                   │
//! ┌─────────────────┴──────────────────┐
//! │  BlockMixer<N>: Threefry<W, N, R>  │
//! └────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use cbrng::{DefaultEngine, derive_stream};
//!
//! let root = DefaultEngine::from_scalar(12345);
//! let mut worker = derive_stream(&root, 3);
//!
//! let mut replay = worker.clone();
//! replay.skip(1000);
//! for _ in 0..1000 {
//!     worker.generate();
//! }
//! assert_eq!(worker, replay);
//! ```

pub mod counter;
mod derive;
mod engine;
mod error;
mod mixer;
mod rng;
mod seed;
mod state;
pub mod threefry;
mod word;

pub use derive::{DeriveStream, RandomEngine, derive_stream, derive_streams};
pub use engine::{
    CounterEngine, DefaultEngine, Threefry2x32Engine, Threefry2x64Engine, Threefry4x32Engine,
    Threefry4x64Engine,
};
pub use error::{CbrngError, Result};
pub use mixer::BlockMixer;
pub use seed::{RngSeedSource, SeedSeq, SeedSequence};
pub use state::EngineState;
pub use threefry::{
    DEFAULT_ROUNDS, Threefry, Threefry2x32, Threefry2x32R13, Threefry2x64, Threefry4x32,
    Threefry4x64, Threefry4x64R13, ThreefryDefault,
};
pub use word::Word;

#[cfg(test)]
mod tests;

// Kani verification harnesses for bounded model checking
#[cfg(kani)]
mod kani_proofs;
