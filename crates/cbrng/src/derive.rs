//! The generator contract and the stream-derivation customization point.
//!
//! Parallel code should depend on these traits rather than on a concrete
//! engine. A coordinator mints one child stream per worker with
//! [`derive_stream`] and hands each child to exactly one worker:
//!
//! ```text
//! root (seed 12345)
//!   ├─> derive_stream(&root, 0)  -> worker 0
//!   ├─> derive_stream(&root, 1)  -> worker 1
//!   └─> derive_stream(&root, 2)  -> worker 2
//! ```
//!
//! Children share no state with the root or with each other, so workers
//! advance them without locks or atomics.

use crate::word::Word;

/// A full-range generator producing one [`Word`] per call.
///
/// Use generic parameters (`<E: RandomEngine>`) in hot paths. The mapper crate
/// provides the type-erased alternative.
pub trait RandomEngine {
    /// The word type produced by [`RandomEngine::generate`].
    type Result: Word;

    /// Smallest value ever produced.
    const MIN: Self::Result;
    /// Largest value ever produced.
    const MAX: Self::Result;

    /// Produces the next value.
    fn generate(&mut self) -> Self::Result;

    /// Resets to the default seed.
    fn seed_default(&mut self);

    /// Resets to the given scalar seed.
    fn seed_scalar(&mut self, seed: Self::Result);

    #[inline]
    fn min() -> Self::Result
    where
        Self: Sized,
    {
        Self::MIN
    }

    #[inline]
    fn max() -> Self::Result
    where
        Self: Sized,
    {
        Self::MAX
    }
}

/// Engines that can mint decorrelated child streams.
///
/// Derivation must be a deterministic function of the engine's observable
/// state and `key`, must not mutate `self`, and must yield unrelated streams
/// for distinct keys.
pub trait DeriveStream: Sized {
    /// The derivation key type.
    type Key;

    fn derive_stream(&self, key: Self::Key) -> Self;
}

/// Derives a child stream of `engine` keyed by `key`.
#[inline]
pub fn derive_stream<E: DeriveStream>(engine: &E, key: E::Key) -> E {
    engine.derive_stream(key)
}

/// Derives one child stream per key, in key order.
pub fn derive_streams<E, I>(engine: &E, keys: I) -> Vec<E>
where
    E: DeriveStream,
    I: IntoIterator<Item = E::Key>,
{
    keys.into_iter().map(|key| engine.derive_stream(key)).collect()
}
