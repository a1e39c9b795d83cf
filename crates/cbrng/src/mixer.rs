//! The block-mixing seam the counter engine is generic over.

use std::fmt::Debug;

use crate::word::Word;

/// A keyed, stateless transform from an `N`-word counter to an `N`-word block.
///
/// Implementations own nothing but their key. Two mixers with equal keys are
/// interchangeable, so equality must be key equality.
///
/// `mix` must be a pure function of `(key, counter)`: the counter engine relies
/// on being able to recompute any block from those two values alone.
pub trait BlockMixer<const N: usize>: Clone + Debug + PartialEq + Eq + Send + Sync {
    /// The word type of keys, counters and blocks.
    type Word: Word;

    /// Builds a mixer keyed with `key`.
    fn from_key(key: [Self::Word; N]) -> Self;

    /// Returns the current key.
    fn key(&self) -> [Self::Word; N];

    /// Replaces the key.
    fn set_key(&mut self, key: [Self::Word; N]);

    /// Mixes `counter` under the current key.
    fn mix(&self, counter: &[Self::Word; N]) -> [Self::Word; N];
}
