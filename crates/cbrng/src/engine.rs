//! The counter engine: a buffered scalar stream over a block mixer.
//!
//! State is `(key, counter, elem)` plus the block `v = mix(key, counter)`
//! buffered from the last refill. `elem` counts the words of `v` not yet
//! handed out; they are served from the high index down.
//!
//! ```text
//! generate():  elem == 0 ? (counter += 1; v = mix(counter); elem = N)
//!              elem -= 1; return v[elem]
//! ```
//!
//! The counter is a little-endian multi-word integer that wraps after
//! `2^(N * W::BITS)` blocks, so the stream has no terminal state.

use std::fmt;

use crate::counter;
use crate::derive::{DeriveStream, RandomEngine};
use crate::error::{CbrngError, Result};
use crate::mixer::BlockMixer;
use crate::seed::{SeedSequence, key_from_sequence};
use crate::state::EngineState;
use crate::threefry::{Threefry2x32, Threefry2x64, Threefry4x32, Threefry4x64, ThreefryDefault};
use crate::word::Word;

/// A counter-based random engine over an `N`-word block mixer.
#[derive(Debug, Clone)]
pub struct CounterEngine<M, const N: usize>
where
    M: BlockMixer<N>,
{
    mixer: M,
    counter: [M::Word; N],
    buffer: [M::Word; N],
    elem: usize,
}

pub type Threefry2x32Engine = CounterEngine<Threefry2x32, 2>;
pub type Threefry4x32Engine = CounterEngine<Threefry4x32, 4>;
pub type Threefry2x64Engine = CounterEngine<Threefry2x64, 2>;
pub type Threefry4x64Engine = CounterEngine<Threefry4x64, 4>;

/// The engine to reach for by default: Threefry 4x64, 20 rounds.
pub type DefaultEngine = CounterEngine<ThreefryDefault, 4>;

impl<M, const N: usize> CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    /// Smallest value the engine produces.
    pub const MIN: M::Word = <M::Word as Word>::ZERO;
    /// Largest value the engine produces.
    pub const MAX: M::Word = <M::Word as Word>::MAX;

    /// Creates an engine with the all-zero key.
    pub fn new() -> Self {
        Self::with_key([<M::Word as Word>::ZERO; N])
    }

    /// Creates an engine with an explicit key.
    pub fn with_key(key: [M::Word; N]) -> Self {
        Self {
            mixer: M::from_key(key),
            counter: [<M::Word as Word>::ZERO; N],
            buffer: [<M::Word as Word>::ZERO; N],
            elem: 0,
        }
    }

    /// Creates an engine whose key words all equal `seed`.
    pub fn from_scalar(seed: M::Word) -> Self {
        Self::with_key([seed; N])
    }

    /// Creates an engine whose key is filled from `seq`.
    pub fn from_seed_sequence<S: SeedSequence + ?Sized>(seq: &mut S) -> Self {
        Self::with_key(key_from_sequence(seq))
    }

    /// Resets to the all-zero key.
    pub fn seed_default(&mut self) {
        self.seed_key([<M::Word as Word>::ZERO; N]);
    }

    /// Resets to a key whose words all equal `seed`.
    pub fn seed_scalar(&mut self, seed: M::Word) {
        self.seed_key([seed; N]);
    }

    /// Resets to an explicit key.
    ///
    /// Every other `seed_*` method lands here.
    pub fn seed_key(&mut self, key: [M::Word; N]) {
        tracing::trace!(lanes = N, "reseeding counter engine");
        *self = Self::with_key(key);
    }

    /// Resets to a key filled from `seq`.
    pub fn seed_sequence<S: SeedSequence + ?Sized>(&mut self, seq: &mut S) {
        self.seed_key(key_from_sequence(seq));
    }

    pub const fn min() -> M::Word {
        Self::MIN
    }

    pub const fn max() -> M::Word {
        Self::MAX
    }

    /// Returns the next word of the stream.
    ///
    /// Words of a freshly mixed block come out highest index first.
    #[inline]
    pub fn generate(&mut self) -> M::Word {
        if self.elem == 0 {
            self.refill();
        }
        self.elem -= 1;
        self.buffer[self.elem]
    }

    /// Advances to the next counter and returns its whole block.
    ///
    /// Any words still buffered are dropped.
    pub fn generate_block(&mut self) -> [M::Word; N] {
        counter::increment(&mut self.counter);
        self.buffer = self.mixer.mix(&self.counter);
        self.elem = 0;
        self.buffer
    }

    /// Discards the next `n` words without producing them.
    ///
    /// Leaves the engine exactly where `n` calls to [`CounterEngine::generate`]
    /// would, at the cost of at most `N - 1` mixer calls.
    pub fn skip(&mut self, n: u128) {
        let buffered = n.min(self.elem as u128);
        self.elem -= buffered as usize;
        let remaining = n - buffered;

        let lanes = N as u128;
        counter::advance(&mut self.counter, remaining / lanes);
        for _ in 0..remaining % lanes {
            self.generate();
        }
    }

    /// Mints an independent engine from this one's position and `key`.
    ///
    /// One word is drawn from a private copy (refilling only if its buffer is
    /// empty), the copy's block is rotated left by this engine's `elem`, and
    /// that block is mixed under `key`. The result seeds the child, whose
    /// counter and buffer start empty. `self` is left untouched.
    ///
    /// This leans on the mixer being one-way: the child key reveals nothing
    /// about the parent key. That is adequate for simulation streams, not a
    /// cryptographic guarantee.
    pub fn derivate(&self, key: [M::Word; N]) -> Self {
        let mut child = self.clone();
        child.generate();

        let mut block = child.buffer;
        block.rotate_left(self.elem);

        child.mixer.set_key(key);
        let fresh = child.mixer.mix(&block);
        child.seed_key(fresh);

        tracing::trace!(elem = self.elem, "derived counter engine");
        child
    }

    /// Same as [`CounterEngine::derivate`] with `key` broadcast to every word.
    pub fn derivate_scalar(&self, key: M::Word) -> Self {
        self.derivate([key; N])
    }

    /// Mixes an arbitrary counter under this engine's key.
    pub fn mix_at(&self, counter: &[M::Word; N]) -> [M::Word; N] {
        self.mixer.mix(counter)
    }

    pub fn key(&self) -> [M::Word; N] {
        self.mixer.key()
    }

    /// The counter of the most recently mixed block.
    pub fn counter(&self) -> [M::Word; N] {
        self.counter
    }

    /// Number of words of the current block not yet handed out.
    pub fn buffered(&self) -> usize {
        self.elem
    }

    pub fn mixer(&self) -> &M {
        &self.mixer
    }

    /// Captures `(counter, key, elem)`.
    pub fn snapshot(&self) -> EngineState<M::Word> {
        EngineState {
            counter: self.counter.to_vec(),
            key: self.key().to_vec(),
            elem: self.elem,
        }
    }

    /// Rebuilds an engine from a snapshot.
    ///
    /// The buffered block is recomputed from the key and counter.
    pub fn restore(state: &EngineState<M::Word>) -> Result<Self> {
        let counter = lanes(&state.counter, "counter")?;
        let key = lanes(&state.key, "key")?;
        if state.elem > N {
            return Err(CbrngError::CursorOutOfRange {
                elem: state.elem,
                lanes: N,
            });
        }

        let mixer = M::from_key(key);
        let buffer = if state.elem > 0 {
            mixer.mix(&counter)
        } else {
            [<M::Word as Word>::ZERO; N]
        };

        tracing::debug!(lanes = N, elem = state.elem, "restored counter engine");
        Ok(Self {
            mixer,
            counter,
            buffer,
            elem: state.elem,
        })
    }
}

fn lanes<W: Word, const N: usize>(words: &[W], field: &'static str) -> Result<[W; N]> {
    words.try_into().map_err(|_| CbrngError::LaneMismatch {
        field,
        expected: N,
        actual: words.len(),
    })
}

impl<M, const N: usize> Default for CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M, const N: usize> PartialEq for CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    fn eq(&self, other: &Self) -> bool {
        self.counter == other.counter && self.elem == other.elem && self.mixer == other.mixer
    }
}

impl<M, const N: usize> Eq for CounterEngine<M, N> where M: BlockMixer<N> {}

impl<M, const N: usize> fmt::Display for CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("counter=")?;
        write_words(f, &self.counter)?;
        f.write_str(" key=")?;
        write_words(f, &self.key())?;
        write!(f, " elem={}", self.elem)
    }
}

fn write_words<W: Word>(f: &mut fmt::Formatter<'_>, words: &[W]) -> fmt::Result {
    let width = (W::BITS / 4) as usize;
    f.write_str("[")?;
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{word:0width$x}")?;
    }
    f.write_str("]")
}

impl<M, const N: usize> RandomEngine for CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    type Result = M::Word;

    const MIN: M::Word = <M::Word as Word>::ZERO;
    const MAX: M::Word = <M::Word as Word>::MAX;

    #[inline]
    fn generate(&mut self) -> M::Word {
        CounterEngine::generate(self)
    }

    fn seed_default(&mut self) {
        CounterEngine::seed_default(self);
    }

    fn seed_scalar(&mut self, seed: M::Word) {
        CounterEngine::seed_scalar(self, seed);
    }
}

impl<M, const N: usize> DeriveStream for CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    type Key = M::Word;

    fn derive_stream(&self, key: M::Word) -> Self {
        self.derivate_scalar(key)
    }
}

impl<M, const N: usize> CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    #[inline]
    fn refill(&mut self) {
        counter::increment(&mut self.counter);
        self.buffer = self.mixer.mix(&self.counter);
        self.elem = N;
    }
}
