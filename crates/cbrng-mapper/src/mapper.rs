//! The owned, runtime-selected engine handle.

use cbrng::{DeriveStream, EngineState, RandomEngine};
use rand::{Error, RngCore};

use crate::erased::{ErasedEngine, MappedEngine, MapperWord};
use crate::error::Result;
use crate::kind::EngineKind;

/// One engine, chosen at runtime, behind a uniform interface.
///
/// Every call forwards unchanged to the owned engine. The handle owns its
/// engine exclusively and is deliberately not `Clone`; use
/// [`RandomEngineMapper::derivate`] to obtain another stream.
#[derive(Debug)]
pub struct RandomEngineMapper<W: MapperWord> {
    engine: Box<dyn ErasedEngine<W>>,
}

pub type RandomEngineMapper32 = RandomEngineMapper<u32>;
pub type RandomEngineMapper64 = RandomEngineMapper<u64>;

impl<W: MapperWord> RandomEngineMapper<W> {
    /// Creates a default-seeded engine of `kind`.
    ///
    /// # Errors
    ///
    /// Fails if `kind` does not produce `W`-sized words.
    pub fn new(kind: EngineKind) -> Result<Self> {
        let engine = W::build(kind)?;
        tracing::debug!(%kind, "mapped engine");
        Ok(Self { engine })
    }

    /// Creates an engine of `kind` seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Fails if `kind` does not produce `W`-sized words.
    pub fn with_seed(kind: EngineKind, seed: W) -> Result<Self> {
        let mut mapper = Self::new(kind)?;
        mapper.seed_with(seed);
        Ok(mapper)
    }

    /// Takes ownership of an already configured engine.
    pub fn from_engine<E>(engine: E) -> Self
    where
        E: MappedEngine<Result = W>,
    {
        Self {
            engine: Box::new(engine),
        }
    }

    /// Rebuilds an engine of `kind` from a snapshot.
    ///
    /// # Errors
    ///
    /// Fails on a width mismatch or a snapshot that does not fit `kind`.
    pub fn restore(kind: EngineKind, state: &EngineState<W>) -> Result<Self> {
        Ok(Self {
            engine: W::rebuild(kind, state)?,
        })
    }

    /// Resets the owned engine to its default seed.
    pub fn seed(&mut self) {
        self.engine.seed_default();
    }

    /// Resets the owned engine to `seed`.
    pub fn seed_with(&mut self, seed: W) {
        self.engine.seed_scalar(seed);
    }

    #[inline]
    pub fn generate(&mut self) -> W {
        self.engine.generate()
    }

    /// Discards the next `n` words.
    pub fn skip(&mut self, n: u128) {
        self.engine.skip(n);
    }

    /// Derives a child stream of the owned engine, wrapped in a new mapper.
    #[must_use]
    pub fn derivate(&self, key: W) -> Self {
        Self {
            engine: self.engine.derive_boxed(key),
        }
    }

    pub fn kind(&self) -> EngineKind {
        self.engine.kind()
    }

    pub fn snapshot(&self) -> EngineState<W> {
        self.engine.snapshot()
    }

    pub const fn min() -> W {
        W::ZERO
    }

    pub const fn max() -> W {
        W::MAX
    }
}

impl<W: MapperWord> Default for RandomEngineMapper<W> {
    fn default() -> Self {
        Self {
            engine: W::build_default(),
        }
    }
}

impl<W: MapperWord> RandomEngine for RandomEngineMapper<W> {
    type Result = W;

    const MIN: W = W::ZERO;
    const MAX: W = W::MAX;

    #[inline]
    fn generate(&mut self) -> W {
        RandomEngineMapper::generate(self)
    }

    fn seed_default(&mut self) {
        self.seed();
    }

    fn seed_scalar(&mut self, seed: W) {
        self.seed_with(seed);
    }
}

impl<W: MapperWord> DeriveStream for RandomEngineMapper<W> {
    type Key = W;

    fn derive_stream(&self, key: W) -> Self {
        self.derivate(key)
    }
}

impl<W: MapperWord> RngCore for RandomEngineMapper<W> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.generate().to_u64() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        if W::BITS == 32 {
            let lo = self.generate().to_u64();
            let hi = self.generate().to_u64();
            (hi << 32) | lo
        } else {
            self.generate().to_u64()
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(W::BYTES) {
            self.generate().write_le(chunk);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
