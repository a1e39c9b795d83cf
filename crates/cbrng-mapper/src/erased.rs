//! The capability boundary between the mapper and concrete engines.
//!
//! [`ErasedEngine`] is the object-safe slice of an engine the mapper needs:
//! generate, seed, skip, derive and snapshot. It is implemented once, for every
//! [`MappedEngine`]; the four Threefry engines are the mapped engines.

use std::fmt::Debug;

use cbrng::{
    DeriveStream, EngineState, RandomEngine, Threefry2x32Engine, Threefry2x64Engine,
    Threefry4x32Engine, Threefry4x64Engine, Word,
};

use crate::error::{MapperError, Result};
use crate::kind::EngineKind;

/// A concrete engine the mapper knows how to own.
pub trait MappedEngine:
    RandomEngine + DeriveStream<Key = <Self as RandomEngine>::Result> + Debug + Send + 'static
{
    /// The tag this engine is selected by.
    const KIND: EngineKind;

    fn skip(&mut self, n: u128);

    fn snapshot(&self) -> EngineState<Self::Result>;

    fn restore(state: &EngineState<Self::Result>) -> cbrng::Result<Self>
    where
        Self: Sized;
}

macro_rules! impl_mapped {
    ($engine:ty, $kind:expr) => {
        impl MappedEngine for $engine {
            const KIND: EngineKind = $kind;

            fn skip(&mut self, n: u128) {
                <$engine>::skip(self, n);
            }

            fn snapshot(&self) -> EngineState<Self::Result> {
                <$engine>::snapshot(self)
            }

            fn restore(state: &EngineState<Self::Result>) -> cbrng::Result<Self> {
                <$engine>::restore(state)
            }
        }
    };
}

impl_mapped!(Threefry2x32Engine, EngineKind::Threefry2x32);
impl_mapped!(Threefry4x32Engine, EngineKind::Threefry4x32);
impl_mapped!(Threefry2x64Engine, EngineKind::Threefry2x64);
impl_mapped!(Threefry4x64Engine, EngineKind::Threefry4x64);

/// Object-safe view of a [`MappedEngine`] producing `W`.
pub trait ErasedEngine<W: Word>: Debug + Send {
    fn kind(&self) -> EngineKind;

    fn generate(&mut self) -> W;

    fn seed_default(&mut self);

    fn seed_scalar(&mut self, seed: W);

    fn skip(&mut self, n: u128);

    fn derive_boxed(&self, key: W) -> Box<dyn ErasedEngine<W>>;

    fn snapshot(&self) -> EngineState<W>;
}

impl<E> ErasedEngine<E::Result> for E
where
    E: MappedEngine,
{
    fn kind(&self) -> EngineKind {
        E::KIND
    }

    #[inline]
    fn generate(&mut self) -> E::Result {
        RandomEngine::generate(self)
    }

    fn seed_default(&mut self) {
        RandomEngine::seed_default(self);
    }

    fn seed_scalar(&mut self, seed: E::Result) {
        RandomEngine::seed_scalar(self, seed);
    }

    fn skip(&mut self, n: u128) {
        MappedEngine::skip(self, n);
    }

    fn derive_boxed(&self, key: E::Result) -> Box<dyn ErasedEngine<E::Result>> {
        Box::new(self.derive_stream(key))
    }

    fn snapshot(&self) -> EngineState<E::Result> {
        MappedEngine::snapshot(self)
    }
}

/// Word types a mapper can be instantiated over.
///
/// Each word type knows which engine kinds produce it.
pub trait MapperWord: Word {
    /// The four-lane engine over this word, owned by a default mapper.
    fn build_default() -> Box<dyn ErasedEngine<Self>>;

    /// Builds a default-seeded engine of `kind`.
    fn build(kind: EngineKind) -> Result<Box<dyn ErasedEngine<Self>>>;

    /// Rebuilds an engine of `kind` from a snapshot.
    fn rebuild(kind: EngineKind, state: &EngineState<Self>) -> Result<Box<dyn ErasedEngine<Self>>>;
}

fn width_mismatch<W: Word>(kind: EngineKind) -> MapperError {
    MapperError::WidthMismatch {
        kind,
        kind_bits: kind.word_bits(),
        mapper_bits: W::BITS,
    }
}

impl MapperWord for u32 {
    fn build_default() -> Box<dyn ErasedEngine<u32>> {
        Box::new(Threefry4x32Engine::new())
    }

    fn build(kind: EngineKind) -> Result<Box<dyn ErasedEngine<u32>>> {
        match kind {
            EngineKind::Threefry2x32 => Ok(Box::new(Threefry2x32Engine::new())),
            EngineKind::Threefry4x32 => Ok(Box::new(Threefry4x32Engine::new())),
            EngineKind::Threefry2x64 | EngineKind::Threefry4x64 => Err(width_mismatch::<u32>(kind)),
        }
    }

    fn rebuild(kind: EngineKind, state: &EngineState<u32>) -> Result<Box<dyn ErasedEngine<u32>>> {
        match kind {
            EngineKind::Threefry2x32 => Ok(Box::new(Threefry2x32Engine::restore(state)?)),
            EngineKind::Threefry4x32 => Ok(Box::new(Threefry4x32Engine::restore(state)?)),
            EngineKind::Threefry2x64 | EngineKind::Threefry4x64 => Err(width_mismatch::<u32>(kind)),
        }
    }
}

impl MapperWord for u64 {
    fn build_default() -> Box<dyn ErasedEngine<u64>> {
        Box::new(Threefry4x64Engine::new())
    }

    fn build(kind: EngineKind) -> Result<Box<dyn ErasedEngine<u64>>> {
        match kind {
            EngineKind::Threefry2x64 => Ok(Box::new(Threefry2x64Engine::new())),
            EngineKind::Threefry4x64 => Ok(Box::new(Threefry4x64Engine::new())),
            EngineKind::Threefry2x32 | EngineKind::Threefry4x32 => Err(width_mismatch::<u64>(kind)),
        }
    }

    fn rebuild(kind: EngineKind, state: &EngineState<u64>) -> Result<Box<dyn ErasedEngine<u64>>> {
        match kind {
            EngineKind::Threefry2x64 => Ok(Box::new(Threefry2x64Engine::restore(state)?)),
            EngineKind::Threefry4x64 => Ok(Box::new(Threefry4x64Engine::restore(state)?)),
            EngineKind::Threefry2x32 | EngineKind::Threefry4x32 => Err(width_mismatch::<u64>(kind)),
        }
    }
}
