//! `rand` interop.
//!
//! Every counter engine is a [`RngCore`], so the whole `rand` distribution
//! toolbox works on top of it. Word streams map onto `rand` calls as follows:
//!
//! - 32-bit engines: `next_u32` is one word, `next_u64` joins two words low
//!   half first.
//! - 64-bit engines: `next_u64` is one word, `next_u32` keeps its low half.
//! - `fill_bytes` writes whole words little-endian; a trailing partial word
//!   consumes a full word.
//!
//! [`SeedableRng`] is implemented per Threefry shape. The seed bytes are the
//! key words in little-endian order.

use rand::{Error, RngCore, SeedableRng};

use crate::engine::CounterEngine;
use crate::mixer::BlockMixer;
use crate::threefry::Threefry;
use crate::word::Word;

impl<M, const N: usize> RngCore for CounterEngine<M, N>
where
    M: BlockMixer<N>,
{
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.generate().to_u64() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        if <M::Word as Word>::BITS == 32 {
            let lo = self.generate().to_u64();
            let hi = self.generate().to_u64();
            (hi << 32) | lo
        } else {
            self.generate().to_u64()
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(<M::Word as Word>::BYTES) {
            self.generate().write_le(chunk);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

macro_rules! impl_seedable {
    ($word:ty, $lanes:literal, $bytes:literal) => {
        impl<const R: usize> SeedableRng for CounterEngine<Threefry<$word, $lanes, R>, $lanes> {
            type Seed = [u8; $bytes];

            fn from_seed(seed: Self::Seed) -> Self {
                let mut key = [0 as $word; $lanes];
                for (word, bytes) in key
                    .iter_mut()
                    .zip(seed.chunks_exact(<$word as Word>::BYTES))
                {
                    *word = <$word as Word>::read_le(bytes);
                }
                Self::with_key(key)
            }
        }
    };
}

impl_seedable!(u32, 2, 8);
impl_seedable!(u32, 4, 16);
impl_seedable!(u64, 2, 16);
impl_seedable!(u64, 4, 32);
