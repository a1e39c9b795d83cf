//! Seed sequences: sources that fill a key from caller-provided entropy.
//!
//! A [`SeedSequence`] produces 32-bit values on demand. Engines use it to fill
//! their key words; a 64-bit key word takes two consecutive values, low half
//! first.
//!
//! [`SeedSeq`] implements the entropy-mixing algorithm standardised for
//! `seed_seq` in C++11, so the same entropy yields the same keys across
//! toolchains. [`RngSeedSource`] lets any `rand` generator stand in.

use rand::RngCore;

use crate::word::Word;

/// Anything that can fill a buffer with 32-bit seed material.
pub trait SeedSequence {
    /// Overwrites every element of `dest`.
    fn generate(&mut self, dest: &mut [u32]);
}

/// Entropy-mixing seed sequence.
///
/// Output is a deterministic function of the entropy values and of the number
/// of values requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSeq {
    entropy: Vec<u32>,
}

impl SeedSeq {
    const INITIAL: u32 = 0x8b8b_8b8b;
    const MIX_MUL: u32 = 1_664_525;
    const SCRAMBLE_MUL: u32 = 1_566_083_941;

    pub fn new<I: IntoIterator<Item = u32>>(entropy: I) -> Self {
        Self {
            entropy: entropy.into_iter().collect(),
        }
    }

    /// Splits a 64-bit seed into two entropy values, low half first.
    pub fn from_u64(seed: u64) -> Self {
        Self::new([seed as u32, (seed >> 32) as u32])
    }

    pub fn entropy(&self) -> &[u32] {
        &self.entropy
    }

    pub fn len(&self) -> usize {
        self.entropy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entropy.is_empty()
    }
}

impl SeedSequence for SeedSeq {
    fn generate(&mut self, dest: &mut [u32]) {
        let n = dest.len();
        if n == 0 {
            return;
        }

        dest.fill(Self::INITIAL);

        let s = self.entropy.len();
        let t = match n {
            623.. => 11,
            68.. => 7,
            39.. => 5,
            7.. => 3,
            _ => (n - 1) / 2,
        };
        let p = (n - t) / 2;
        let q = p + t;
        let m = (s + 1).max(n);

        let tempered = |x: u32| x ^ (x >> 27);

        for k in 0..m {
            let r1 = Self::MIX_MUL
                .wrapping_mul(tempered(dest[k % n] ^ dest[(k + p) % n] ^ dest[(k + n - 1) % n]));
            let r2 = r1.wrapping_add(match k {
                0 => s as u32,
                k if k <= s => ((k % n) as u32).wrapping_add(self.entropy[k - 1]),
                k => (k % n) as u32,
            });
            dest[(k + p) % n] = dest[(k + p) % n].wrapping_add(r1);
            dest[(k + q) % n] = dest[(k + q) % n].wrapping_add(r2);
            dest[k % n] = r2;
        }

        for k in m..m + n {
            let sum = dest[k % n]
                .wrapping_add(dest[(k + p) % n])
                .wrapping_add(dest[(k + n - 1) % n]);
            let r3 = Self::SCRAMBLE_MUL.wrapping_mul(tempered(sum));
            let r4 = r3.wrapping_sub((k % n) as u32);
            dest[(k + p) % n] ^= r3;
            dest[(k + q) % n] ^= r4;
            dest[k % n] = r4;
        }
    }
}

/// Adapts a `rand` generator into a seed sequence.
#[derive(Debug, Clone)]
pub struct RngSeedSource<R>(pub R);

impl<R: RngCore> SeedSequence for RngSeedSource<R> {
    fn generate(&mut self, dest: &mut [u32]) {
        for value in dest.iter_mut() {
            *value = self.0.next_u32();
        }
    }
}

/// Upper bound on 32-bit values needed for any supported key (4 x 64 bits).
const MAX_SEED_VALUES: usize = 8;

/// Fills an `N`-word key from `seq`.
pub(crate) fn key_from_sequence<W, const N: usize, S>(seq: &mut S) -> [W; N]
where
    W: Word,
    S: SeedSequence + ?Sized,
{
    let needed = N * W::U32_LANES;
    debug_assert!(needed <= MAX_SEED_VALUES);

    let mut raw = [0u32; MAX_SEED_VALUES];
    let raw = &mut raw[..needed];
    seq.generate(raw);

    let mut key = [W::ZERO; N];
    for (word, parts) in key.iter_mut().zip(raw.chunks_exact(W::U32_LANES)) {
        *word = W::from_u32_le(parts);
    }
    key
}
