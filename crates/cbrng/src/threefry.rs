//! Threefry block mixing.
//!
//! Threefry is the Threefish block cipher (from the Skein hash family) with the
//! tweak removed and the round count made a parameter. It was introduced as a
//! counter-based generator in Salmon, Moraes, Dror and Shaw, "Parallel Random
//! Numbers: As Easy as 1, 2, 3" (SC11).
//!
//! ## Round structure
//!
//! ```text
//! state = counter + key
//! for r in 0..R:
//!     N = 2: x0 += x1; x1 = rotl(x1, ROT[r % 8]) ^ x0
//!     N = 4: even r mixes (x0,x1) (x2,x3), odd r mixes (x0,x3) (x2,x1)
//!     every 4th round: state += ks[s..s+N] (mod N+1), last word += s
//! ```
//!
//! `ks` is the key extended with one parity word, `KS_PARITY ^ k0 ^ .. ^ kN-1`.
//! The round count is a const generic so the round loop is fully unrolled and
//! the key-injection branch folds away at compile time.
//!
//! Rotation constants are the published Random123 tables. Changing any of them
//! breaks the known-answer vectors below.

use crate::mixer::BlockMixer;
use crate::word::Word;

/// Default round count. Random123 recommends 20 for all four shapes.
pub const DEFAULT_ROUNDS: usize = 20;

/// Rotation schedule for two-word Threefry.
pub trait Rotations2: Word {
    const ROTATIONS: [u32; 8];
}

/// Rotation schedule for four-word Threefry, one table per mixed pair.
pub trait Rotations4: Word {
    const ROTATIONS_0: [u32; 8];
    const ROTATIONS_1: [u32; 8];
}

impl Rotations2 for u32 {
    const ROTATIONS: [u32; 8] = [13, 15, 26, 6, 17, 29, 16, 24];
}

impl Rotations2 for u64 {
    const ROTATIONS: [u32; 8] = [16, 42, 12, 31, 16, 32, 24, 21];
}

impl Rotations4 for u32 {
    const ROTATIONS_0: [u32; 8] = [10, 11, 13, 23, 6, 17, 25, 18];
    const ROTATIONS_1: [u32; 8] = [26, 21, 27, 5, 20, 11, 10, 20];
}

impl Rotations4 for u64 {
    const ROTATIONS_0: [u32; 8] = [14, 52, 23, 5, 25, 46, 58, 32];
    const ROTATIONS_1: [u32; 8] = [16, 57, 40, 37, 33, 12, 22, 32];
}

/// Threefry over `N` words of type `W` with `R` rounds.
///
/// Only `N = 2` and `N = 4` exist; any other lane count fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threefry<W: Word, const N: usize, const R: usize = DEFAULT_ROUNDS> {
    key: [W; N],
}

pub type Threefry2x32 = Threefry<u32, 2>;
pub type Threefry4x32 = Threefry<u32, 4>;
pub type Threefry2x64 = Threefry<u64, 2>;
pub type Threefry4x64 = Threefry<u64, 4>;

/// Thirteen-round variants, the fastest configurations Random123 reports as
/// Crush-resistant.
pub type Threefry2x32R13 = Threefry<u32, 2, 13>;
pub type Threefry4x64R13 = Threefry<u64, 4, 13>;

/// The variant to use when nothing else is specified.
pub type ThreefryDefault = Threefry4x64;

impl<W: Word, const N: usize, const R: usize> Threefry<W, N, R> {
    /// Creates a mixer with the all-zero key.
    pub fn new() -> Self {
        Self::with_key([W::ZERO; N])
    }

    /// Creates a mixer with the given key.
    pub fn with_key(key: [W; N]) -> Self {
        const { assert!(N == 2 || N == 4, "threefry mixes 2 or 4 words") };
        Self { key }
    }
}

impl<W: Word, const N: usize, const R: usize> Default for Threefry<W, N, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Rotations2, const R: usize> BlockMixer<2> for Threefry<W, 2, R> {
    type Word = W;

    fn from_key(key: [W; 2]) -> Self {
        Self::with_key(key)
    }

    fn key(&self) -> [W; 2] {
        self.key
    }

    fn set_key(&mut self, key: [W; 2]) {
        self.key = key;
    }

    #[inline]
    fn mix(&self, counter: &[W; 2]) -> [W; 2] {
        let [k0, k1] = self.key;
        let ks = [k0, k1, W::KS_PARITY ^ k0 ^ k1];
        let mut x = [counter[0].wrapping_add(k0), counter[1].wrapping_add(k1)];
        for r in 0..R {
            round2(&mut x, &ks, r);
        }
        x
    }
}

impl<W: Rotations4, const R: usize> BlockMixer<4> for Threefry<W, 4, R> {
    type Word = W;

    fn from_key(key: [W; 4]) -> Self {
        Self::with_key(key)
    }

    fn key(&self) -> [W; 4] {
        self.key
    }

    fn set_key(&mut self, key: [W; 4]) {
        self.key = key;
    }

    #[inline]
    fn mix(&self, counter: &[W; 4]) -> [W; 4] {
        let [k0, k1, k2, k3] = self.key;
        let ks = [k0, k1, k2, k3, W::KS_PARITY ^ k0 ^ k1 ^ k2 ^ k3];
        let mut x = [
            counter[0].wrapping_add(k0),
            counter[1].wrapping_add(k1),
            counter[2].wrapping_add(k2),
            counter[3].wrapping_add(k3),
        ];
        for r in 0..R {
            round4(&mut x, &ks, r);
        }
        x
    }
}

#[inline(always)]
fn round2<W: Rotations2>(x: &mut [W; 2], ks: &[W; 3], r: usize) {
    x[0] = x[0].wrapping_add(x[1]);
    x[1] = x[1].rotate_left(W::ROTATIONS[r % 8]) ^ x[0];

    if (r + 1) % 4 == 0 {
        let s = (r + 1) / 4;
        x[0] = x[0].wrapping_add(ks[s % 3]);
        x[1] = x[1]
            .wrapping_add(ks[(s + 1) % 3])
            .wrapping_add(W::from_u128_truncating(s as u128));
    }
}

#[inline(always)]
fn round4<W: Rotations4>(x: &mut [W; 4], ks: &[W; 5], r: usize) {
    let (rot0, rot1) = (W::ROTATIONS_0[r % 8], W::ROTATIONS_1[r % 8]);

    if r % 2 == 0 {
        x[0] = x[0].wrapping_add(x[1]);
        x[2] = x[2].wrapping_add(x[3]);
        x[1] = x[1].rotate_left(rot0) ^ x[0];
        x[3] = x[3].rotate_left(rot1) ^ x[2];
    } else {
        x[0] = x[0].wrapping_add(x[3]);
        x[2] = x[2].wrapping_add(x[1]);
        x[3] = x[3].rotate_left(rot0) ^ x[0];
        x[1] = x[1].rotate_left(rot1) ^ x[2];
    }

    if (r + 1) % 4 == 0 {
        let s = (r + 1) / 4;
        for (i, word) in x.iter_mut().enumerate() {
            *word = word.wrapping_add(ks[(s + i) % 5]);
        }
        x[3] = x[3].wrapping_add(W::from_u128_truncating(s as u128));
    }
}
