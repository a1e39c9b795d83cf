//! Fixed-width unsigned words.
//!
//! Every value the mixer reads or writes (key, counter, block) is an array of
//! [`Word`]s. Arithmetic on words is modular: additions wrap, and the counter
//! relies on that wrap to give the engine its finite period.
//!
//! The trait is sealed to `u32` and `u64`. Any other width is rejected by the
//! type system before a mixer can be built over it.

use std::fmt::{Debug, Display, LowerHex};
use std::hash::Hash;
use std::ops::BitXor;

use serde::Serialize;
use serde::de::DeserializeOwned;

mod sealed {
    pub trait Sealed {}

    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An unsigned machine word the Threefry transform operates on.
pub trait Word:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + LowerHex
    + BitXor<Output = Self>
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Width in bits.
    const BITS: u32;
    /// Width in bytes.
    const BYTES: usize;
    /// Number of 32-bit seed-sequence outputs consumed per word.
    const U32_LANES: usize;
    /// The zero word.
    const ZERO: Self;
    /// The one word.
    const ONE: Self;
    /// The all-ones word.
    const MAX: Self;
    /// Key-schedule parity constant from Threefish, folded into the extended key
    /// so an all-zero key still yields a non-degenerate schedule.
    const KS_PARITY: Self;

    /// Addition modulo `2^BITS`.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Addition modulo `2^BITS`, plus whether it carried out of the top bit.
    fn overflowing_add(self, rhs: Self) -> (Self, bool);

    /// Rotates left by `n` bits; bits shifted out of the top re-enter at the bottom.
    fn rotate_left(self, n: u32) -> Self;

    /// Keeps the low `BITS` bits of `value`.
    fn from_u128_truncating(value: u128) -> Self;

    /// Widens (or, for `u64`, passes through) to `u64`.
    fn to_u64(self) -> u64;

    /// Assembles a word from 32-bit parts, least significant first.
    fn from_u32_le(parts: &[u32]) -> Self;

    /// Writes the little-endian encoding into `out`, truncated to `out.len()`.
    fn write_le(self, out: &mut [u8]);

    /// Reads a little-endian word; missing high bytes are zero.
    fn read_le(bytes: &[u8]) -> Self;
}

macro_rules! impl_word {
    ($ty:ty, $parity:expr) => {
        impl Word for $ty {
            const BITS: u32 = <$ty>::BITS;
            const BYTES: usize = std::mem::size_of::<$ty>();
            const U32_LANES: usize = std::mem::size_of::<$ty>() / 4;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$ty>::MAX;
            const KS_PARITY: Self = $parity;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn overflowing_add(self, rhs: Self) -> (Self, bool) {
                <$ty>::overflowing_add(self, rhs)
            }

            #[inline(always)]
            fn rotate_left(self, n: u32) -> Self {
                <$ty>::rotate_left(self, n)
            }

            #[inline]
            fn from_u128_truncating(value: u128) -> Self {
                value as $ty
            }

            #[inline]
            fn to_u64(self) -> u64 {
                u64::from(self)
            }

            fn from_u32_le(parts: &[u32]) -> Self {
                parts
                    .iter()
                    .take(Self::U32_LANES)
                    .rev()
                    .fold(0, |acc: $ty, &part| {
                        ((u64::from(acc) << 32) | u64::from(part)) as $ty
                    })
            }

            fn write_le(self, out: &mut [u8]) {
                let bytes = self.to_le_bytes();
                let len = out.len().min(bytes.len());
                out[..len].copy_from_slice(&bytes[..len]);
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                let len = bytes.len().min(buf.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                <$ty>::from_le_bytes(buf)
            }
        }
    };
}

impl_word!(u32, 0x1BD1_1BDA);
impl_word!(u64, 0x1BD1_1BDA_A9FC_1A22);
