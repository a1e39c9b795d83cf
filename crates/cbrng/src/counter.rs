//! Multi-word counter arithmetic.
//!
//! A counter is a little-endian arbitrary-precision integer spread over a
//! slice of [`Word`]s: index 0 holds the least significant word. All
//! operations are modular in `2^(len * W::BITS)`. Overflow past the last word
//! wraps silently; that wrap is the engine's period, not an error.
//!
//! Every function threads an explicit carry flag through one pass over the
//! words. Nothing allocates and nothing recurses.

use crate::word::Word;

/// Adds one to `words`.
#[inline]
pub fn increment<W: Word>(words: &mut [W]) {
    for word in words.iter_mut() {
        let (next, carry) = word.overflowing_add(W::ONE);
        *word = next;
        if !carry {
            return;
        }
    }
}

/// Adds `by` to `words`.
///
/// `by` is split into `W::BITS`-wide limbs. Limbs beyond the counter's width
/// are dropped, which is exactly reduction modulo the counter's range.
pub fn advance<W: Word>(words: &mut [W], by: u128) {
    if by == 0 {
        return;
    }

    let mut carry = false;
    for (i, word) in words.iter_mut().enumerate() {
        let limb = by
            .checked_shr(i as u32 * W::BITS)
            .map_or(W::ZERO, W::from_u128_truncating);
        carry = add_with_carry(word, limb, carry);
    }
}

/// Adds the counter-shaped value `rhs` to `words`.
///
/// Words of `rhs` past the end of `words` are ignored; missing words are zero.
pub fn add<W: Word>(words: &mut [W], rhs: &[W]) {
    let mut carry = false;
    for (i, word) in words.iter_mut().enumerate() {
        let limb = rhs.get(i).copied().unwrap_or(W::ZERO);
        carry = add_with_carry(word, limb, carry);
    }
}

/// Returns true if every word is zero.
pub fn is_zero<W: Word>(words: &[W]) -> bool {
    words.iter().all(|&w| w == W::ZERO)
}

#[inline(always)]
fn add_with_carry<W: Word>(word: &mut W, limb: W, carry_in: bool) -> bool {
    let (sum, c1) = word.overflowing_add(limb);
    let (sum, c2) = sum.overflowing_add(if carry_in { W::ONE } else { W::ZERO });
    *word = sum;
    c1 || c2
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn as_u64(words: &[u32; 2]) -> u64 {
        u64::from(words[0]) | (u64::from(words[1]) << 32)
    }

    fn from_u64(value: u64) -> [u32; 2] {
        [value as u32, (value >> 32) as u32]
    }

    #[test]
    fn increment_carries_into_next_word() {
        let mut c = [u32::MAX, 0, 0, 0];
        increment(&mut c);
        assert_eq!(c, [0, 1, 0, 0]);
    }

    #[test]
    fn increment_ripples_through_every_word() {
        let mut c = [u64::MAX, u64::MAX, u64::MAX, 7];
        increment(&mut c);
        assert_eq!(c, [0, 0, 0, 8]);
    }

    #[test]
    fn increment_wraps_at_full_range() {
        let mut c = [u32::MAX; 4];
        increment(&mut c);
        assert_eq!(c, [0; 4]);
        assert!(is_zero(&c));
    }

    #[test]
    fn advance_zero_is_identity() {
        let mut c = [3u64, 4];
        advance(&mut c, 0);
        assert_eq!(c, [3, 4]);
    }

    #[test]
    fn advance_spreads_limbs() {
        let mut c = [0u32; 4];
        advance(&mut c, 0x0000_0004_0000_0003_0000_0002_0000_0001);
        assert_eq!(c, [1, 2, 3, 4]);
    }

    #[test]
    fn advance_carries_between_limbs() {
        let mut c = [u64::MAX, 0, 0, 0];
        advance(&mut c, 2);
        assert_eq!(c, [1, 1, 0, 0]);

        let mut c = [u64::MAX, u64::MAX, 0, 0];
        advance(&mut c, 1);
        assert_eq!(c, [0, 0, 1, 0]);
    }

    #[test]
    fn advance_by_full_period_is_identity() {
        // 2x32 counters span 2^64 values, which u128 can express directly.
        let mut c = [0xdead_beef_u32, 0x0bad_cafe];
        advance(&mut c, 1u128 << 64);
        assert_eq!(c, [0xdead_beef, 0x0bad_cafe]);

        // 4x32 counters span 2^128: (2^128 - 1) + 1.
        let original = [9u32, 8, 7, 6];
        let mut c = original;
        advance(&mut c, u128::MAX);
        advance(&mut c, 1);
        assert_eq!(c, original);
    }

    #[test]
    fn advance_on_wide_counters_ignores_missing_limbs() {
        let mut c = [0u64, 0, u64::MAX, u64::MAX];
        advance(&mut c, u128::MAX);
        assert_eq!(c, [u64::MAX, u64::MAX, u64::MAX, u64::MAX]);
        advance(&mut c, 1);
        assert_eq!(c, [0; 4]);
    }

    #[test]
    fn add_matches_advance() {
        let mut a = [5u64, 6, 7, 8];
        let mut b = a;
        add(&mut a, &[u64::MAX, 1]);
        advance(&mut b, (1u128 << 64) + u128::from(u64::MAX));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_advance_is_modular_addition(start: u64, by: u64) {
            let mut c = from_u64(start);
            advance(&mut c, u128::from(by));
            prop_assert_eq!(as_u64(&c), start.wrapping_add(by));
        }

        #[test]
        fn prop_advance_one_matches_increment(words: [u64; 4]) {
            let mut a = words;
            let mut b = words;
            increment(&mut a);
            advance(&mut b, 1);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_advance_composes(start: u64, x in 0u64..u64::MAX / 2, y in 0u64..u64::MAX / 2) {
            let mut split = from_u64(start);
            advance(&mut split, u128::from(x));
            advance(&mut split, u128::from(y));

            let mut once = from_u64(start);
            advance(&mut once, u128::from(x) + u128::from(y));

            prop_assert_eq!(split, once);
        }
    }
}
