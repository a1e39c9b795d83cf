//! Kani verification harnesses for counter arithmetic and the engine cursor.
//!
//! # Running Proofs
//!
//! ```bash
//! cargo kani --package cbrng
//! cargo kani --harness verify_advance_one_is_increment
//! ```

#[cfg(kani)]
mod verification {
    use crate::counter;
    use crate::engine::Threefry2x32Engine;

    /// **Property:** advancing by one equals incrementing, for every counter.
    #[kani::proof]
    fn verify_advance_one_is_increment() {
        let start: [u32; 2] = [kani::any(), kani::any()];

        let mut stepped = start;
        counter::increment(&mut stepped);

        let mut advanced = start;
        counter::advance(&mut advanced, 1);

        assert_eq!(stepped, advanced);
    }

    /// **Property:** a two-word counter behaves as a 64-bit wrapping integer.
    #[kani::proof]
    fn verify_advance_matches_u64_wrapping_add() {
        let lo: u32 = kani::any();
        let hi: u32 = kani::any();
        let by: u64 = kani::any();

        let mut words = [lo, hi];
        counter::advance(&mut words, u128::from(by));

        let expected = ((u64::from(hi) << 32) | u64::from(lo)).wrapping_add(by);
        assert_eq!(words, [expected as u32, (expected >> 32) as u32]);
    }

    /// **Property:** the buffer cursor never leaves `0..=N` across a skip.
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_skip_keeps_cursor_in_range() {
        let mut engine = Threefry2x32Engine::new();
        let n: u8 = kani::any();
        engine.skip(u128::from(n));
        assert!(engine.buffered() <= 2);
    }
}
