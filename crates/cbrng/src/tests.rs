//! Engine-level tests: known streams, skip-ahead, derivation and persistence.

use proptest::prelude::*;
use test_case::test_case;

use crate::{
    CbrngError, CounterEngine, DefaultEngine, DeriveStream, EngineState, RandomEngine, SeedSeq,
    Threefry2x32Engine, Threefry2x32R13, Threefry2x64Engine, Threefry4x32Engine,
    Threefry4x64Engine, derive_stream, derive_streams,
};

fn take<E: RandomEngine>(engine: &mut E, n: usize) -> Vec<E::Result> {
    (0..n).map(|_| engine.generate()).collect()
}

// ============================================================================
// Known streams
// ============================================================================

#[test]
fn default_engine_stream() {
    let mut engine = DefaultEngine::new();
    assert_eq!(
        take(&mut engine, 6),
        [
            0xa90aace949ad6863,
            0x648fac0e8d1d2f63,
            0x69d9911959a2be5d,
            0xaffbae48c21f4d17,
            0x8e9842537fa6a73e,
            0xec49ecf409752a5a,
        ]
    );
}

#[test]
fn threefry4x64_scalar_seed_stream() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    assert_eq!(
        take(&mut engine, 6),
        [
            0x407b6dc7c003ca75,
            0x1eeefa4e75f2648d,
            0x156cf4898ed78ad9,
            0xd42ec6e808179542,
            0x866660ee2e76e56b,
            0x0d85dcb5556953e7,
        ]
    );
}

#[test]
fn threefry2x64_scalar_seed_stream() {
    let mut engine = Threefry2x64Engine::from_scalar(42);
    assert_eq!(
        take(&mut engine, 6),
        [
            0xe03af5a21c096646,
            0x5b5581a1757698af,
            0x87b4a647fa23783f,
            0x1e208e07713c7f7b,
            0x76664a9e73421df9,
            0x003e13762fe2ad55,
        ]
    );
}

#[test]
fn threefry4x32_scalar_seed_stream() {
    let mut engine = Threefry4x32Engine::from_scalar(42);
    assert_eq!(
        take(&mut engine, 6),
        [0xc4ca596a, 0x85abeceb, 0x0e14b399, 0xc4b6d1b1, 0x1bb10c2c, 0x26463408]
    );
}

#[test]
fn threefry2x32_scalar_seed_stream() {
    let mut engine = Threefry2x32Engine::from_scalar(42);
    assert_eq!(
        take(&mut engine, 6),
        [0x442cab06, 0xd14287da, 0x5a9e6579, 0x6bdeda31, 0xd854b721, 0x2ceb61fe]
    );
}

#[test]
fn block_words_drain_from_the_top() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    let block = engine.mix_at(&[1, 0, 0, 0]);
    let drained = take(&mut engine, 4);
    assert_eq!(drained, [block[3], block[2], block[1], block[0]]);
}

#[test]
fn seed_sequence_streams() {
    let mut engine = Threefry4x32Engine::from_seed_sequence(&mut SeedSeq::new([1, 2, 3]));
    assert_eq!(take(&mut engine, 4), [0x3f7ac19b, 0x20e9ea33, 0x1d222ae9, 0x29c0e848]);

    let mut engine = Threefry2x32Engine::from_seed_sequence(&mut SeedSeq::new([1, 2, 3]));
    assert_eq!(take(&mut engine, 4), [0x76e28b74, 0xb1a55f93, 0x78408ade, 0x4e29f145]);
}

#[test]
fn reduced_round_engine_differs_from_default() {
    let mut fast = CounterEngine::<Threefry2x32R13, 2>::from_scalar(42);
    let mut full = Threefry2x32Engine::from_scalar(42);
    assert_ne!(take(&mut fast, 4), take(&mut full, 4));
}

// ============================================================================
// Block generation
// ============================================================================

#[test]
fn generate_block_returns_next_block_and_empties_buffer() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    let block = engine.generate_block();
    assert_eq!(
        block,
        [0xd42ec6e808179542, 0x156cf4898ed78ad9, 0x1eeefa4e75f2648d, 0x407b6dc7c003ca75]
    );
    assert_eq!(engine.buffered(), 0);
    assert_eq!(take(&mut engine, 2), [0x866660ee2e76e56b, 0x0d85dcb5556953e7]);
}

#[test]
fn generate_block_drops_buffered_words() {
    let mut engine = Threefry2x64Engine::from_scalar(42);
    engine.generate();
    assert_eq!(engine.buffered(), 1);

    let block = engine.generate_block();
    assert_eq!(block, engine.mix_at(&[2, 0]));
    assert_eq!(engine.counter(), [2, 0]);
}

// ============================================================================
// Skip
// ============================================================================

#[test]
fn skip_eleven_lands_mid_block() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    engine.skip(11);
    assert_eq!(
        take(&mut engine, 3),
        [0x811d896f9cadb464, 0x2d14fa9f842517f6, 0xdc39d667d471eda1]
    );
}

#[test]
fn skip_zero_is_identity() {
    let mut engine = Threefry4x32Engine::from_scalar(9);
    engine.generate();
    let before = engine.clone();
    engine.skip(0);
    assert_eq!(engine, before);
}

#[test_case(0, 1 ; "fresh engine, one word")]
#[test_case(1, 3 ; "inside buffer")]
#[test_case(1, 7 ; "crosses blocks")]
#[test_case(3, 4 ; "exact block multiple")]
#[test_case(2, 1000 ; "many blocks")]
fn skip_matches_repeated_generate(consumed: usize, n: u128) {
    let mut stepped = Threefry4x64Engine::from_scalar(5);
    take(&mut stepped, consumed);
    let mut skipped = stepped.clone();

    for _ in 0..n {
        stepped.generate();
    }
    skipped.skip(n);

    assert_eq!(skipped, stepped);
    assert_eq!(skipped.generate(), stepped.generate());
}

#[test]
fn skip_wraps_the_counter() {
    let state = EngineState {
        counter: vec![u32::MAX, u32::MAX],
        key: vec![3, 4],
        elem: 0,
    };
    let mut engine = Threefry2x32Engine::restore(&state).expect("restore");
    engine.skip(2);
    assert_eq!(engine.counter(), [0, 0]);
    assert_eq!(engine.generate(), engine.mix_at(&[1, 0])[1]);
}

#[test]
fn counter_wraps_after_full_period() {
    let state = EngineState {
        counter: vec![u32::MAX, u32::MAX],
        key: vec![3, 4],
        elem: 0,
    };
    let mut engine = Threefry2x32Engine::restore(&state).expect("restore");
    let expected = engine.mix_at(&[0, 0]);
    assert_eq!(engine.generate(), expected[1]);
    assert_eq!(engine.counter(), [0, 0]);
}

proptest! {
    #[test]
    fn skip_equals_generate_loop(seed in any::<u32>(), consumed in 0usize..8, n in 0u128..64) {
        let mut stepped = Threefry4x32Engine::from_scalar(seed);
        take(&mut stepped, consumed);
        let mut skipped = stepped.clone();

        for _ in 0..n {
            stepped.generate();
        }
        skipped.skip(n);

        prop_assert_eq!(&skipped, &stepped);
        prop_assert_eq!(skipped.generate(), stepped.generate());
    }

    #[test]
    fn split_skips_compose(seed in any::<u64>(), a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let mut once = Threefry2x64Engine::from_scalar(seed);
        let mut twice = once.clone();

        once.skip(a + b);
        twice.skip(a);
        twice.skip(b);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.generate(), twice.generate());
    }
}

#[test]
fn huge_skip_advances_counter_arithmetically() {
    let mut engine = Threefry2x32Engine::new();
    engine.skip(2 * (1u128 << 40));
    assert_eq!(engine.counter(), [0, 1 << 8]);
    assert_eq!(engine.buffered(), 0);
}

// ============================================================================
// Derivation
// ============================================================================

const DERIVED_AFTER_CONSUMED: [[u64; 5]; 6] = [
    [0xe48c1ddf62138bc6, 0x64f3cb0bbd02a018, 0x5c1b31f62b1e372c, 0x960952ccab8ffb9d, 0x425d8a2b153cfa77],
    [0xaa7446e8b124bf30, 0x2ecbc9187aa94df7, 0x127ddb5890c20e49, 0x44b6eb673fddad5d, 0xe67618ad26c12995],
    [0x8ae0c7d1a266dbd0, 0xce34bc6a2c3b250e, 0x701429bf681494b0, 0xa570bad5637294b8, 0x6d49c0391a4d1b80],
    [0xbba63d33f376719d, 0xb2d1a3bf63c2c3b5, 0xb7d12596958a6953, 0xf685c65579d9b054, 0xd631c13a52440994],
    [0x9994e1c80b5cc929, 0x01c9852b4426ad0b, 0xc09ce5834e7a9791, 0xedb921dcd84f311a, 0x7cbf47eaa50c707a],
    [0x01f44edd7dead895, 0x358409d532b9ff71, 0x5ed98cc1240e5e85, 0x153ea94382e3e34a, 0xbab7acc3df22481a],
];

#[test_case(0 ; "fresh parent")]
#[test_case(1 ; "one consumed")]
#[test_case(2 ; "two consumed")]
#[test_case(3 ; "three consumed")]
#[test_case(4 ; "block exhausted")]
#[test_case(5 ; "second block")]
fn derived_stream_depends_on_parent_position(consumed: usize) {
    let mut parent = Threefry4x64Engine::from_scalar(42);
    take(&mut parent, consumed);

    let mut child = parent.derivate_scalar(7);
    assert_eq!(take(&mut child, 5), DERIVED_AFTER_CONSUMED[consumed]);
}

#[test]
fn derived_stream_on_narrow_engine() {
    let mut parent = Threefry2x32Engine::from_scalar(42);
    parent.generate();

    let mut child = parent.derivate_scalar(7);
    assert_eq!(take(&mut child, 4), [0xc169e0a9, 0xcc97db48, 0x68a507b1, 0xc0e1a7fc]);
}

#[test]
fn derivation_leaves_parent_untouched() {
    let mut parent = Threefry4x64Engine::from_scalar(42);
    parent.generate();
    let before = parent.clone();

    let _child = parent.derivate_scalar(7);
    assert_eq!(parent, before);
    assert_eq!(parent.generate(), 0x1eeefa4e75f2648d);
}

#[test]
fn derived_child_starts_fresh() {
    let parent = Threefry4x64Engine::from_scalar(42);
    let child = parent.derivate_scalar(8);
    assert_eq!(child.counter(), [0; 4]);
    assert_eq!(child.buffered(), 0);
    assert_ne!(child.key(), parent.key());
}

#[test]
fn derive_stream_uses_scalar_key() {
    let parent = Threefry4x64Engine::from_scalar(42);
    let mut child = derive_stream(&parent, 8);
    assert_eq!(
        take(&mut child, 4),
        [0xe687a17db3218d31, 0x0e8e4da2a2f23a59, 0x195a8cb4d04626ad, 0xf015413d42efe40d]
    );
    assert_eq!(parent.derive_stream(8), parent.derivate_scalar(8));
}

#[test]
fn vector_key_broadcast_equals_scalar_key() {
    let parent = Threefry2x64Engine::from_scalar(1);
    assert_eq!(parent.derivate([9, 9]), parent.derivate_scalar(9));
}

#[test]
fn derive_streams_yields_one_child_per_key_in_order() {
    let root = DefaultEngine::from_scalar(12345);
    let children = derive_streams(&root, 0..4);

    assert_eq!(children.len(), 4);
    for (key, child) in (0..4).zip(&children) {
        assert_eq!(*child, root.derivate_scalar(key));
    }
    for (i, a) in children.iter().enumerate() {
        for b in &children[i + 1..] {
            assert_ne!(a.key(), b.key());
        }
    }
}

#[test]
fn derivation_is_deterministic() {
    let mut a = Threefry4x32Engine::from_scalar(77);
    let mut b = a.clone();
    a.generate();
    b.generate();
    assert_eq!(a.derivate_scalar(3), b.derivate_scalar(3));
}

// ============================================================================
// Seeding
// ============================================================================

#[test]
fn reseeding_resets_counter_and_buffer() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    take(&mut engine, 3);

    engine.seed_scalar(42);
    assert_eq!(engine, Threefry4x64Engine::from_scalar(42));
    assert_eq!(engine.generate(), 0x407b6dc7c003ca75);

    engine.seed_default();
    assert_eq!(engine, DefaultEngine::new());

    engine.seed_key([1, 2, 3, 4]);
    assert_eq!(engine.key(), [1, 2, 3, 4]);
    assert_eq!(engine.counter(), [0; 4]);
}

#[test]
fn seed_sequence_reseed_matches_constructor() {
    let mut engine = Threefry2x64Engine::from_scalar(1);
    engine.generate();
    engine.seed_sequence(&mut SeedSeq::new([1, 2, 3]));
    assert_eq!(
        engine,
        Threefry2x64Engine::from_seed_sequence(&mut SeedSeq::new([1, 2, 3]))
    );
}

#[test]
fn trait_seeding_matches_inherent_seeding() {
    let mut engine = Threefry2x32Engine::from_scalar(1);
    RandomEngine::seed_scalar(&mut engine, 42);
    assert_eq!(engine, Threefry2x32Engine::from_scalar(42));
    RandomEngine::seed_default(&mut engine);
    assert_eq!(engine, Threefry2x32Engine::default());
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn snapshot_restore_resumes_mid_block() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    take(&mut engine, 5);

    let bytes = engine.snapshot().to_bytes().expect("encode");
    let state = EngineState::<u64>::from_bytes(&bytes).expect("decode");
    let mut restored = Threefry4x64Engine::restore(&state).expect("restore");

    assert_eq!(restored, engine);
    assert_eq!(take(&mut restored, 8), take(&mut engine, 8));
}

#[test]
fn restored_engine_derives_identically() {
    let mut engine = Threefry4x64Engine::from_scalar(42);
    take(&mut engine, 2);
    let restored = Threefry4x64Engine::restore(&engine.snapshot()).expect("restore");

    let mut child = restored.derivate_scalar(7);
    assert_eq!(take(&mut child, 5), DERIVED_AFTER_CONSUMED[2]);
}

#[test]
fn restore_rejects_short_key() {
    let state = EngineState {
        counter: vec![0u32; 4],
        key: vec![0; 2],
        elem: 0,
    };
    assert!(matches!(
        Threefry4x32Engine::restore(&state),
        Err(CbrngError::LaneMismatch {
            field: "key",
            expected: 4,
            actual: 2
        })
    ));
}

#[test]
fn display_shows_full_width_words() {
    let engine = Threefry2x64Engine::from_scalar(0x10);
    assert_eq!(
        engine.to_string(),
        "counter=[0000000000000000, 0000000000000000] \
         key=[0000000000000010, 0000000000000010] elem=0"
    );
}
