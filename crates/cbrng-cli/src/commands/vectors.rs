//! Known-answer vector check.
//!
//! Mixes the Random123 `kat_vectors` inputs with every Threefry shape and
//! compares against the published outputs.

use anyhow::{Result, bail};
use cbrng::{
    BlockMixer, Threefry2x32, Threefry2x32R13, Threefry2x64, Threefry4x32, Threefry4x64,
    Threefry4x64R13, Word,
};

struct Outcome {
    name: &'static str,
    output: String,
    passed: bool,
}

fn check<M: BlockMixer<N>, const N: usize>(
    name: &'static str,
    counter: [M::Word; N],
    key: [M::Word; N],
    expected: [M::Word; N],
) -> Outcome {
    let output = M::from_key(key).mix(&counter);
    let width = (<M::Word as Word>::BITS / 4) as usize;
    Outcome {
        name,
        output: output
            .iter()
            .map(|word| format!("{word:0width$x}"))
            .collect::<Vec<_>>()
            .join(" "),
        passed: output == expected,
    }
}

fn outcomes() -> Vec<Outcome> {
    vec![
        check::<Threefry2x32, 2>("threefry2x32-20 zero", [0; 2], [0; 2], [0x6b200159, 0x99ba4efe]),
        check::<Threefry2x32, 2>(
            "threefry2x32-20 ones",
            [u32::MAX; 2],
            [u32::MAX; 2],
            [0x1cb996fc, 0xbb002be7],
        ),
        check::<Threefry2x32, 2>(
            "threefry2x32-20 pi",
            [0x243f6a88, 0x85a308d3],
            [0x13198a2e, 0x03707344],
            [0xc4923a9c, 0x483df7a0],
        ),
        check::<Threefry2x32R13, 2>("threefry2x32-13 zero", [0; 2], [0; 2], [0x9d1c5ec6, 0x8bd50731]),
        check::<Threefry4x32, 4>(
            "threefry4x32-20 zero",
            [0; 4],
            [0; 4],
            [0x9c6ca96a, 0xe17eae66, 0xfc10ecd4, 0x5256a7d8],
        ),
        check::<Threefry4x32, 4>(
            "threefry4x32-20 ones",
            [u32::MAX; 4],
            [u32::MAX; 4],
            [0x2a881696, 0x57012287, 0xf6c7446e, 0xa16a6732],
        ),
        check::<Threefry2x64, 2>(
            "threefry2x64-20 zero",
            [0; 2],
            [0; 2],
            [0xc2b6e3a8c2c69865, 0x6f81ed42f350084d],
        ),
        check::<Threefry2x64, 2>(
            "threefry2x64-20 ones",
            [u64::MAX; 2],
            [u64::MAX; 2],
            [0xe02cb7c4d95d277a, 0xd06633d0893b8b68],
        ),
        check::<Threefry4x64, 4>(
            "threefry4x64-20 zero",
            [0; 4],
            [0; 4],
            [0x09218ebde6c85537, 0x55941f5266d86105, 0x4bd25e16282434dc, 0xee29ec846bd2e40b],
        ),
        check::<Threefry4x64, 4>(
            "threefry4x64-20 ones",
            [u64::MAX; 4],
            [u64::MAX; 4],
            [0x29c24097942bba1b, 0x0371bbfb0f6f4e11, 0x3c231ffa33f83a1c, 0xcd29113fde32d168],
        ),
        check::<Threefry4x64R13, 4>(
            "threefry4x64-13 zero",
            [0; 4],
            [0; 4],
            [0x4071fabee1dc8e05, 0x02ed3113695c9c62, 0x397311b5b89f9d49, 0xe21292c3258024bc],
        ),
    ]
}

pub fn run() -> Result<()> {
    let outcomes = outcomes();
    for outcome in &outcomes {
        let status = if outcome.passed { "ok  " } else { "FAIL" };
        println!("{status} {:<22} {}", outcome.name, outcome.output);
    }

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    tracing::info!(checked = outcomes.len(), failed, "known-answer vectors");
    if failed > 0 {
        bail!("{failed} of {} known-answer vectors failed", outcomes.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_vectors_pass() {
        let outcomes = outcomes();
        assert_eq!(outcomes.len(), 11);
        for outcome in outcomes {
            assert!(outcome.passed, "{} produced {}", outcome.name, outcome.output);
        }
    }

    #[test]
    fn mismatch_is_reported() {
        let outcome = check::<Threefry2x32, 2>("bad", [0; 2], [0; 2], [0, 0]);
        assert!(!outcome.passed);
        assert_eq!(outcome.output, "6b200159 99ba4efe");
    }
}
