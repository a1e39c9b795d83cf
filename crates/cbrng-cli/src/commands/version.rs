//! Version command implementation.

use cbrng::DEFAULT_ROUNDS;
use cbrng_mapper::EngineKind;

/// Version information for the CLI.
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() {
    println!("cbrng {VERSION}");
    println!();
    println!("Counter-based random number streams.");
    println!();
    println!("Engines:");
    for kind in EngineKind::ALL {
        println!(
            "  {kind:<14} {} x {}-bit words, {DEFAULT_ROUNDS} rounds",
            kind.lanes(),
            kind.word_bits()
        );
    }
    println!();
    println!("Build info:");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
}
