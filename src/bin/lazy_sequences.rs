//! Lesson 3: Lazy Sequences
//!
//! Run with: cargo run --bin lazy_sequences

use idiom_tour::{logging, sequences, DemoConfig};
use std::io;

fn main() -> io::Result<()> {
    logging::init();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    sequences::run(&DemoConfig::default(), &mut out)
}
