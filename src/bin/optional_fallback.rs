//! Lesson 2: Option Combinators
//!
//! Run with: cargo run --bin optional_fallback

use idiom_tour::{customers, logging, DemoConfig};
use std::io;

fn main() -> io::Result<()> {
    logging::init();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    customers::run(&DemoConfig::default(), &mut out)
}
