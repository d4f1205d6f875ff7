//! Lesson 1: Scoped Resources
//!
//! Run with: cargo run --bin scoped_resources
//!
//! Expects `test.txt` in the working directory. When it is missing the
//! scoped-release section prints nothing and the lesson carries on.

use idiom_tour::{logging, resources, DemoConfig};
use std::io;

fn main() -> io::Result<()> {
    logging::init();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    resources::run(&DemoConfig::default(), &mut out)
}
