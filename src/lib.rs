//! # Idiom Tour
//!
//! Small, self-contained lessons, one per module. None of them share state.
//!
//! ## Lessons Covered
//!
//! 1. **Scoped Resources** (`resources`, `display`)
//!    - Releasing a file handle on every exit path, two ways
//!    - An unnamed, function-local type implementing a trait
//!    - A trait whose default method leans on a private helper
//!
//! 2. **Option Combinators** (`customers`)
//!    - Fallback chains with `or_else`
//!    - Treating an `Option` as a zero-or-one sequence
//!    - Branching on presence
//!
//! 3. **Lazy Sequences** (`sequences`)
//!    - Bounded and predicate-bounded iteration from a seed
//!    - `take_while` / `skip_while` as a partition
//!
//! ## Running Lessons
//!
//! ```bash
//! cargo run --bin scoped_resources
//! cargo run --bin optional_fallback
//! cargo run --bin lazy_sequences
//! ```
//!
//! Set `RUST_LOG=debug` to see handle and lookup events on stderr.

pub mod config;
pub mod customers;
pub mod display;
pub mod error;
pub mod logging;
pub mod output;
pub mod resources;
pub mod sequences;

pub use config::DemoConfig;
pub use error::DemoError;
