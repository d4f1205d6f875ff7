//! Lazy sequences built from a seed and a step function.
//!
//! `iterate_limited` has no stopping rule of its own and is cut off by
//! `take`. `iterate_while` checks its predicate before emitting each
//! element, so the first failing element never appears.

use crate::config::DemoConfig;
use crate::output;
use std::io::{self, Write};
use tracing::debug;

/// Seed, then `step(seed)`, then `step(step(seed))`, ... while `has_next` holds.
///
/// `step` runs only when the next element is requested, never past the
/// first element that fails `has_next`. A `step` returning `None` also ends
/// the sequence, so arithmetic steps can stop at overflow instead of panicking.
pub struct IterateWhile<T, P, F> {
    seed: Option<T>,
    last: Option<T>,
    finished: bool,
    has_next: P,
    step: F,
}

impl<T, P, F> Iterator for IterateWhile<T, P, F>
where
    T: Clone,
    P: FnMut(&T) -> bool,
    F: FnMut(&T) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let candidate = match self.last.take() {
            Some(prev) => (self.step)(&prev),
            None => self.seed.take(),
        };
        match candidate {
            Some(value) if (self.has_next)(&value) => {
                self.last = Some(value.clone());
                Some(value)
            }
            _ => {
                self.finished = true;
                None
            }
        }
    }
}

/// Like [`iterate_while`], with a step that may give up.
pub fn iterate_checked<T, P, F>(seed: T, has_next: P, step: F) -> IterateWhile<T, P, F>
where
    T: Clone,
    P: FnMut(&T) -> bool,
    F: FnMut(&T) -> Option<T>,
{
    IterateWhile {
        seed: Some(seed),
        last: None,
        finished: false,
        has_next,
        step,
    }
}

pub fn iterate_while<T, P, F>(seed: T, has_next: P, mut step: F) -> impl Iterator<Item = T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
    F: FnMut(&T) -> T,
{
    iterate_checked(seed, has_next, move |prev| Some(step(prev)))
}

/// At most `limit` elements; the step alone never ends the sequence.
///
/// Only `limit - 1` steps run for `limit` elements.
pub fn iterate_limited<T, F>(seed: T, step: F, limit: usize) -> impl Iterator<Item = T>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    iterate_while(seed, |_| true, step).take(limit)
}

/// How many elements the zero-or-one sequence over `value` holds.
pub fn of_nullable<T>(value: Option<T>) -> usize {
    value.into_iter().count()
}

pub fn words(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

pub fn take_while_words<'a, P>(words: &[&'a str], mut pred: P) -> Vec<&'a str>
where
    P: FnMut(&str) -> bool,
{
    words.iter().copied().take_while(|w| pred(*w)).collect()
}

pub fn drop_while_words<'a, P>(words: &[&'a str], mut pred: P) -> Vec<&'a str>
where
    P: FnMut(&str) -> bool,
{
    words.iter().copied().skip_while(|w| pred(*w)).collect()
}

/// Splits at the first word failing `pred`: the satisfying prefix and the rest.
pub fn split_at_first_failure<'a, 'w, P>(
    words: &'w [&'a str],
    mut pred: P,
) -> (&'w [&'a str], &'w [&'a str])
where
    P: FnMut(&str) -> bool,
{
    let split = words.iter().position(|w| !pred(*w)).unwrap_or(words.len());
    words.split_at(split)
}

pub fn run(config: &DemoConfig, out: &mut impl Write) -> io::Result<()> {
    output::header(out, "Zero-or-one sequence")?;
    let one = of_nullable(Some("Ruslan"));
    let zero = of_nullable(None::<&str>);
    writeln!(out, "{}, {}", one, zero)?;

    output::header(out, "Iterate")?;
    let seed = config.iterate_seed;
    let limited: Vec<u64> = iterate_checked(seed, |_| true, |n| n.checked_add(1))
        .take(config.iterate_limit)
        .collect();
    writeln!(out, "{}", output::list(&limited))?;

    let bound = seed.saturating_add(config.iterate_limit as u64);
    let bounded: Vec<u64> = iterate_checked(seed, |&n| n < bound, |n| n.checked_add(1)).collect();
    writeln!(out, "{}", output::list(&bounded))?;
    debug!(limited = limited.len(), bounded = bounded.len(), "iterate forms compared");

    // Reads like a classic counted loop.
    let doubling_bound = config.doubling_bound;
    for n in iterate_checked(1u64, |&n| n <= doubling_bound, |n| n.checked_mul(2)) {
        writeln!(out, "{}", n)?;
    }

    let words = words(&config.sentence);
    let stop = config.stop_word.as_str();

    output::header(out, "take_while")?;
    let taken = take_while_words(&words, |w| w != stop);
    writeln!(out, "{}", output::list(&taken))?;

    output::header(out, "drop_while")?;
    let dropped = drop_while_words(&words, |w| w != stop);
    writeln!(out, "{}", output::list(&dropped))?;
    debug!(taken = taken.len(), dropped = dropped.len(), total = words.len(), "word list split");

    Ok(())
}
