use colored::Colorize;
use itertools::Itertools;
use std::fmt::Display;
use std::io::{self, Write};

pub fn header_line(title: &str) -> String {
    format!("=== {} ===", title)
}

pub fn header(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", header_line(title).as_str().bold())
}

/// Renders items as `[a, b, c]`.
pub fn list<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    format!("[{}]", items.into_iter().join(", "))
}
