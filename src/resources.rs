//! Scoped acquisition and release of a file handle.
//!
//! Two styles hand out the same guarantee: the handle is released when the
//! scope ends, whether the body returns, fails, or unwinds. Releasing is
//! idempotent, so a handle that goes through both scopes is closed once.

use crate::config::DemoConfig;
use crate::display::{ConsoleDisplay, DisplayService};
use crate::error::DemoError;
use crate::output;
use std::cell::Cell;
use std::fs::File;
use std::io::{self, Read, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

/// Counts how many times an underlying file was actually closed.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCounter(Rc<Cell<usize>>);

impl ReleaseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }

    fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Debug)]
pub struct InputStream {
    path: PathBuf,
    file: Option<File>,
    releases: ReleaseCounter,
}

impl InputStream {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Closes the file if it is still open. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(file) = self.file.take() {
            drop(file);
            self.releases.bump();
            debug!(path = %self.path.display(), "input released");
        }
    }
}

impl Drop for InputStream {
    fn drop(&mut self) {
        self.release();
    }
}

pub fn open_input(
    path: impl AsRef<Path>,
    releases: &ReleaseCounter,
) -> Result<InputStream, DemoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| DemoError::from_open(path, err))?;
    debug!(path = %path.display(), "input opened");

    Ok(InputStream {
        path: path.to_path_buf(),
        file: Some(file),
        releases: releases.clone(),
    })
}

/// Reads whatever is left. A released stream reads as empty.
pub fn read_all(stream: &mut InputStream) -> Result<Vec<u8>, DemoError> {
    let mut buffer = Vec::new();
    if let Some(file) = stream.file.as_mut() {
        file.read_to_end(&mut buffer)?;
    }
    Ok(buffer)
}

/// Runs `cleanup` on the guarded value when the guard leaves scope,
/// unless it was disarmed first.
pub struct ScopeGuard<T, F: FnOnce(&mut T)> {
    value: T,
    cleanup: Option<F>,
}

pub fn defer<T, F: FnOnce(&mut T)>(value: T, cleanup: F) -> ScopeGuard<T, F> {
    ScopeGuard {
        value,
        cleanup: Some(cleanup),
    }
}

impl<T, F: FnOnce(&mut T)> ScopeGuard<T, F> {
    pub fn disarm(mut self) {
        self.cleanup = None;
    }
}

impl<T, F: FnOnce(&mut T)> Deref for ScopeGuard<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, F: FnOnce(&mut T)> DerefMut for ScopeGuard<T, F> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T, F: FnOnce(&mut T)> Drop for ScopeGuard<T, F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup(&mut self.value);
        }
    }
}

/// Moves the handle into a fresh binding that the scope owns.
pub fn with_rebound<T, B>(input: InputStream, body: B) -> Result<T, DemoError>
where
    B: FnOnce(&mut InputStream) -> Result<T, DemoError>,
{
    let mut stream = input;
    body(&mut stream)
    // `stream` drops here on every path
}

/// Reuses a handle the caller already holds; a deferred release closes it
/// when the scope ends.
pub fn with_existing<T, B>(stream: &mut InputStream, body: B) -> Result<T, DemoError>
where
    B: FnOnce(&mut InputStream) -> Result<T, DemoError>,
{
    let mut guard = defer(stream, |s| s.release());
    let outcome = body(&mut **guard);
    debug!(ok = outcome.is_ok(), "scoped body finished");
    outcome
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopedReport {
    pub existing_bytes: usize,
    pub rebound_bytes: usize,
}

/// Reads the file through both scope styles, in turn, with one handle.
pub fn scoped_release(
    path: impl AsRef<Path>,
    releases: &ReleaseCounter,
) -> Result<ScopedReport, DemoError> {
    let mut stream = open_input(path, releases)?;
    let existing = with_existing(&mut stream, read_all)?;
    // Already released above; the rebound scope must not close it again.
    let rebound = with_rebound(stream, read_all)?;

    Ok(ScopedReport {
        existing_bytes: existing.len(),
        rebound_bytes: rebound.len(),
    })
}

/// "Is there more?" / "give me the next one".
pub trait Cursor {
    type Item;

    fn has_next(&self) -> bool;
    fn next_item(&mut self) -> Option<Self::Item>;
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn has_next(&self) -> bool {
        (**self).has_next()
    }

    fn next_item(&mut self) -> Option<Self::Item> {
        (**self).next_item()
    }
}

/// A cursor with nothing in it, built from a type nobody outside can name.
pub fn empty_cursor() -> Box<dyn Cursor<Item = String>> {
    struct Empty;

    impl Cursor for Empty {
        type Item = String;

        fn has_next(&self) -> bool {
            false
        }

        fn next_item(&mut self) -> Option<String> {
            None
        }
    }

    Box::new(Empty)
}

pub struct CursorIter<C>(C);

impl<C: Cursor> Iterator for CursorIter<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.has_next() {
            self.0.next_item()
        } else {
            None
        }
    }
}

pub fn cursor_iter<C: Cursor>(cursor: C) -> CursorIter<C> {
    CursorIter(cursor)
}

pub fn run(config: &DemoConfig, out: &mut impl Write) -> io::Result<()> {
    output::header(out, "Scoped release")?;
    let releases = ReleaseCounter::new();
    match scoped_release(&config.input_path, &releases) {
        Ok(report) => writeln!(
            out,
            "read {} bytes, then {} bytes after release; closed {} time(s)",
            report.existing_bytes,
            report.rebound_bytes,
            releases.count()
        )?,
        Err(DemoError::ResourceNotFound { .. }) => {}
        Err(err) => warn!(error = %err, "scoped release failed"),
    }

    output::header(out, "Unnamed cursor")?;
    let cursor = empty_cursor();
    writeln!(out, "has next: {}", cursor.has_next())?;
    let items: Vec<String> = cursor_iter(cursor).collect();
    writeln!(out, "items: {}", output::list(&items))?;

    output::header(out, "Private trait helper")?;
    let mut display = ConsoleDisplay::default();
    display.set_up();
    writeln!(out, "{}", display.display_interface_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use tempfile::NamedTempFile;

    fn temp_input(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let releases = ReleaseCounter::new();
        let result = open_input(dir.path().join("test.txt"), &releases);

        assert!(matches!(result, Err(DemoError::ResourceNotFound { .. })));
        assert_eq!(releases.count(), 0);
    }

    #[test]
    fn test_read_all_reads_content() {
        let file = temp_input("hello");
        let releases = ReleaseCounter::new();
        let mut stream = open_input(file.path(), &releases).unwrap();

        assert_eq!(stream.path(), file.path());
        assert_eq!(read_all(&mut stream).unwrap(), b"hello");
    }

    #[test]
    fn test_release_is_idempotent() {
        let file = temp_input("x");
        let releases = ReleaseCounter::new();
        let mut stream = open_input(file.path(), &releases).unwrap();

        stream.release();
        stream.release();
        assert!(!stream.is_open());
        drop(stream);
        assert_eq!(releases.count(), 1);
    }

    #[test]
    fn test_rebound_releases_on_success() {
        let file = temp_input("abc");
        let releases = ReleaseCounter::new();
        let stream = open_input(file.path(), &releases).unwrap();

        let bytes = with_rebound(stream, read_all).unwrap();
        assert_eq!(bytes, b"abc");
        assert_eq!(releases.count(), 1);
    }

    #[test]
    fn test_rebound_releases_on_error() {
        let file = temp_input("abc");
        let releases = ReleaseCounter::new();
        let stream = open_input(file.path(), &releases).unwrap();

        let result: Result<(), DemoError> =
            with_rebound(stream, |_| Err(DemoError::resource_not_found("inner")));
        assert!(result.is_err());
        assert_eq!(releases.count(), 1);
    }

    #[test]
    fn test_existing_releases_on_error() {
        let file = temp_input("abc");
        let releases = ReleaseCounter::new();
        let mut stream = open_input(file.path(), &releases).unwrap();

        let result: Result<(), DemoError> =
            with_existing(&mut stream, |_| Err(DemoError::resource_not_found("inner")));
        assert!(result.is_err());
        assert!(!stream.is_open());
        assert_eq!(releases.count(), 1);
    }

    #[test]
    fn test_existing_releases_on_panic() {
        let file = temp_input("abc");
        let releases = ReleaseCounter::new();
        let mut stream = open_input(file.path(), &releases).unwrap();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _: Result<(), DemoError> = with_existing(&mut stream, |_| panic!("body failed"));
        }));
        assert!(result.is_err());
        assert_eq!(releases.count(), 1);
    }

    #[test]
    fn test_both_styles_close_once() {
        let file = temp_input("twelve bytes");
        let releases = ReleaseCounter::new();

        let report = scoped_release(file.path(), &releases).unwrap();
        assert_eq!(
            report,
            ScopedReport {
                existing_bytes: 12,
                rebound_bytes: 0,
            }
        );
        assert_eq!(releases.count(), 1);
    }

    #[test]
    fn test_scoped_release_missing_file_leaks_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let releases = ReleaseCounter::new();

        let err = scoped_release(dir.path().join("test.txt"), &releases).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(releases.count(), 0);
    }

    fn run_to_string(config: &DemoConfig) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        run(config, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    const LESSON_TAIL: &str = "\n=== Unnamed cursor ===\n\
                               has next: false\n\
                               items: []\n\
                               \n=== Private trait helper ===\n\
                               DisplayService\n";

    #[test]
    fn test_run_swallows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig {
            input_path: dir.path().join("test.txt"),
            ..DemoConfig::default()
        };
        let printed = run_to_string(&config);
        assert_eq!(printed, format!("\n=== Scoped release ===\n{}", LESSON_TAIL));
    }

    #[test]
    fn test_run_reports_single_release() {
        let file = temp_input("twelve bytes");
        let config = DemoConfig {
            input_path: file.path().to_path_buf(),
            ..DemoConfig::default()
        };
        let printed = run_to_string(&config);
        assert_eq!(
            printed,
            format!(
                "\n=== Scoped release ===\n\
                 read 12 bytes, then 0 bytes after release; closed 1 time(s)\n{}",
                LESSON_TAIL
            )
        );
    }

    #[test]
    fn test_guard_disarm_skips_cleanup() {
        let ran = Cell::new(0);
        {
            let guard = defer(5, |_| ran.set(ran.get() + 1));
            assert_eq!(*guard, 5);
            guard.disarm();
        }
        assert_eq!(ran.get(), 0);
        {
            let mut guard = defer(5, |v| ran.set(*v));
            *guard += 1;
        }
        assert_eq!(ran.get(), 6);
    }

    #[test]
    fn test_empty_cursor_yields_nothing() {
        let cursor = empty_cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor_iter(cursor).count(), 0);
    }

    #[test]
    fn test_cursor_iter_drains_cursor() {
        struct Countdown(u32);

        impl Cursor for Countdown {
            type Item = u32;

            fn has_next(&self) -> bool {
                self.0 > 0
            }

            fn next_item(&mut self) -> Option<u32> {
                self.0 = self.0.checked_sub(1)?;
                Some(self.0)
            }
        }

        let items: Vec<u32> = cursor_iter(Countdown(3)).collect();
        assert_eq!(items, vec![2, 1, 0]);
    }
}
