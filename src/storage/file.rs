//! File helpers for the account document
//!
//! Writes go to a temporary sibling first and are renamed over the target, so an
//! interrupted save leaves either the old document or the new one.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Wait for any in-flight `write_atomic` to finish and hold off new ones
///
/// The guard is taken by every write; an interrupt handler takes it before
/// terminating so the process never stops halfway through a save.
#[must_use]
pub fn hold_writes() -> MutexGuard<'static, ()> {
    WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replace `path` with `content` via write-then-rename
///
/// # Errors
/// Returns the underlying I/O error if the temporary file cannot be written or
/// renamed into place.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let _writing = hold_writes();
    let dir = parent_dir(path);
    fs::create_dir_all(dir)?;

    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("accounts.json");

    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{base}.tmp-{}-{counter}", std::process::id()));
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(mut tmp) => {
                remove_on_error(&candidate, fill(&mut tmp, content))?;
                break candidate;
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };

    remove_on_error(&tmp_path, fs::rename(&tmp_path, path))?;

    // Persist the rename itself where the platform allows opening directories
    if let Ok(dir_handle) = File::open(dir) {
        let _ = dir_handle.sync_all();
    }
    Ok(())
}

fn fill(tmp: &mut File, content: &str) -> io::Result<()> {
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.sync_all()
}

/// Delete the temporary at `tmp` if `result` is an error
fn remove_on_error<T>(tmp: &Path, result: io::Result<T>) -> io::Result<T> {
    if result.is_err() {
        let _ = fs::remove_file(tmp);
    }
    result
}

/// `<dir>/<stem>_<suffix>.json` next to `path`
#[must_use]
pub fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("accounts");
    parent_dir(path).join(format!("{stem}_{suffix}.json"))
}

/// Directory holding `path`, `.` for bare file names
#[must_use]
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
