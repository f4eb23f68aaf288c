//! Best-effort removal of temp entries
//!
//! Removal is advisory: it never returns an error. The strategy is picked
//! from the kind the caller expects (recursive for directories, single
//! unlink for files). If that fails because the entry on disk is the other
//! kind, the other strategy is tried once. Anything still failing is
//! swallowed and reported as [`Removal::Failed`].

use std::fs;
use std::io;
use std::path::Path;

use crate::entry::EntryKind;

/// Outcome of a best-effort removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The entry was removed
    Removed,
    /// Nothing was there to remove
    Missing,
    /// Removal failed and was swallowed
    Failed(io::ErrorKind),
}

fn remove_as(path: &Path, kind: EntryKind) -> io::Result<()> {
    match kind {
        EntryKind::Directory => fs::remove_dir_all(path),
        EntryKind::File => fs::remove_file(path),
    }
}

/// Kind of the entry currently at `path`, without following symlinks.
pub fn kind_on_disk(path: &Path) -> io::Result<EntryKind> {
    fs::symlink_metadata(path).map(|meta| EntryKind::of(&meta))
}

/// Remove `path`, expecting it to be `expected`, swallowing failures.
pub fn remove_best_effort(path: &Path, expected: EntryKind) -> Removal {
    let err = match remove_as(path, expected) {
        Ok(()) => return Removal::Removed,
        Err(e) => e,
    };

    if err.kind() == io::ErrorKind::NotFound {
        return Removal::Missing;
    }

    let outcome = match kind_on_disk(path) {
        Ok(actual) if actual != expected => match remove_as(path, actual) {
            Ok(()) => return Removal::Removed,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Removal::Missing,
            Err(e) => e,
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Removal::Missing,
        _ => err,
    };

    tracing::debug!(
        path = %path.display(),
        error = %outcome,
        "Ignoring failed removal of temp entry"
    );
    Removal::Failed(outcome.kind())
}
