//! Managed roots: a long-lived directory that hands out temp entries.
//!
//! Every create call first runs a reclamation sweep (when a timeout is
//! configured), then allocates the new entry under the root. The sweep
//! always finishes before the allocation, so a new entry is never swept by
//! the call that created it.
//!
//! Entries made by a root keep their files on close by default; the sweep
//! is what reclaims them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{Config, TotalSeconds};
use crate::entry::{self, EntryKind, TempEntry};
use crate::error::{TempError, TempResult};
use crate::naming::{physical_prefix, NameIndex};
use crate::reclaim::{self, SweepReport};
use crate::removal::kind_on_disk;

/// A directory under which temp entries are created and reclaimed.
///
/// All methods take `&self`. There is no locking: two roots (or two
/// processes) on the same directory may race, and that is accepted.
#[derive(Debug, Clone)]
pub struct Root {
    /// Absolute path of the root directory; never removed by the root
    path: PathBuf,
    /// Reclamation age, `None` never reclaims
    timeout: Option<Duration>,
}

impl Root {
    /// Open a root at `path`, creating it and any missing parents.
    pub fn open<P: AsRef<Path>>(path: P, config: Config) -> TempResult<Self> {
        let timeout = config.timeout;

        let path = path.as_ref();
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| TempError::io(path, "Failed to resolve relative root", e))?
                .join(path)
        };

        fs::create_dir_all(&path)
            .map_err(|e| TempError::io(&path, "Failed to create root directory", e))?;

        Ok(Self { path, timeout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Sweep, then create a directory under the root.
    pub fn create_temp_dir(&self, delete_on_close: bool) -> TempResult<TempEntry> {
        self.cleanup();
        entry::create_temp_dir(Some(&self.path), delete_on_close)
    }

    /// Sweep, then create a file named `<prefix>__<suffix>` under the root.
    pub fn create_temp_file(&self, prefix: &str, delete_on_close: bool) -> TempResult<TempEntry> {
        self.cleanup();
        entry::create_temp_file(Some(&self.path), &physical_prefix(prefix), delete_on_close)
    }

    /// Replace whatever exists for logical `name` with a fresh, empty file
    /// and return its path.
    pub fn make_file(&self, name: &str) -> TempResult<PathBuf> {
        self.delete_file(name)?;
        let entry = self.create_temp_file(name, false)?;
        Ok(entry.path().to_path_buf())
    }

    /// Path of an entry for logical `name`. With several candidates the
    /// lexicographically smallest path is returned.
    pub fn get_file_path(&self, name: &str) -> TempResult<Option<PathBuf>> {
        let index = NameIndex::scan(&self.path)?;
        Ok(index.first(name).map(Path::to_path_buf))
    }

    pub fn exists(&self, name: &str) -> TempResult<bool> {
        Ok(NameIndex::scan(&self.path)?.contains(name))
    }

    /// Remove every entry for logical `name`. Nothing to remove is not an error.
    pub fn delete_file(&self, name: &str) -> TempResult<()> {
        let index = NameIndex::scan(&self.path)?;

        for path in index.paths(name) {
            let result = match kind_on_disk(path) {
                Ok(EntryKind::Directory) => fs::remove_dir_all(path),
                Ok(EntryKind::File) => fs::remove_file(path),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(TempError::io(path, "Failed to delete named entry", e)),
            }
        }

        Ok(())
    }

    /// Run one reclamation sweep if a timeout is configured.
    pub fn cleanup(&self) -> SweepReport {
        match self.timeout {
            Some(timeout) => reclaim::sweep(&self.path, timeout),
            None => SweepReport::default(),
        }
    }
}

/// Open a root that never reclaims.
pub fn root<P: AsRef<Path>>(path: P) -> TempResult<Root> {
    Root::open(path, Config::never())
}

/// Open a root that reclaims children older than `timeout` (seconds,
/// `Duration` or `Span`).
pub fn root_with_timeout<P: AsRef<Path>, T: TotalSeconds>(path: P, timeout: T) -> TempResult<Root> {
    Root::open(path, Config::with_timeout(timeout)?)
}
