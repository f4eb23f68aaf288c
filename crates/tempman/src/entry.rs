//! Ephemeral entries: one temp file or directory and its deletion contract.
//!
//! An entry is created already materialized on disk under a unique name.
//! If it was created with `delete_on_close`, the first `close()` (explicit,
//! or implicit when the entry is dropped) removes it. Later calls do
//! nothing. Removal is best effort; see [`crate::removal`].

use std::fs::{File, Metadata};
use std::path::{Path, PathBuf};

use crate::error::{TempError, TempResult};
use crate::removal;

/// Name prefix for directories created without an explicit prefix
const DEFAULT_DIR_PREFIX: &str = "tmp";

/// What an entry is on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    /// Kind from (non-followed) metadata. Symlinks and special files count
    /// as files: they are removed with a single unlink.
    pub fn of(meta: &Metadata) -> Self {
        if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

/// A temp file or directory that may delete itself on close.
#[derive(Debug)]
pub struct TempEntry {
    path: PathBuf,
    kind: EntryKind,
    delete_on_close: bool,
    /// Open handle, files only; dropped before the path is unlinked
    handle: Option<File>,
    closed: bool,
}

impl TempEntry {
    fn new(path: PathBuf, kind: EntryKind, handle: Option<File>, delete_on_close: bool) -> Self {
        Self { path, kind, delete_on_close, handle, closed: false }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn delete_on_close(&self) -> bool {
        self.delete_on_close
    }

    /// True once `close()` has removed (or tried to remove) the entry.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The open file handle. `None` for directories and after close.
    pub fn file(&self) -> Option<&File> {
        self.handle.as_ref()
    }

    pub fn file_mut(&mut self) -> Option<&mut File> {
        self.handle.as_mut()
    }

    /// Remove the entry from disk if it was created with `delete_on_close`.
    ///
    /// Never fails. Safe to call any number of times; only the first call
    /// does anything.
    pub fn close(&mut self) {
        if !self.delete_on_close || self.closed {
            return;
        }
        self.closed = true;

        // Release the descriptor first: open files cannot be unlinked on
        // every platform.
        drop(self.handle.take());
        removal::remove_best_effort(&self.path, self.kind);
    }
}

impl Drop for TempEntry {
    fn drop(&mut self) {
        self.close();
    }
}

impl AsRef<Path> for TempEntry {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Collects the options for a new entry.
///
/// Defaults: system temp directory, empty prefix, delete on close.
#[derive(Debug, Clone)]
pub struct EntryBuilder<'a> {
    parent: Option<&'a Path>,
    prefix: &'a str,
    delete_on_close: bool,
}

impl Default for EntryBuilder<'_> {
    fn default() -> Self {
        Self { parent: None, prefix: "", delete_on_close: true }
    }
}

impl<'a> EntryBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to create the entry in
    pub fn parent(&mut self, parent: &'a Path) -> &mut Self {
        self.parent = Some(parent);
        self
    }

    /// Leading part of the generated name
    pub fn prefix(&mut self, prefix: &'a str) -> &mut Self {
        self.prefix = prefix;
        self
    }

    pub fn delete_on_close(&mut self, delete_on_close: bool) -> &mut Self {
        self.delete_on_close = delete_on_close;
        self
    }

    fn parent_dir(&self) -> PathBuf {
        match self.parent {
            Some(parent) => parent.to_path_buf(),
            None => std::env::temp_dir(),
        }
    }

    /// Create a new, empty directory with a unique name.
    pub fn dir(&self) -> TempResult<TempEntry> {
        let parent = self.parent_dir();
        let prefix = if self.prefix.is_empty() { DEFAULT_DIR_PREFIX } else { self.prefix };

        let path = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&parent)
            .map_err(|e| TempError::io(&parent, "Failed to create temp directory", e))?
            .keep();

        Ok(TempEntry::new(path, EntryKind::Directory, None, self.delete_on_close))
    }

    /// Create a new, empty file with a unique name, left open.
    pub fn file(&self) -> TempResult<TempEntry> {
        let parent = self.parent_dir();

        let (handle, path) = tempfile::Builder::new()
            .prefix(self.prefix)
            .tempfile_in(&parent)
            .map_err(|e| TempError::io(&parent, "Failed to create temp file", e))?
            .keep()
            .map_err(|e| TempError::io(&parent, "Failed to persist temp file", e.error))?;

        Ok(TempEntry::new(path, EntryKind::File, Some(handle), self.delete_on_close))
    }
}

/// Create a temp directory under `parent` (or the system temp directory).
pub fn create_temp_dir(parent: Option<&Path>, delete_on_close: bool) -> TempResult<TempEntry> {
    let mut builder = EntryBuilder::new();
    if let Some(parent) = parent {
        builder.parent(parent);
    }
    builder.delete_on_close(delete_on_close).dir()
}

/// Create a temp file named `prefix` + random suffix under `parent` (or the
/// system temp directory).
pub fn create_temp_file(parent: Option<&Path>, prefix: &str, delete_on_close: bool) -> TempResult<TempEntry> {
    let mut builder = EntryBuilder::new();
    if let Some(parent) = parent {
        builder.parent(parent);
    }
    builder.prefix(prefix).delete_on_close(delete_on_close).file()
}

/// Temp directory in the system temp location, deleted on close.
pub fn temp_dir() -> TempResult<TempEntry> {
    EntryBuilder::new().dir()
}

/// Temp file in the system temp location, deleted on close.
pub fn temp_file() -> TempResult<TempEntry> {
    EntryBuilder::new().file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn names_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir).unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_new_directory_is_empty() {
        let dir = temp_dir().unwrap();
        assert_eq!(dir.kind(), EntryKind::Directory);
        assert!(dir.path().is_dir());
        assert!(dir.path().is_absolute());
        assert!(names_in(dir.path()).is_empty());
    }

    #[test]
    fn test_directory_deleted_on_drop() {
        let path = {
            let dir = temp_dir().unwrap();
            fs::write(dir.path().join("inner"), b"data").unwrap();
            dir.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_file_deleted_on_drop() {
        let path = {
            let mut file = temp_file().unwrap();
            file.file_mut().unwrap().write_all(b"payload").unwrap();
            assert!(file.path().is_file());
            file.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_close_twice() {
        let mut dir = temp_dir().unwrap();
        dir.close();
        assert!(dir.is_closed());
        assert!(!dir.path().exists());
        dir.close();
        assert!(!dir.path().exists());

        let mut file = temp_file().unwrap();
        file.close();
        file.close();
        assert!(file.file().is_none());
        assert!(!file.path().exists());
    }

    #[test]
    fn test_close_after_external_removal() {
        let mut dir = temp_dir().unwrap();
        fs::remove_dir(dir.path()).unwrap();
        dir.close();
        assert!(dir.is_closed());
    }

    #[test]
    fn test_parent_listing_contains_child() {
        let parent = temp_dir().unwrap();
        let child = create_temp_dir(Some(parent.path()), true).unwrap();

        let name = child.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(DEFAULT_DIR_PREFIX));
        assert_eq!(names_in(parent.path()), vec![name]);
    }

    #[test]
    fn test_file_prefix_and_visibility() {
        let parent = temp_dir().unwrap();
        let file = create_temp_file(Some(parent.path()), "report-", true).unwrap();

        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("report-"));
        assert!(name.len() > "report-".len());
        assert_eq!(names_in(parent.path()), vec![name]);
        assert_eq!(fs::metadata(file.path()).unwrap().len(), 0);
    }

    #[test]
    fn test_default_parent_is_system_temp_for_files_and_dirs() {
        let system_temp = std::env::temp_dir();

        let file = temp_file().unwrap();
        assert_eq!(file.path().parent().unwrap(), system_temp.as_path());

        let file = create_temp_file(None, "defaulted", true).unwrap();
        assert_eq!(file.path().parent().unwrap(), system_temp.as_path());

        let dir = create_temp_dir(None, true).unwrap();
        assert_eq!(dir.path().parent().unwrap(), system_temp.as_path());
    }

    #[test]
    fn test_keep_on_close() {
        let parent = temp_dir().unwrap();
        let path = {
            let mut dir = create_temp_dir(Some(parent.path()), false).unwrap();
            dir.close();
            assert!(!dir.is_closed());
            dir.path().to_path_buf()
        };
        assert!(path.is_dir());

        let kept = create_temp_file(Some(parent.path()), "", false).unwrap();
        let kept_path = kept.path().to_path_buf();
        drop(kept);
        assert!(kept_path.is_file());
    }

    #[test]
    fn test_missing_parent_fails() {
        let parent = temp_dir().unwrap();
        let missing = parent.path().join("does/not/exist");

        let err = create_temp_dir(Some(&missing), true).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));

        let err = create_temp_file(Some(&missing), "x", true).unwrap_err();
        assert!(matches!(err, TempError::Filesystem { .. }));
    }

    #[test]
    fn test_builder_options() {
        let parent = temp_dir().unwrap();
        let entry = EntryBuilder::new()
            .parent(parent.path())
            .prefix("built")
            .delete_on_close(false)
            .file()
            .unwrap();

        assert!(!entry.delete_on_close());
        assert_eq!(entry.kind(), EntryKind::File);
        assert_eq!(entry.path().parent().unwrap(), parent.path());
    }
}
