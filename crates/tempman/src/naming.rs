//! Logical names for entries under a root
//!
//! A file created for logical name `name` is physically called
//! `name__<random suffix>`. Mapping back splits the filename on the *last*
//! `__`; everything before it is the logical name. A name that itself
//! contains `__` therefore round-trips only if the random suffix does not,
//! which the generated suffixes never do.
//!
//! The on-disk listing is the source of truth, so the index is rebuilt from
//! a directory scan on every lookup.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::error::{TempError, TempResult};

/// Token between the logical name and the unique suffix.
pub const SEPARATOR: &str = "__";

/// Filename prefix used when creating a file for logical `name`.
pub fn physical_prefix(name: &str) -> String {
    format!("{}{}", name, SEPARATOR)
}

/// Logical name of a physical filename, or `None` if it carries no separator.
pub fn logical_name(file_name: &str) -> Option<&str> {
    file_name.rsplit_once(SEPARATOR).map(|(logical, _suffix)| logical)
}

/// Immediate children of a directory grouped by logical name.
#[derive(Debug, Default)]
pub struct NameIndex {
    by_name: HashMap<String, Vec<PathBuf>>,
}

impl NameIndex {
    /// Build the index from the current contents of `dir`.
    ///
    /// Children whose names are not UTF-8 or carry no separator are skipped.
    /// Paths under each name are sorted.
    pub fn scan(dir: &Path) -> TempResult<Self> {
        let entries = fs::read_dir(dir)
            .map_err(|e| TempError::io(dir, "Failed to list root directory", e))?;

        let mut by_name: HashMap<String, Vec<PathBuf>> = HashMap::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else { continue };
            if let Some(logical) = logical_name(file_name) {
                by_name.entry(logical.to_string()).or_default().push(entry.path());
            }
        }
        for paths in by_name.values_mut() {
            paths.sort();
        }

        tracing::trace!(dir = %dir.display(), names = by_name.len(), "Scanned logical names");
        Ok(Self { by_name })
    }

    /// All physical paths for `name`.
    pub fn paths(&self, name: &str) -> &[PathBuf] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// One physical path for `name`: the lexicographically smallest.
    pub fn first(&self, name: &str) -> Option<&Path> {
        self.paths(name).first().map(PathBuf::as_path)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}
