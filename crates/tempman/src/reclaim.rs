//! Reclamation — age-based removal of stale entries under a root
//!
//! A sweep looks only at the immediate children of the root. Each child's
//! age is measured from `max(accessed, modified)` of the child itself; the
//! contents of a child directory are never inspected, so an old file inside
//! a fresh directory survives along with it.
//!
//! Sweep steps:
//! 1. limit = now - timeout
//! 2. List the root's children
//! 3. Stat each child without following symlinks
//! 4. Remove children whose reference time is older than the limit
//!
//! Every failure along the way is swallowed. A child that cannot be removed
//! stays in place and is retried on the next sweep.

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::entry::EntryKind;
use crate::platform_times::reference_time;
use crate::removal::{remove_best_effort, Removal};

/// Result of one reclamation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Children of the root looked at
    pub examined: usize,
    /// Stale children removed
    pub removed: usize,
    /// Stale children that could not be removed
    pub failed: usize,
}

impl SweepReport {
    /// Children left in place (fresh, unreadable or failed).
    pub fn retained(&self) -> usize {
        self.examined.saturating_sub(self.removed)
    }
}

/// Whether a child with this metadata is older than `limit`.
///
/// Children whose timestamps cannot be read are never stale.
pub fn is_stale(meta: &fs::Metadata, limit: SystemTime) -> bool {
    match reference_time(meta) {
        Ok(reference) => reference < limit,
        Err(_) => false,
    }
}

/// Remove every child of `root` not accessed or modified within `timeout`.
pub fn sweep(root: &Path, timeout: Duration) -> SweepReport {
    sweep_at(root, timeout, SystemTime::now())
}

/// [`sweep`] with an explicit notion of "now".
pub fn sweep_at(root: &Path, timeout: Duration, now: SystemTime) -> SweepReport {
    let mut report = SweepReport::default();

    // Limit not representable as a SystemTime: nothing can be older.
    let Some(limit) = now.checked_sub(timeout) else {
        return report;
    };

    let children = match fs::read_dir(root) {
        Ok(children) => children,
        Err(e) => {
            tracing::debug!(root = %root.display(), error = %e, "Skipping sweep of unreadable root");
            return report;
        }
    };

    for child in children.flatten() {
        let path = child.path();
        let Ok(meta) = fs::symlink_metadata(&path) else { continue };
        report.examined += 1;

        if !is_stale(&meta, limit) {
            continue;
        }

        match remove_best_effort(&path, EntryKind::of(&meta)) {
            Removal::Removed | Removal::Missing => {
                report.removed += 1;
                tracing::debug!(path = %path.display(), "Reclaimed stale temp entry");
            }
            Removal::Failed(_) => report.failed += 1,
        }
    }

    report
}
