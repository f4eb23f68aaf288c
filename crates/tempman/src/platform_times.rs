//! Platform-specific access to entry timestamps
//!
//! Reclamation decides staleness from `max(accessed, modified)`. Not every
//! platform or filesystem records access times; `std::fs::Metadata` reports
//! that as an error, and the modification time is used alone.

use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

/// The timestamp an entry's age is measured from: the later of its last
/// access and last modification.
pub fn reference_time(meta: &Metadata) -> io::Result<SystemTime> {
    let modified = meta.modified()?;
    Ok(match meta.accessed() {
        Ok(accessed) => accessed.max(modified),
        Err(_) => modified,
    })
}
