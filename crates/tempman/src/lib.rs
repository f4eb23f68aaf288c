//! tempman — scoped temporary files and directories
//!
//! Create temp files and directories that remove themselves when closed or
//! dropped, and managed roots that hand out entries under one directory
//! while reclaiming anything left there longer than a timeout.
//!
//! # Architecture
//!
//! - **Entries**: one file or directory with a delete-on-close flag;
//!   dropping the entry closes it
//! - **Roots**: a directory that sweeps stale children before every create
//! - **Logical names**: `name__<suffix>` files looked up by `name`
//!
//! Cleanup is best effort everywhere: removal failures are swallowed and a
//! leftover entry is picked up by a later sweep.
//!
//! ```no_run
//! use tempman::{root_with_timeout, Span};
//!
//! let root = root_with_timeout("/var/tmp/myapp", Span::hours(1))?;
//! let scratch = root.create_temp_dir(true)?;
//! std::fs::write(scratch.path().join("out.txt"), b"data")?;
//! // dropping `scratch` removes the directory
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod naming;
pub mod platform_times;
pub mod reclaim;
pub mod removal;
pub mod root;

// Re-export key types for convenience
pub use config::{Config, Span, TotalSeconds};
pub use entry::{create_temp_dir, create_temp_file, temp_dir, temp_file, EntryBuilder, EntryKind, TempEntry};
pub use error::{TempError, TempResult};
pub use naming::SEPARATOR;
pub use reclaim::SweepReport;
pub use root::{root, root_with_timeout, Root};
