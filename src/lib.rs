//! trailcopy - copy a directory tree into numbered files with a trailer
//!
//! Every regular file found under an input directory is copied, the fixed
//! trailer `"\nbar"` is appended, and the result is written to
//! `testFile<N>.txt` in a flat output directory. `N` is the file's zero-based
//! position in the walk, so output names say nothing about the source name.
//!
//! The same walk-and-transform runs in two ways:
//!
//! - [`orchestrator::insert_all`] works directly on the host filesystem.
//! - [`abstracted::insert_all_with_fs`] goes through the [`FileSystem`]
//!   trait, which has a host backend ([`RealFileSystem`]) and an in-memory
//!   one ([`MockFileSystem`]).
//!
//! Any failure stops the run at once and comes back as a [`CopyError`].
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use trailcopy::{insert_all_with_fs, MockFileSystem};
//!
//! let fs = MockFileSystem::new();
//! fs.add_file("input/a.txt", "foo");
//!
//! let fs = insert_all_with_fs(fs, Path::new("input"), Path::new("output")).unwrap();
//! assert_eq!(fs.read_file("output/testFile0.txt").unwrap(), b"foo\nbar".to_vec());
//! ```

pub mod abstracted;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod orchestrator;
pub mod transform;
pub mod util;
pub mod walker;

pub use abstracted::insert_all_with_fs;
pub use config::{Backend, ConfigError, TrailcopyConfig};
pub use error::CopyError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use orchestrator::{ensure_output_dir, insert_all, output_file_name, resolve_dir, CopyReport};
pub use transform::{append_trailer, TRAILER};
pub use util::{init_logging, LoggingConfig};
pub use walker::collect_files;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
