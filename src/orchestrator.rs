//! Walk-and-transform over the host filesystem
//!
//! Every file under the input root is copied into the output directory as
//! `testFile<i>.txt`, where `i` is its position in the walk, with the
//! [`TRAILER`](crate::transform::TRAILER) appended. The first failure stops
//! the run; files after it are left unprocessed.

use crate::error::CopyError;
use crate::transform::append_trailer;
use crate::walker::collect_files;
use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

const OUTPUT_PREFIX: &str = "testFile";
const OUTPUT_EXTENSION: &str = "txt";

/// One source file and the output it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes_written: u64,
}

/// Outcome of a fully successful run, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: Vec<CopiedFile>,
}

impl CopyReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes_written).sum()
    }
}

/// Positional output name; unrelated to the source file name.
pub fn output_file_name(index: usize) -> String {
    format!("{}{}.{}", OUTPUT_PREFIX, index, OUTPUT_EXTENSION)
}

/// Makes `path` absolute against the working directory and lexically
/// removes `.` and `..` components. The path itself need not exist, and
/// symlinks are not resolved.
pub fn resolve_dir(path: &Path) -> Result<PathBuf, CopyError> {
    if path.is_absolute() {
        return Ok(clean_path(path));
    }
    let cwd = env::current_dir().map_err(|source| CopyError::PathResolution {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(clean_path(&cwd.join(path)))
}

/// Lexical normalization: `..` pops the previous normal component, is
/// dropped at the root, and is kept when leading a relative path.
fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Creates the output directory if missing. Returns `false` when it was
/// already there.
pub fn ensure_output_dir(path: &Path) -> Result<bool, CopyError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|source| CopyError::CreateDir {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(true)
        }
        Err(source) => Err(CopyError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Copies every file under `input_dir` into `output_dir` with the trailer
/// appended.
///
/// A missing output directory is created first, with its parents, through
/// [`ensure_output_dir`]. Existing outputs with the same positional name
/// are overwritten.
pub fn insert_all(input_dir: &Path, output_dir: &Path) -> Result<CopyReport, CopyError> {
    let start = Instant::now();
    if ensure_output_dir(output_dir)? {
        debug!(path = %output_dir.display(), "Created output directory");
    }

    let sources = collect_files(input_dir)?;
    debug!(count = sources.len(), input = %input_dir.display(), "Collected input files");

    let mut report = CopyReport::default();

    for (index, source) in sources.into_iter().enumerate() {
        let destination = output_dir.join(output_file_name(index));

        let mut reader = fs::File::open(&source).map_err(|e| CopyError::Open {
            path: source.clone(),
            source: e,
        })?;
        let mut writer = fs::File::create(&destination).map_err(|e| CopyError::Create {
            path: destination.clone(),
            source: e,
        })?;

        let bytes_written =
            append_trailer(&mut reader, &mut writer).map_err(|e| CopyError::Copy {
                path: destination.clone(),
                source: e,
            })?;

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            bytes = bytes_written,
            "Copied file"
        );

        report.files.push(CopiedFile {
            source,
            destination,
            bytes_written,
        });
    }

    info!(
        files = report.len(),
        bytes = report.total_bytes(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Host copy complete"
    );

    Ok(report)
}
