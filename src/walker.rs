//! Recursive listing of the host filesystem

use crate::error::CopyError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Lists every non-directory entry under `root` in file-name order.
///
/// Directories are descended into but never returned. A root that is a
/// symlink to a directory is followed; symlinks below it are not. The first
/// listing failure aborts the walk.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>, CopyError> {
    let meta = fs::metadata(root).map_err(|source| CopyError::ListDir {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(CopyError::ListDir {
            path: root.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, "not a directory"),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            CopyError::ListDir {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop")),
            }
        })?;

        if entry.depth() == 0 {
            continue;
        }

        if entry.file_type().is_dir() {
            trace!(path = %entry.path().display(), "Descending");
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}
