use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a copy run. Every variant aborts the whole run.
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to resolve path {path}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to copy into {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    pub fn path(&self) -> &Path {
        match self {
            CopyError::PathResolution { path, .. }
            | CopyError::ListDir { path, .. }
            | CopyError::CreateDir { path, .. }
            | CopyError::Open { path, .. }
            | CopyError::Create { path, .. }
            | CopyError::Copy { path, .. } => path,
        }
    }
}
