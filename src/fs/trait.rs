//! FileSystem trait definition

use crate::error::CopyError;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Metadata about a file
#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub size: u64,
    pub file_type: FileType,
}

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

impl FileType {
    pub fn is_dir(self) -> bool {
        self == FileType::Directory
    }
}

impl FileMetadata {
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}

/// Callback invoked by [`FileSystem::walk`] for every visited entry.
pub type WalkFn<'a> = dyn FnMut(&Path, FileType) -> Result<(), CopyError> + 'a;

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Open an existing file for reading
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>>;

    /// Create a file for writing, truncating it if it exists.
    /// The parent directory must already exist.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Get metadata, following symlinks
    fn metadata(&self, path: &Path) -> io::Result<FileMetadata>;

    /// List directory contents, sorted by name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn exists(&self, path: &Path) -> bool {
        self.metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    /// Visit `root` and everything beneath it in lexical order.
    ///
    /// The root is resolved through symlinks; entries below it are reported
    /// with their own type and symlinked directories are not descended.
    /// An error returned by `visit` stops the walk and is passed through
    /// unchanged. Listing failures surface as [`CopyError::ListDir`].
    fn walk(&self, root: &Path, visit: &mut WalkFn<'_>) -> Result<(), CopyError> {
        let meta = self.metadata(root).map_err(|source| CopyError::ListDir {
            path: root.to_path_buf(),
            source,
        })?;

        visit(root, meta.file_type)?;

        if meta.is_dir() {
            walk_children(self, root, visit)?;
        }

        Ok(())
    }
}

fn walk_children<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    visit: &mut WalkFn<'_>,
) -> Result<(), CopyError> {
    let entries = fs.read_dir(dir).map_err(|source| CopyError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        visit(entry.path(), entry.file_type())?;
        if entry.file_type().is_dir() {
            walk_children(fs, entry.path(), &mut *visit)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_metadata_is_file() {
        let meta = FileMetadata {
            size: 100,
            file_type: FileType::File,
        };
        assert!(meta.is_file());
        assert!(!meta.is_dir());
    }

    #[test]
    fn test_file_metadata_is_dir() {
        let meta = FileMetadata {
            size: 0,
            file_type: FileType::Directory,
        };
        assert!(meta.is_dir());
        assert!(!meta.is_file());
    }

    #[test]
    fn test_symlink_is_not_dir() {
        assert!(!FileType::Symlink.is_dir());
        assert!(FileType::Directory.is_dir());
    }

    #[test]
    fn test_dir_entry() {
        let entry = DirEntry {
            path: PathBuf::from("/test/file.txt"),
            name: "file.txt".to_string(),
            file_type: FileType::File,
        };
        assert_eq!(entry.path(), Path::new("/test/file.txt"));
        assert_eq!(entry.file_name(), "file.txt");
        assert_eq!(entry.file_type(), FileType::File);
    }
}
