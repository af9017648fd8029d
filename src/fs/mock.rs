use super::{DirEntry, FileMetadata, FileSystem, FileType};
use crate::error::CopyError;
use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<Vec<u8>>,
    pub file_type: FileType,
}

impl MockEntry {
    fn dir() -> Self {
        Self {
            content: None,
            file_type: FileType::Directory,
        }
    }

    fn file(content: Vec<u8>) -> Self {
        Self {
            content: Some(content),
            file_type: FileType::File,
        }
    }
}

type Tree = BTreeMap<PathBuf, MockEntry>;

/// In-memory filesystem. Cloning shares the same tree.
#[derive(Debug, Clone)]
pub struct MockFileSystem {
    files: Arc<RwLock<Tree>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            files: Arc::new(RwLock::new(BTreeMap::new())),
            root,
        };
        let root = fs.root.clone();
        fs.add_dir(root);
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_tree();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(path, MockEntry::file(content.as_ref().to_vec()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.write_tree();
        Self::ensure_parents(&mut files, &path);
    }

    /// Contents of a file, or `None` for a missing path or a directory.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let path = self.normalize_path(path.as_ref());
        self.read_tree().get(&path).and_then(|e| e.content.clone())
    }

    /// Every file strictly beneath `dir`, in byte-wise path order.
    ///
    /// The order is not numeric: `testFile10.txt` sorts before
    /// `testFile2.txt`. Look outputs up by name when the index matters.
    pub fn files_under(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = self.normalize_path(dir.as_ref());
        self.read_tree()
            .iter()
            .filter(|(p, e)| e.file_type == FileType::File && p.starts_with(&dir) && **p != dir)
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Copies the tree under `root` on `source` into this filesystem at the
    /// same paths. Returns the number of files loaded.
    pub fn load_from<S: FileSystem>(&self, source: &S, root: &Path) -> Result<usize, CopyError> {
        let mut loaded = 0;
        source.walk(root, &mut |path, file_type| {
            if file_type.is_dir() {
                self.add_dir(path);
                return Ok(());
            }
            let mut content = Vec::new();
            source
                .open(path)
                .and_then(|mut r| r.read_to_end(&mut content))
                .map_err(|e| CopyError::Open {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            self.add_file(path, content);
            loaded += 1;
            Ok(())
        })?;
        Ok(loaded)
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn read_tree(&self) -> RwLockReadGuard<'_, Tree> {
        self.files.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tree(&self) -> RwLockWriteGuard<'_, Tree> {
        self.files.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_parents(files: &mut Tree, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert_with(MockEntry::dir);
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("Path not found: {}", path.display()),
    )
}

fn not_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("Not a directory: {}", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("Is a directory: {}", path.display()),
    )
}

/// Writer that appends straight into the shared tree.
struct MockWriter {
    files: Arc<RwLock<Tree>>,
    path: PathBuf,
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        let entry = files
            .get_mut(&self.path)
            .ok_or_else(|| not_found(&self.path))?;
        match entry.content.as_mut() {
            Some(content) => {
                content.extend_from_slice(buf);
                Ok(buf.len())
            }
            None => Err(is_a_directory(&self.path)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FileSystem for MockFileSystem {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let path = self.normalize_path(path);
        let files = self.read_tree();
        let entry = files.get(&path).ok_or_else(|| not_found(&path))?;
        let content = entry.content.clone().ok_or_else(|| is_a_directory(&path))?;
        Ok(Box::new(Cursor::new(content)))
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let path = self.normalize_path(path);
        let mut files = self.write_tree();

        if let Some(parent) = path.parent() {
            match files.get(parent) {
                Some(e) if e.file_type.is_dir() => {}
                Some(_) => return Err(not_a_directory(parent)),
                None => return Err(not_found(parent)),
            }
        }
        if files.get(&path).is_some_and(|e| e.file_type.is_dir()) {
            return Err(is_a_directory(&path));
        }

        files.insert(path.clone(), MockEntry::file(Vec::new()));

        Ok(Box::new(MockWriter {
            files: Arc::clone(&self.files),
            path,
        }))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = self.normalize_path(path);
        let mut files = self.write_tree();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if files.get(&current).is_some_and(|e| !e.file_type.is_dir()) {
                return Err(not_a_directory(&current));
            }
        }

        Self::ensure_parents(&mut files, &path);
        Ok(())
    }

    fn metadata(&self, path: &Path) -> io::Result<FileMetadata> {
        let path = self.normalize_path(path);
        let files = self.read_tree();
        let entry = files.get(&path).ok_or_else(|| not_found(&path))?;

        Ok(FileMetadata {
            size: entry.content.as_ref().map(|c| c.len() as u64).unwrap_or(0),
            file_type: entry.file_type,
        })
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let files = self.read_tree();

        match files.get(&path) {
            Some(e) if e.file_type.is_dir() => {}
            Some(_) => return Err(not_a_directory(&path)),
            None => return Err(not_found(&path)),
        }

        // BTreeMap order keeps siblings sorted by name
        let entries = files
            .iter()
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .map(|(p, e)| DirEntry {
                path: p.clone(),
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                file_type: e.file_type,
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_copies_tree() {
        let source = MockFileSystem::with_root(PathBuf::from("/src"));
        source.add_file("in/a.txt", "a");
        source.add_file("in/sub/b.txt", "b");
        source.add_dir("in/empty");

        let target = MockFileSystem::with_root(PathBuf::from("/"));
        let loaded = target.load_from(&source, Path::new("/src/in")).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(target.read_file("/src/in/sub/b.txt").unwrap(), b"b".to_vec());
        assert!(target.is_dir(Path::new("/src/in/empty")));
    }

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello");

        assert!(fs.exists(Path::new("/mock/test.txt")));
        assert!(fs.is_file(Path::new("/mock/test.txt")));
    }

    #[test]
    fn test_add_dir() {
        let fs = MockFileSystem::new();
        fs.add_dir("subdir");

        assert!(fs.exists(Path::new("/mock/subdir")));
        assert!(fs.is_dir(Path::new("/mock/subdir")));
    }

    #[test]
    fn test_parent_directories_created() {
        let fs = MockFileSystem::new();
        fs.add_file("a/b/c/file.txt", "content");

        assert!(fs.is_dir(Path::new("/mock/a")));
        assert!(fs.is_dir(Path::new("/mock/a/b")));
        assert!(fs.is_dir(Path::new("/mock/a/b/c")));
        assert!(fs.is_file(Path::new("/mock/a/b/c/file.txt")));
    }

    #[test]
    fn test_with_root() {
        let fs = MockFileSystem::with_root(PathBuf::from("/repo"));
        fs.add_file("src/main.rs", "fn main() {}");

        assert!(fs.is_dir(Path::new("/repo")));
        assert_eq!(
            fs.read_file("/repo/src/main.rs").unwrap(),
            b"fn main() {}".to_vec()
        );
    }

    #[test]
    fn test_open_reads_content() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello world");

        let mut content = String::new();
        fs.open(Path::new("test.txt"))
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello world");
    }

    #[test]
    fn test_open_missing_is_not_found() {
        let fs = MockFileSystem::new();
        let err = fs.open(Path::new("missing.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_open_directory_fails() {
        let fs = MockFileSystem::new();
        fs.add_dir("subdir");
        assert!(fs.open(Path::new("subdir")).is_err());
    }

    #[test]
    fn test_create_writes_through() {
        let fs = MockFileSystem::new();
        let mut writer = fs.create(Path::new("out.txt")).unwrap();

        writer.write_all(b"part one, ").unwrap();
        assert_eq!(fs.read_file("out.txt").unwrap(), b"part one, ".to_vec());

        writer.write_all(b"part two").unwrap();
        assert_eq!(fs.read_file("out.txt").unwrap(), b"part one, part two".to_vec());
    }

    #[test]
    fn test_create_truncates_existing() {
        let fs = MockFileSystem::new();
        fs.add_file("out.txt", "old content");

        fs.create(Path::new("out.txt")).unwrap().write_all(b"new").unwrap();

        assert_eq!(fs.read_file("out.txt").unwrap(), b"new".to_vec());
    }

    #[test]
    fn test_create_requires_parent() {
        let fs = MockFileSystem::new();
        let err = fs.create(Path::new("nowhere/out.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_create_over_directory_fails() {
        let fs = MockFileSystem::new();
        fs.add_dir("taken");
        assert!(fs.create(Path::new("taken")).is_err());
    }

    #[test]
    fn test_create_dir_all() {
        let fs = MockFileSystem::new();
        fs.create_dir_all(Path::new("x/y")).unwrap();
        assert!(fs.is_dir(Path::new("/mock/x/y")));

        // already present
        fs.create_dir_all(Path::new("x/y")).unwrap();
    }

    #[test]
    fn test_create_dir_all_through_file_fails() {
        let fs = MockFileSystem::new();
        fs.add_file("plain", "x");
        assert!(fs.create_dir_all(Path::new("plain/sub")).is_err());
    }

    #[test]
    fn test_metadata() {
        let fs = MockFileSystem::new();
        fs.add_file("test.txt", "hello");

        let meta = fs.metadata(Path::new("/mock/test.txt")).unwrap();
        assert!(meta.is_file());
        assert_eq!(meta.size, 5);
    }

    #[test]
    fn test_read_dir_sorted_and_shallow() {
        let fs = MockFileSystem::new();
        fs.add_file("zeta.txt", "z");
        fs.add_dir("subdir");
        fs.add_file("alpha.txt", "a");
        fs.add_file("subdir/nested.txt", "nested");

        let entries = fs.read_dir(Path::new("/mock")).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.file_name()).collect();

        assert_eq!(names, vec!["alpha.txt", "subdir", "zeta.txt"]);
    }

    #[test]
    fn test_read_dir_missing() {
        let fs = MockFileSystem::new();
        let err = fs.read_dir(Path::new("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_files_under() {
        let fs = MockFileSystem::new();
        fs.add_file("out/b.txt", "b");
        fs.add_file("out/a.txt", "a");
        fs.add_file("other/c.txt", "c");

        assert_eq!(
            fs.files_under("out"),
            vec![PathBuf::from("/mock/out/a.txt"), PathBuf::from("/mock/out/b.txt")]
        );
    }

    #[test]
    fn test_files_under_is_bytewise_not_numeric() {
        let fs = MockFileSystem::new();
        for i in [0, 1, 2, 10] {
            fs.add_file(format!("out/testFile{}.txt", i), "x");
        }

        let names: Vec<String> = fs
            .files_under("out")
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(
            names,
            vec!["testFile0.txt", "testFile1.txt", "testFile10.txt", "testFile2.txt"]
        );
    }

    #[test]
    fn test_walk_order() {
        let fs = MockFileSystem::new();
        fs.add_file("in/b.txt", "b");
        fs.add_file("in/a/inner.txt", "inner");
        fs.add_file("in/c.txt", "c");

        let mut visited = Vec::new();
        fs.walk(Path::new("in"), &mut |path, ft| {
            visited.push((path.to_path_buf(), ft));
            Ok(())
        })
        .unwrap();

        assert_eq!(
            visited,
            vec![
                (PathBuf::from("/mock/in"), FileType::Directory),
                (PathBuf::from("/mock/in/a"), FileType::Directory),
                (PathBuf::from("/mock/in/a/inner.txt"), FileType::File),
                (PathBuf::from("/mock/in/b.txt"), FileType::File),
                (PathBuf::from("/mock/in/c.txt"), FileType::File),
            ]
        );
    }

    #[test]
    fn test_walk_stops_on_callback_error() {
        let fs = MockFileSystem::new();
        fs.add_file("in/a.txt", "a");
        fs.add_file("in/b.txt", "b");

        let mut seen = 0;
        let err = fs
            .walk(Path::new("in"), &mut |path, ft| {
                if ft.is_dir() {
                    return Ok(());
                }
                seen += 1;
                Err(CopyError::Open {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::Other, "stop"),
                })
            })
            .unwrap_err();

        assert_eq!(seen, 1);
        assert_eq!(err.path(), Path::new("/mock/in/a.txt"));
    }

    #[test]
    fn test_clone_shares_tree() {
        let fs = MockFileSystem::new();
        let other = fs.clone();
        other.add_file("shared.txt", "same");
        assert!(fs.is_file(Path::new("shared.txt")));
    }
}
