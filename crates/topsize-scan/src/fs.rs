//! Filesystem primitives consumed by the walker.

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// What kind of node a directory child is, as far as traversal cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// A directory the walker should descend into.
    Directory,
    /// A regular file.
    File,
    /// Anything else, including symbolic links to directories.
    Other,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirChild {
    /// File name of the child, without any leading path.
    pub name: OsString,
    /// Node kind.
    pub kind: ChildKind,
}

impl DirChild {
    /// Create a new child record.
    pub fn new(name: impl Into<OsString>, kind: ChildKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Whether the walker should recurse into this child.
    pub fn is_dir(&self) -> bool {
        self.kind == ChildKind::Directory
    }
}

/// Source of directory listings and sizes.
///
/// Listing must release any handle it opens before returning, so a deep
/// walk never holds more than one directory open.
pub trait FileSystem {
    /// List the immediate children of `path`.
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>>;

    /// Size in bytes reported by the metadata of `path`.
    fn size_of(&self, path: &Path) -> io::Result<u64>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirChild>> {
        let mut children = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(dir = %path.display(), "skipping unreadable directory entry: {err}");
                    continue;
                }
            };
            // The entry's own type does not follow symlinks, so linked
            // directories are observed but never descended.
            let kind = match entry.file_type() {
                Ok(ft) if ft.is_dir() => ChildKind::Directory,
                Ok(ft) if ft.is_file() => ChildKind::File,
                _ => ChildKind::Other,
            };
            children.push(DirChild::new(entry.file_name(), kind));
        }
        Ok(children)
    }

    fn size_of(&self, path: &Path) -> io::Result<u64> {
        std::fs::metadata(path).map(|m| m.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_children_kinds() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("file.txt"), "hello").unwrap();

        let mut children = OsFileSystem.list_children(temp.path()).unwrap();
        children.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            children,
            vec![
                DirChild::new("file.txt", ChildKind::File),
                DirChild::new("sub", ChildKind::Directory),
            ]
        );
    }

    #[test]
    fn test_list_children_of_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain");
        fs::write(&file, "x").unwrap();

        assert!(OsFileSystem.list_children(&file).is_err());
    }

    #[test]
    fn test_size_of() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("five");
        fs::write(&file, "12345").unwrap();

        assert_eq!(OsFileSystem.size_of(&file).unwrap(), 5);
        assert!(OsFileSystem.size_of(&temp.path().join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_is_not_a_directory_child() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();

        let children = OsFileSystem.list_children(temp.path()).unwrap();
        let link = children.iter().find(|c| c.name == "link").unwrap();
        assert_eq!(link.kind, ChildKind::Other);
    }
}
