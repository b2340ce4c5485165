use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// A newly created playlist file.
///
/// `close` reports failures that would otherwise be lost when the file is dropped.
pub trait PlaylistFile: Write {
    fn close(self: Box<Self>) -> io::Result<()>;
}

impl PlaylistFile for File {
    fn close(self: Box<Self>) -> io::Result<()> {
        self.sync_all()
    }
}

/// Filesystem operations the playlist engine needs for loading and writing.
pub trait PlaylistFs {
    fn read_file(&self, name: &str) -> io::Result<Vec<u8>>;
    fn exists(&self, name: &str) -> bool;
    /// Create `name`, failing if it already exists.
    fn create_file(&self, name: &str) -> io::Result<Box<dyn PlaylistFile>>;
}

/// `PlaylistFs` rooted at the scanned music folder.
///
/// Names are relative to the root; absolute names and `..` are rejected.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let path = Path::new(name);
        let relative = !name.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !relative {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{name:?} must be relative to application root"),
            ));
        }
        Ok(self.root.join(path))
    }
}

impl PlaylistFs for DirFs {
    fn read_file(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(name)?)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name)
            .and_then(fs::symlink_metadata)
            .is_ok()
    }

    fn create_file(&self, name: &str) -> io::Result<Box<dyn PlaylistFile>> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.resolve(name)?)?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn create_file_writes_under_root_and_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let fsys = DirFs::new(dir.path());
        assert!(!fsys.exists("list.m3u"));

        let mut f = fsys.create_file("list.m3u").unwrap();
        f.write_all(b"#EXTM3U\r\n").unwrap();
        f.close().unwrap();

        assert!(fsys.exists("list.m3u"));
        assert_eq!(fsys.read_file("list.m3u").unwrap(), b"#EXTM3U\r\n");
        let err = fsys.create_file("list.m3u").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn paths_outside_root_are_rejected() {
        let dir = tempdir().unwrap();
        let fsys = DirFs::new(dir.path().join("music"));
        for name in ["/e/g/list.m3u", "../list.m3u", "a/../../list.m3u", ""] {
            let err = fsys.create_file(name).err().unwrap();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{name}");
            assert!(!fsys.exists(name));
            assert!(fsys.read_file(name).is_err());
        }
    }

    #[test]
    fn read_file_of_missing_name_fails() {
        let dir = tempdir().unwrap();
        let err = DirFs::new(dir.path()).read_file("NOT_FOUND").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
