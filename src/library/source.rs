use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::PathBuf;

/// An opened candidate file, readable and seekable for tag probing.
pub trait MediaFile: Read + Seek {}

impl<T: Read + Seek> MediaFile for T {}

/// Opens candidate files by their `/`-separated path relative to the scan root.
///
/// Shared by every scan worker, hence `Sync`.
pub trait SongSource: Sync {
    fn open(&self, path: &str) -> io::Result<Box<dyn MediaFile>>;
}

/// `SongSource` over the music folder on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SongSource for DirSource {
    fn open(&self, path: &str) -> io::Result<Box<dyn MediaFile>> {
        let file = File::open(self.root.join(path))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
