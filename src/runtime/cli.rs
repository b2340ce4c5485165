use std::path::PathBuf;

use clap::Parser;

use crate::config::LibrarySettings;

/// Build m3u playlists from the audio files under a folder.
#[derive(Debug, Parser)]
#[command(name = "m3u-builder", version, about, long_about = None)]
pub struct Cli {
    /// Music folder to scan. Playlist paths are relative to it.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Load md5sums for songs
    #[arg(long)]
    pub md5: bool,

    /// Number of threads reading tags
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

impl Cli {
    /// Flags win over config file and environment values.
    pub fn apply(&self, library: &mut LibrarySettings) {
        if self.md5 {
            library.hash = true;
        }
        if let Some(workers) = self.workers {
            library.workers = workers;
        }
    }
}
