//! The playlist session: catalog, current selection and the tracks being edited.
//!
//! Every operation takes the raw argument text typed by the user. Indices are
//! 1-based. Failures leave the session untouched and are returned as
//! `PlaylistError` for the caller to print.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::library::{Song, catalog_order};

use super::fs::PlaylistFs;
use super::{m3u, table};

/// Playlist file extension accepted by `write`.
pub const EXTENSION: &str = ".m3u";

/// Unresolved paths printed individually by `load` before the rest are summarised.
pub const MAX_LOAD_ERRORS: usize = 10;

/// A playlist entry: a copy of a song plus its own display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub song: Song,
    pub display: String,
}

impl From<Song> for Track {
    fn from(song: Song) -> Self {
        Self {
            display: song.display(),
            song,
        }
    }
}

/// Which command failed, shown as `Error (<action>): ...`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    AddTrack,
    RemoveTrack,
    MoveTrack,
    RenameTrack,
    LoadPlaylist,
    WritePlaylist,
    Output,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::AddTrack => "add track",
            Action::RemoveTrack => "remove track",
            Action::MoveTrack => "move track",
            Action::RenameTrack => "rename track",
            Action::LoadPlaylist => "load playlist",
            Action::WritePlaylist => "write playlist",
            Action::Output => "output",
        })
    }
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("no selection")]
    NoSelection,

    #[error("no tracks")]
    NoTracks(Action),

    #[error("reading {kind} id {arg:?}, must be in (1-{max})")]
    BadIndex {
        action: Action,
        kind: &'static str,
        arg: String,
        max: usize,
    },

    #[error("wanted {usage}")]
    Usage { action: Action, usage: &'static str },

    #[error("loading playlist file {path:?}: {source}")]
    Read { path: String, source: io::Error },

    #[error("path must end with .m3u, got {0:?}")]
    BadPath(String),

    #[error("{0:?} already exists")]
    Exists(String),

    #[error("creating {path:?}: {source}")]
    Create { path: String, source: io::Error },

    #[error("writing {path:?}: {source}")]
    Write { path: String, source: io::Error },

    #[error("closing {path:?}: {source}")]
    Close { path: String, source: io::Error },

    #[error(transparent)]
    Output(#[from] io::Error),
}

impl PlaylistError {
    pub fn action(&self) -> Action {
        match self {
            PlaylistError::NoSelection => Action::AddTrack,
            PlaylistError::NoTracks(action)
            | PlaylistError::BadIndex { action, .. }
            | PlaylistError::Usage { action, .. } => *action,
            PlaylistError::Read { .. } => Action::LoadPlaylist,
            PlaylistError::BadPath(_)
            | PlaylistError::Exists(_)
            | PlaylistError::Create { .. }
            | PlaylistError::Write { .. }
            | PlaylistError::Close { .. } => Action::WritePlaylist,
            PlaylistError::Output(_) => Action::Output,
        }
    }
}

/// Result of a `load` that found the playlist file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub unresolved: Vec<String>,
}

/// Owns all session state. Output (tables and load diagnostics) goes to `out`.
pub struct Playlist<W: Write> {
    pub(super) catalog: Vec<Song>,
    pub(super) selection: Vec<Song>,
    pub(super) tracks: Vec<Track>,
    fs: Box<dyn PlaylistFs>,
    out: W,
    show_hash: bool,
}

/// Parse a 1-based index into `0..len`.
fn parse_index(arg: &str, len: usize) -> Option<usize> {
    arg.parse::<usize>()
        .ok()
        .filter(|id| (1..=len).contains(id))
        .map(|id| id - 1)
}

impl<W: Write> Playlist<W> {
    /// Start a session over `songs`, sorted once into catalog order.
    pub fn new(mut songs: Vec<Song>, fs: Box<dyn PlaylistFs>, out: W, show_hash: bool) -> Self {
        songs.sort_by(catalog_order);
        let selection = Vec::with_capacity(songs.len());
        Self {
            catalog: songs,
            selection,
            tracks: Vec::new(),
            fs,
            out,
            show_hash,
        }
    }

    pub fn catalog(&self) -> &[Song] {
        &self.catalog
    }

    pub fn selection(&self) -> &[Song] {
        &self.selection
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Console the session prints to.
    pub fn output(&mut self) -> &mut W {
        &mut self.out
    }

    /// Replace the selection with every catalog song matching `query`, then print it.
    pub fn filter(&mut self, query: &str) -> Result<(), PlaylistError> {
        let show_hash = self.show_hash;
        self.selection = self
            .catalog
            .iter()
            .filter(|s| s.matches(query, show_hash))
            .cloned()
            .collect();
        self.print_selection()
    }

    pub fn print_selection(&mut self) -> Result<(), PlaylistError> {
        table::write_selection(&mut self.out, &self.selection, self.show_hash)?;
        Ok(())
    }

    pub fn print_tracks(&mut self) -> Result<(), PlaylistError> {
        table::write_tracks(&mut self.out, &self.tracks, self.show_hash)?;
        Ok(())
    }

    /// Append the song with selection id `arg` to the end of the playlist.
    pub fn add_track(&mut self, arg: &str) -> Result<(), PlaylistError> {
        if self.selection.is_empty() {
            return Err(PlaylistError::NoSelection);
        }
        let i = parse_index(arg, self.selection.len()).ok_or_else(|| PlaylistError::BadIndex {
            action: Action::AddTrack,
            kind: "song",
            arg: arg.to_string(),
            max: self.selection.len(),
        })?;
        self.tracks.push(Track::from(self.selection[i].clone()));
        Ok(())
    }

    /// Remove the track at `arg`; later tracks move up by one.
    pub fn remove_track(&mut self, arg: &str) -> Result<(), PlaylistError> {
        if self.tracks.is_empty() {
            return Err(PlaylistError::NoTracks(Action::RemoveTrack));
        }
        let i = self.track_index(Action::RemoveTrack, arg)?;
        self.tracks.remove(i);
        Ok(())
    }

    /// `<from> <to>`: move a track so it ends up at position `to`.
    pub fn move_track(&mut self, args: &str) -> Result<(), PlaylistError> {
        let fields: Vec<&str> = args.split_whitespace().collect();
        let [from, to] = fields[..] else {
            return Err(PlaylistError::Usage {
                action: Action::MoveTrack,
                usage: "track id and move index",
            });
        };
        let from = self.track_index(Action::MoveTrack, from)?;
        let to = self.track_index(Action::MoveTrack, to)?;

        if from < to {
            self.tracks[from..=to].rotate_left(1);
        } else {
            self.tracks[to..=from].rotate_right(1);
        }
        Ok(())
    }

    /// `<id> <name>`: the name is everything after the id, spacing included.
    pub fn rename_track(&mut self, args: &str) -> Result<(), PlaylistError> {
        let args = args.trim_start();
        let mut fields = args.split_whitespace();
        let (Some(id), Some(_)) = (fields.next(), fields.next()) else {
            return Err(PlaylistError::Usage {
                action: Action::RenameTrack,
                usage: "track id and new name",
            });
        };
        let i = self.track_index(Action::RenameTrack, id)?;
        self.tracks[i].display = args[id.len()..].trim_start().to_string();
        Ok(())
    }

    pub fn clear_tracks(&mut self) {
        self.tracks.clear();
    }

    /// Replace the playlist with the tracks in the m3u file at `path`.
    ///
    /// Lines naming songs outside the catalog are reported but do not stop the load.
    pub fn load(&mut self, path: &str) -> Result<LoadReport, PlaylistError> {
        let read_error = |source| PlaylistError::Read {
            path: path.to_string(),
            source,
        };
        let bytes = self.fs.read_file(path).map_err(read_error)?;
        let parsed = m3u::read_from(bytes.as_slice(), &self.catalog).map_err(read_error)?;

        self.tracks = parsed.tracks;
        for (n, missing) in parsed.unresolved.iter().enumerate() {
            if n == MAX_LOAD_ERRORS {
                writeln!(self.out, "Error (load playlist): ... additional errors not displayed")?;
                break;
            }
            writeln!(self.out, "Error (load playlist): music file not found: {missing:?}")?;
        }

        info!(
            path,
            tracks = self.tracks.len(),
            unresolved = parsed.unresolved.len(),
            "playlist loaded"
        );
        Ok(LoadReport {
            loaded: self.tracks.len(),
            unresolved: parsed.unresolved,
        })
    }

    /// Write the playlist to a new file. Existing files are never overwritten.
    ///
    /// A failed write may leave a partial file behind.
    pub fn write(&mut self, path: &str) -> Result<(), PlaylistError> {
        if !path.ends_with(EXTENSION) || path.len() == EXTENSION.len() {
            return Err(PlaylistError::BadPath(path.to_string()));
        }
        if self.fs.exists(path) {
            return Err(PlaylistError::Exists(path.to_string()));
        }

        let mut file = self.fs.create_file(path).map_err(|source| PlaylistError::Create {
            path: path.to_string(),
            source,
        })?;
        m3u::write_to(&self.tracks, &mut file).map_err(|source| PlaylistError::Write {
            path: path.to_string(),
            source,
        })?;
        file.close().map_err(|source| PlaylistError::Close {
            path: path.to_string(),
            source,
        })?;

        info!(path, tracks = self.tracks.len(), "playlist written");
        Ok(())
    }

    fn track_index(&self, action: Action, arg: &str) -> Result<usize, PlaylistError> {
        parse_index(arg, self.tracks.len()).ok_or_else(|| {
            debug!(%action, arg, "track index out of range");
            PlaylistError::BadIndex {
                action,
                kind: "track",
                arg: arg.to_string(),
                max: self.tracks.len(),
            }
        })
    }
}
