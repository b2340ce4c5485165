//! Extended M3U reading and writing.
//!
//! Written files use CRLF line endings and a duration of `0` for every entry.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use crate::library::Song;

use super::model::Track;

const HEADER: &str = "#EXTM3U";
const EXTINF: &str = "#EXTINF:";

/// Tracks recovered from a playlist file.
#[derive(Debug, Default)]
pub struct ParsedPlaylist {
    pub tracks: Vec<Track>,
    /// Path lines that did not name a catalog song, in file order.
    pub unresolved: Vec<String>,
}

/// Serialize `tracks` in order.
pub fn write_to<W: Write + ?Sized>(tracks: &[Track], out: &mut W) -> io::Result<()> {
    write!(out, "{HEADER}\r\n")?;
    for track in tracks {
        write!(out, "{EXTINF}0, {}\r\n{}\r\n", track.display, track.song.path)?;
    }
    Ok(())
}

/// Parse a playlist, matching path lines against `catalog`.
///
/// The display name from an `#EXTINF` line applies to the next path line only.
/// Songs without one get their derived display name.
pub fn read_from<R: BufRead>(input: R, catalog: &[Song]) -> io::Result<ParsedPlaylist> {
    let by_path: HashMap<&str, &Song> = catalog.iter().map(|s| (s.path.as_str(), s)).collect();

    let mut parsed = ParsedPlaylist::default();
    let mut pending: Option<String> = None;

    for line in input.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with('#') {
            if let Some(info) = line.strip_prefix(EXTINF) {
                // #EXTINF:<duration>, <display>
                if let Some((_, display)) = info.split_once(',') {
                    pending = Some(display.trim().to_string());
                }
            }
            continue;
        }

        let display = pending.take().filter(|d| !d.is_empty());
        match by_path.get(line) {
            Some(&song) => parsed.tracks.push(Track {
                display: display.unwrap_or_else(|| song.display()),
                song: song.clone(),
            }),
            None => parsed.unresolved.push(line.to_string()),
        }
    }

    Ok(parsed)
}
