use std::io::{self, Write};

use crate::library::Song;

use super::model::Track;

const GAP: &str = "    ";
const HASH_WIDTH: usize = 32;

/// Widest of `min` and every value, in chars.
fn column_width<'a>(min: usize, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.chars().count()).fold(min, usize::max)
}

struct Layout {
    hash: bool,
    index: usize,
    /// Minimum widths of the padded middle columns; the last column is never padded.
    columns: Vec<usize>,
}

impl Layout {
    fn row<W: Write + ?Sized>(
        &self,
        out: &mut W,
        hash: &str,
        index: &str,
        cells: &[&str],
        last: &str,
    ) -> io::Result<()> {
        let mut line = String::new();
        if self.hash {
            line.push_str(&format!("{hash:>width$}{GAP}", width = HASH_WIDTH));
        }
        line.push_str(&format!("{index:>width$}", width = self.index));
        for (cell, width) in cells.iter().zip(&self.columns) {
            line.push_str(&format!("{GAP}{cell:<width$}"));
        }
        writeln!(out, "{line}{GAP}{last}")
    }
}

/// Print the current selection as `ID Artist Album Title`.
pub fn write_selection<W: Write + ?Sized>(out: &mut W, songs: &[Song], show_hash: bool) -> io::Result<()> {
    let layout = Layout {
        hash: show_hash,
        index: songs.len().to_string().len().max(2),
        columns: vec![
            column_width(6, songs.iter().map(|s| s.artist.as_str())),
            column_width(5, songs.iter().map(|s| s.album.as_str())),
        ],
    };

    layout.row(out, "Hash", "ID", &["Artist", "Album"], "Title")?;
    for (i, s) in songs.iter().enumerate() {
        layout.row(out, &s.hash, &(i + 1).to_string(), &[s.artist.as_str(), s.album.as_str()], &s.title)?;
    }
    Ok(())
}

/// Print the playlist as `Index Display Artist Album Title`.
pub fn write_tracks<W: Write + ?Sized>(out: &mut W, tracks: &[Track], show_hash: bool) -> io::Result<()> {
    let layout = Layout {
        hash: show_hash,
        index: tracks.len().to_string().len().max(5),
        columns: vec![
            column_width(7, tracks.iter().map(|t| t.display.as_str())),
            column_width(6, tracks.iter().map(|t| t.song.artist.as_str())),
            column_width(5, tracks.iter().map(|t| t.song.album.as_str())),
        ],
    };

    layout.row(out, "Hash", "Index", &["Display", "Artist", "Album"], "Title")?;
    for (i, t) in tracks.iter().enumerate() {
        let s = &t.song;
        layout.row(
            out,
            &s.hash,
            &(i + 1).to_string(),
            &[t.display.as_str(), s.artist.as_str(), s.album.as_str()],
            &s.title,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(artist: &str, album: &str, track: u32, title: &str) -> Song {
        Song {
            artist: artist.into(),
            album: album.into(),
            track,
            title: title.into(),
            ..Song::default()
        }
    }

    fn selection(songs: &[Song], show_hash: bool) -> String {
        let mut out = Vec::new();
        write_selection(&mut out, songs, show_hash).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn tracks(tracks: &[Track], show_hash: bool) -> String {
        let mut out = Vec::new();
        write_tracks(&mut out, tracks, show_hash).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn selection_short_list() {
        assert_eq!(
            selection(&[song("x", "y", 8, "z")], false),
            "ID    Artist    Album    Title\n 1    x         y        z\n"
        );
    }

    #[test]
    fn selection_widens_columns_and_ids() {
        let mut songs = vec![song("Beck", "Guero", 4, "Missing")];
        let titles = [
            "Jenny Was A Friend Of Mine",
            "Mr. Brightside",
            "Smile Like You Mean It",
            "Somebody Told Me",
            "All These Things I've Done",
            "Andy, You're A Star",
            "On Top",
            "Change Your Mind",
            "Believe Me Natalie",
            "Midnight Show",
            "Everything Will Be Alright",
        ];
        for (i, title) in titles.iter().enumerate() {
            songs.push(song("The Killers", "Hot Fuss", i as u32 + 1, title));
        }
        let out = selection(&songs, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID    Artist         Album       Title");
        assert_eq!(lines[1], " 1    Beck           Guero       Missing");
        assert_eq!(lines[2], " 2    The Killers    Hot Fuss    Jenny Was A Friend Of Mine");
        assert_eq!(lines[12], "12    The Killers    Hot Fuss    Everything Will Be Alright");
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn selection_with_hash_column() {
        let s = Song {
            hash: "tiny".into(),
            ..song("x", "y", 8, "z")
        };
        assert_eq!(
            selection(&[s], true),
            "                            Hash    ID    Artist    Album    Title\n\
             \x20                           tiny     1    x         y        z\n"
        );
    }

    #[test]
    fn empty_selection_prints_only_the_header() {
        assert_eq!(selection(&[], false), "ID    Artist    Album    Title\n");
    }

    #[test]
    fn tracks_short_list() {
        let t = Track {
            song: Song {
                path: "b".into(),
                ..song("x", "y", 8, "z")
            },
            display: "a".into(),
        };
        assert_eq!(
            tracks(&[t], false),
            "Index    Display    Artist    Album    Title\n    1    a          x         y        z\n"
        );
    }

    #[test]
    fn tracks_long_values() {
        let t = Track {
            song: song(
                "David Bowie",
                "The Rise and Fall of Ziggy Stardust and the Spiders from Mars",
                1,
                "Five Years",
            ),
            display: "long-title".into(),
        };
        assert_eq!(
            tracks(&[t], false),
            "Index    Display       Artist         Album                                                            Title\n    1    long-title    David Bowie    The Rise and Fall of Ziggy Stardust and the Spiders from Mars    Five Years\n"
        );
    }

    #[test]
    fn tracks_with_hash_column() {
        let t = Track {
            song: Song {
                path: "b".into(),
                hash: "tiny".into(),
                ..song("x", "y", 8, "z")
            },
            display: "a".into(),
        };
        assert_eq!(
            tracks(&[t], true),
            "                            Hash    Index    Display    Artist    Album    Title\n\
             \x20                           tiny        1    a          x         y        z\n"
        );
    }
}
