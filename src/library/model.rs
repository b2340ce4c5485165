use std::cmp::Ordering;

/// A catalog entry discovered by a scan.
///
/// Songs are never edited after the scan; playlists copy them into tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    /// Path relative to the scan root, `/`-separated. Unique within a catalog.
    pub path: String,
    pub artist: String,
    pub album: String,
    pub title: String,
    /// Track number from the tags, `0` when unknown.
    pub track: u32,
    /// Lowercase hex md5 of the file content. Empty unless hashing is enabled.
    pub hash: String,
}

impl Song {
    /// Case-insensitive substring match against artist, album and title.
    ///
    /// The hash is only considered when `include_hash` is set. The path is never searched.
    pub fn matches(&self, query: &str, include_hash: bool) -> bool {
        let query = query.to_lowercase();
        self.artist.to_lowercase().contains(&query)
            || self.album.to_lowercase().contains(&query)
            || self.title.to_lowercase().contains(&query)
            || (include_hash && self.hash.contains(&query))
    }

    /// Human readable name used for new playlist tracks.
    ///
    /// Fields are used verbatim; surrounding whitespace is kept.
    pub fn display(&self) -> String {
        let (title, artist, album) = (&self.title, &self.artist, &self.album);
        match (title.is_empty(), artist.is_empty(), album.is_empty()) {
            (false, false, _) => format!("{artist} - {title}"),
            (false, true, _) => title.clone(),
            (true, false, false) => format!("{artist} - {album} - ?"),
            (true, false, true) => format!("{artist} - ?"),
            (true, true, true) if !self.path.is_empty() => self.path.clone(),
            _ => "?".to_string(),
        }
    }
}

/// Catalog ordering: artist, album, track number, then title.
///
/// String comparisons are ordinal, not locale aware.
pub fn catalog_order(a: &Song, b: &Song) -> Ordering {
    a.artist
        .cmp(&b.artist)
        .then_with(|| a.album.cmp(&b.album))
        .then_with(|| a.track.cmp(&b.track))
        .then_with(|| a.title.cmp(&b.title))
}
