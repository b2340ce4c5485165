use lofty::prelude::*;
use lofty::probe::Probe;
use thiserror::Error;

use super::source::MediaFile;

/// Metadata pulled out of an audio file's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub artist: String,
    pub album: String,
    pub title: String,
    pub track: u32,
}

/// The file content could not be understood as a tagged audio file.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TagError(pub String);

/// Extracts tags from an opened audio file.
///
/// Shared by every scan worker, hence `Sync`. I/O failures while probing are
/// tag errors too.
pub trait TagReader: Sync {
    fn read_tags(&self, file: &mut dyn MediaFile) -> Result<Tags, TagError>;
}

/// `TagReader` backed by lofty, detecting the container from the content.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, file: &mut dyn MediaFile) -> Result<Tags, TagError> {
        let tagged = Probe::new(file)
            .guess_file_type()
            .map_err(|e| TagError(e.to_string()))?
            .read()
            .map_err(|e| TagError(e.to_string()))?;

        // A recognised container without any tag is still a song.
        let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
            return Ok(Tags::default());
        };

        Ok(Tags {
            artist: tag.artist().map(|v| v.into_owned()).unwrap_or_default(),
            album: tag.album().map(|v| v.into_owned()).unwrap_or_default(),
            title: tag.title().map(|v| v.into_owned()).unwrap_or_default(),
            track: tag.track().unwrap_or(0),
        })
    }
}
