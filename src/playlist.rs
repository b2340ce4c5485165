//! Playlist editing: the session model, its table output and the m3u codec.

mod fs;
mod m3u;
mod model;
mod table;

pub use fs::DirFs;
pub use model::*;
