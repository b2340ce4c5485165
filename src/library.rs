//! Music library: song records, tag extraction and the concurrent scanner
//! that builds the catalog.

mod extract;
mod model;
mod progress;
mod scan;
mod source;

pub use extract::LoftyTagReader;
pub use model::{Song, catalog_order};
pub use progress::{ConsoleProgress, Progress, Silent};
pub use scan::scan;
pub use source::DirSource;
