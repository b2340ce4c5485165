use std::io::{self, Cursor, Read};
use std::path::{Component, Path};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{LibrarySettings, TagErrorPolicy};

use super::extract::TagReader;
use super::model::Song;
use super::progress::Progress;
use super::source::SongSource;

/// Scanner error types.
///
/// Everything except `Tags` aborts the scan. `Tags` is only returned when the
/// tag error policy is `abort`; otherwise the file is skipped.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("walking directory {path}: {source}")]
    Walk { path: String, source: io::Error },

    #[error("opening {path}: {source}")]
    Open { path: String, source: io::Error },

    #[error("reading {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("parsing tags for {path}: {message}")]
    Tags { path: String, message: String },

    #[error("scan workers stopped before all files were read")]
    WorkerLost,
}

/// A candidate that was left out of the catalog because its tags could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of a completed scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Songs in completion order, not directory order.
    pub songs: Vec<Song>,
    pub skipped: Vec<SkippedFile>,
    pub elapsed: Duration,
}

/// Scan `root` for audio files and read their tags on a pool of worker threads.
///
/// Candidates are found by walking `root`; `source` opens them by relative path.
pub fn scan(
    root: &Path,
    settings: &LibrarySettings,
    source: &dyn SongSource,
    reader: &dyn TagReader,
    progress: &mut dyn Progress,
) -> Result<ScanReport, ScanError> {
    let started = Instant::now();
    let paths = candidates(root, settings)?;
    let total = paths.len();
    progress.started(total);

    if total == 0 {
        let report = ScanReport {
            elapsed: started.elapsed(),
            ..ScanReport::default()
        };
        progress.finished(&report);
        return Ok(report);
    }

    let workers = settings.workers.clamp(1, total);
    info!(root = %root.display(), files = total, workers, "scanning library");

    // Seed the whole queue up front; workers exit once it is drained.
    let (job_tx, job_rx) = mpsc::sync_channel::<String>(total);
    for path in paths {
        job_tx.send(path).map_err(|_| ScanError::WorkerLost)?;
    }
    drop(job_tx);

    let jobs = Mutex::new(job_rx);
    let stop = AtomicBool::new(false);
    let (result_tx, result_rx) = mpsc::channel::<Result<Song, ScanError>>();

    let (songs, skipped) = thread::scope(|s| {
        for _ in 0..workers {
            let result_tx = result_tx.clone();
            let (jobs, stop) = (&jobs, &stop);
            s.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let next = match jobs.lock() {
                        Ok(rx) => rx.recv(),
                        Err(_) => break,
                    };
                    let Ok(path) = next else { break };
                    if result_tx
                        .send(read_song(source, &path, settings.hash, reader))
                        .is_err()
                    {
                        break;
                    }
                }
            });
        }
        drop(result_tx);

        let collected = collect(result_rx, total, settings.tag_errors, progress);
        if collected.is_err() {
            stop.store(true, Ordering::Relaxed);
        }
        collected
    })?;

    let report = ScanReport {
        songs,
        skipped,
        elapsed: started.elapsed(),
    };
    info!(
        songs = report.songs.len(),
        skipped = report.skipped.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "scan finished"
    );
    progress.finished(&report);
    Ok(report)
}

/// Drain exactly `total` results, in whatever order the workers produce them.
fn collect(
    results: Receiver<Result<Song, ScanError>>,
    total: usize,
    policy: TagErrorPolicy,
    progress: &mut dyn Progress,
) -> Result<(Vec<Song>, Vec<SkippedFile>), ScanError> {
    let mut songs = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for done in 1..=total {
        match results.recv().map_err(|_| ScanError::WorkerLost)? {
            Ok(song) => songs.push(song),
            Err(ScanError::Tags { path, message }) if policy == TagErrorPolicy::Skip => {
                debug!(%path, %message, "skipping file with unreadable tags");
                progress.skipped(&path, &message);
                skipped.push(SkippedFile {
                    path,
                    reason: message,
                });
            }
            Err(e) => {
                warn!(error = %e, "scan aborted");
                return Err(e);
            }
        }
        progress.advanced(done, total);
    }

    Ok((songs, skipped))
}

/// Collect candidate paths relative to `root`, in walk order.
fn candidates(root: &Path, settings: &LibrarySettings) -> Result<Vec<String>, ScanError> {
    let walk_error = |source: io::Error| ScanError::Walk {
        path: root.display().to_string(),
        source,
    };
    let meta = std::fs::metadata(root).map_err(walk_error)?;
    if !meta.is_dir() {
        return Err(walk_error(io::Error::other("not a directory")));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        match relative_path(root, entry.path()) {
            Some(rel) if is_candidate(&rel, &settings.extensions) => paths.push(rel),
            Some(_) => {}
            None => debug!(path = %entry.path().display(), "ignoring non-utf8 path"),
        }
    }
    Ok(paths)
}

/// Exact, case-sensitive suffix match.
pub(super) fn is_candidate(path: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| path.ends_with(ext.as_str()))
}

/// `path` relative to `root`, joined with `/`. `None` for non-UTF-8 names.
pub(super) fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

/// Open, optionally hash, then parse tags.
///
/// The whole file is only buffered when hashing; otherwise tags are probed
/// straight from the open file.
fn read_song(
    source: &dyn SongSource,
    path: &str,
    hash: bool,
    reader: &dyn TagReader,
) -> Result<Song, ScanError> {
    let mut file = source.open(path).map_err(|source| ScanError::Open {
        path: path.to_string(),
        source,
    })?;

    let (tags, hash) = if hash {
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|source| ScanError::Read {
            path: path.to_string(),
            source,
        })?;
        let digest = format!("{:x}", md5::compute(&bytes));
        (reader.read_tags(&mut Cursor::new(bytes)), digest)
    } else {
        (reader.read_tags(file.as_mut()), String::new())
    };
    let tags = tags.map_err(|e| ScanError::Tags {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    Ok(Song {
        path: path.to_string(),
        artist: tags.artist,
        album: tags.album,
        title: tags.title,
        track: tags.track,
        hash,
    })
}
