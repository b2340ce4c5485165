use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use crossterm::tty::IsTty;
use tracing::error;

use crate::command;
use crate::library::{ConsoleProgress, DirSource, LoftyTagReader, Progress, Silent, scan};
use crate::playlist::{DirFs, Playlist};

mod cli;
mod logging;
mod settings;

pub fn run() -> Result<ExitCode, Box<dyn Error>> {
    let cli = cli::Cli::parse();
    let mut settings = settings::load_settings();
    cli.apply(&mut settings.library);
    logging::init(&settings.logging);

    let mut progress: Box<dyn Progress> = if io::stdout().is_tty() {
        Box::new(ConsoleProgress::new(io::stdout()))
    } else {
        Box::new(Silent)
    };

    let started = Instant::now();
    let scanned = scan(
        &cli.dir,
        &settings.library,
        &DirSource::new(&cli.dir),
        &LoftyTagReader,
        progress.as_mut(),
    );
    drop(progress);

    let mut out = io::stdout().lock();
    let elapsed = started.elapsed().as_secs_f64();
    if elapsed > 1.0 {
        writeln!(out, "> (loaded in {elapsed:.1} seconds)")?;
    }

    let report = match scanned {
        Ok(report) => report,
        Err(err) => {
            error!(dir = %cli.dir.display(), %err, "scan failed");
            writeln!(out, "Error (reading songs): {err}")?;
            return Ok(ExitCode::FAILURE);
        }
    };
    if report.songs.is_empty() {
        writeln!(out, "no songs in folder to add to playlists")?;
        return Ok(ExitCode::SUCCESS);
    }
    writeln!(out, "> loaded {} songs", report.songs.len())?;

    let fs = DirFs::new(&cli.dir);
    let mut playlist = Playlist::new(report.songs, Box::new(fs), out, settings.library.hash);
    command::run(&mut playlist, io::stdin().lock())?;

    Ok(ExitCode::SUCCESS)
}
