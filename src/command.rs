//! The interactive command loop: one single-letter command per input line.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::playlist::{Playlist, PlaylistError};

/// Every key the loop accepts, with the usage line shown by `h`.
pub const KEYS: [(&str, &str); 12] = [
    ("f", "Filter songs with query: f <query>"),
    ("d", "Display filter'd songs by id"),
    ("a", "Add song song by filter id: a <id>"),
    ("m", "Move playlist track: m <old_index> <new_index>"),
    ("r", "Remove playlist track: r <index>"),
    ("n", "Rename playlist track: n <index> <name>"),
    ("c", "Clear playlist tracks"),
    ("p", "Print playlist tracks and indexes"),
    ("l", "Loads playlist: l <filename>"),
    ("w", "Writes playlist: w <filename>"),
    ("h", "Help information is printed."),
    ("q", "Quits the application."),
];

const INTRO: [&str; 5] = [
    "Help for m3u-builder",
    "The application reads commands to create m3u playlists.",
    "First, songs must be selected by a filter.",
    "Then, songs can be added to playlist by filter id.",
    "Playlists tracks are referenced by their index.",
];

/// A parsed input line. Arguments borrow from the line, trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Filter(&'a str),
    Display,
    Add(&'a str),
    Move(&'a str),
    Remove(&'a str),
    Rename(&'a str),
    Clear,
    Print,
    Load(&'a str),
    Write(&'a str),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidCommand(pub String);

impl<'a> Command<'a> {
    /// `Ok(None)` for a blank line. `q` only quits when given no arguments.
    pub fn parse(line: &'a str) -> Result<Option<Self>, InvalidCommand> {
        let line = line.trim();
        let Some(key) = line.split_whitespace().next() else {
            return Ok(None);
        };
        let args = line[key.len()..].trim();

        let cmd = match key {
            "f" => Command::Filter(args),
            "d" => Command::Display,
            "a" => Command::Add(args),
            "m" => Command::Move(args),
            "r" => Command::Remove(args),
            "n" => Command::Rename(args),
            "c" => Command::Clear,
            "p" => Command::Print,
            "l" => Command::Load(args),
            "w" => Command::Write(args),
            "h" => Command::Help,
            "q" if args.is_empty() => Command::Quit,
            _ => return Err(InvalidCommand(line.to_string())),
        };
        Ok(Some(cmd))
    }

    /// Run against the session. `Quit` is handled by the loop and does nothing here.
    pub fn apply<W: Write>(self, playlist: &mut Playlist<W>) -> Result<(), PlaylistError> {
        match self {
            Command::Filter(query) => playlist.filter(query),
            Command::Display => playlist.print_selection(),
            Command::Add(arg) => playlist.add_track(arg),
            Command::Move(args) => playlist.move_track(args),
            Command::Remove(arg) => playlist.remove_track(arg),
            Command::Rename(args) => playlist.rename_track(args),
            Command::Clear => {
                playlist.clear_tracks();
                Ok(())
            }
            Command::Print => playlist.print_tracks(),
            Command::Load(path) => playlist.load(path).map(|_| ()),
            Command::Write(path) => playlist.write(path),
            Command::Help => Ok(write_help(playlist.output())?),
            Command::Quit => Ok(()),
        }
    }
}

pub fn help_text() -> String {
    let mut text = String::new();
    for line in INTRO {
        text.push_str(line);
        text.push('\n');
    }
    for (key, usage) in KEYS {
        text.push_str(&format!("{key}    {usage}\n"));
    }
    text
}

fn write_help<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(help_text().as_bytes())
}

/// Print the help, then execute commands from `input` until `q` or end of input.
///
/// Command failures are printed and the loop continues. Only console write
/// errors and read errors from `input` end the loop early.
pub fn run<W: Write, R: BufRead>(playlist: &mut Playlist<W>, input: R) -> io::Result<()> {
    write_help(playlist.output())?;
    let mut lines = input.split(b'\n');

    loop {
        let out = playlist.output();
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            debug!("end of input");
            return Ok(());
        };
        let line = line?;
        let line = String::from_utf8_lossy(&line);

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => return Ok(()),
            Ok(Some(cmd)) => match cmd.apply(playlist) {
                Ok(()) => {}
                Err(PlaylistError::Output(err)) => return Err(err),
                Err(err) => {
                    debug!(?cmd, %err, "command failed");
                    writeln!(playlist.output(), "Error ({}): {err}", err.action())?;
                }
            },
            Err(err) => writeln!(playlist.output(), "Error (invalid command): {err}")?,
        }
    }
}

#[cfg(test)]
mod tests;
