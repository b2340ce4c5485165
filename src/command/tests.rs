use super::*;
use crate::library::Song;
use crate::playlist::DirFs;
use std::collections::HashSet;
use std::fs;
use tempfile::{TempDir, tempdir};

fn song(path: &str, artist: &str, title: &str, track: u32) -> Song {
    Song {
        path: path.into(),
        artist: artist.into(),
        title: title.into(),
        track,
        ..Song::default()
    }
}

fn session(songs: Vec<Song>) -> (Playlist<Vec<u8>>, TempDir) {
    let dir = tempdir().unwrap();
    let playlist = Playlist::new(songs, Box::new(DirFs::new(dir.path())), Vec::new(), false);
    (playlist, dir)
}

fn run_script(playlist: &mut Playlist<Vec<u8>>, script: &str) -> String {
    run(playlist, script.as_bytes()).unwrap();
    String::from_utf8(std::mem::take(playlist.output())).unwrap()
}

#[test]
fn keys_are_unique() {
    let keys: HashSet<&str> = KEYS.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys.len(), KEYS.len());
}

#[test]
fn every_listed_key_parses() {
    for (key, _) in KEYS {
        assert!(matches!(Command::parse(key), Ok(Some(_))), "{key}");
    }
}

#[test]
fn parse_splits_key_and_trimmed_args() {
    assert_eq!(Command::parse("f  dust "), Ok(Some(Command::Filter("dust"))));
    assert_eq!(Command::parse("  a 3\r"), Ok(Some(Command::Add("3"))));
    assert_eq!(
        Command::parse("n 2 A song with    many spaces!"),
        Ok(Some(Command::Rename("2 A song with    many spaces!")))
    );
    assert_eq!(Command::parse("f"), Ok(Some(Command::Filter(""))));
    assert_eq!(Command::parse("d extra"), Ok(Some(Command::Display)));
}

#[test]
fn parse_blank_and_unknown_lines() {
    assert_eq!(Command::parse(""), Ok(None));
    assert_eq!(Command::parse("   \t"), Ok(None));
    assert_eq!(
        Command::parse("x 1"),
        Err(InvalidCommand("x 1".to_string()))
    );
    assert!(Command::parse("F dust").is_err());
    assert!(Command::parse("filter dust").is_err());
}

#[test]
fn quit_takes_no_arguments() {
    assert_eq!(Command::parse(" q "), Ok(Some(Command::Quit)));
    assert_eq!(
        Command::parse("q now"),
        Err(InvalidCommand("q now".to_string()))
    );

    let (mut p, _dir) = session(vec![song("a.mp3", "x", "y", 1)]);
    let out = run_script(&mut p, "q now\nf\n");
    assert!(out.contains("Error (invalid command): q now\n"));
    assert_eq!(p.selection().len(), 1);
}

#[test]
fn help_lists_every_key() {
    let help = help_text();
    assert!(help.starts_with("Help for m3u-builder\n"));
    for (key, usage) in KEYS {
        assert!(help.contains(&format!("{key}    {usage}\n")), "{key}");
    }
    assert_eq!(help.lines().count(), 5 + KEYS.len());
}

#[test]
fn end_of_input_ends_the_loop_after_help_and_prompt() {
    let (mut p, _dir) = session(Vec::new());
    assert_eq!(run_script(&mut p, ""), format!("{}> ", help_text()));
}

#[test]
fn quit_stops_before_later_commands() {
    let (mut p, _dir) = session(vec![song("a.mp3", "x", "y", 1)]);
    let out = run_script(&mut p, "q\nf\n");
    assert_eq!(out, format!("{}> ", help_text()));
    assert!(p.selection().is_empty());
}

#[test]
fn invalid_and_failed_commands_are_reported_and_the_loop_continues() {
    let (mut p, _dir) = session(vec![song("a.mp3", "x", "y", 1)]);
    let out = run_script(&mut p, "zz top\n\na 1\nr 1\nf\na 1\n");

    assert!(out.contains("Error (invalid command): zz top\n"));
    assert!(out.contains("Error (add track): no selection\n"));
    assert!(out.contains("Error (remove track): no tracks\n"));
    assert_eq!(p.tracks().len(), 1);
    let after_help = out.strip_prefix(help_text().as_str()).unwrap();
    assert_eq!(after_help.matches("> ").count(), 7);
}

#[test]
fn help_command_prints_help_again() {
    let (mut p, _dir) = session(Vec::new());
    let out = run_script(&mut p, "h\n");
    assert_eq!(out.matches("Help for m3u-builder").count(), 2);
}

#[test]
fn scripted_session_writes_the_expected_playlist() {
    let (mut p, dir) = session(vec![song("e.mp3", "b", "e", 2), song("d.mp3", "b", "d", 1)]);

    let out = run_script(&mut p, "f b\na 1\na 2\nm 2 1\nr 2\nn 1 song\nw out.m3u\n");

    assert!(!out.contains("Error"), "{out}");
    assert_eq!(
        fs::read_to_string(dir.path().join("out.m3u")).unwrap(),
        "#EXTM3U\r\n#EXTINF:0, song\r\ne.mp3\r\n"
    );
}

#[test]
fn written_playlist_loads_back_in_a_later_command() {
    let (mut p, dir) = session(vec![song("d.mp3", "b", "d", 1), song("e.mp3", "b", "e", 2)]);
    fs::write(dir.path().join("old.m3u"), "#EXTM3U\nmissing.mp3\n#EXTINF:0, hi\ne.mp3\n").unwrap();

    let out = run_script(&mut p, "l old.m3u\nw old.m3u\np\n");

    assert!(out.contains("Error (load playlist): music file not found: \"missing.mp3\"\n"));
    assert!(out.contains("Error (write playlist): \"old.m3u\" already exists\n"));
    assert_eq!(p.tracks().len(), 1);
    assert_eq!(p.tracks()[0].display, "hi");
}
