use std::io::Write;

use crossterm::{
    cursor::MoveUp,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use super::scan::ScanReport;

/// Receives scan progress as results come back from the workers.
///
/// Completions arrive in whatever order the workers finish.
pub trait Progress {
    fn started(&mut self, _total: usize) {}
    fn advanced(&mut self, _done: usize, _total: usize) {}
    fn skipped(&mut self, _path: &str, _reason: &str) {}
    fn finished(&mut self, _report: &ScanReport) {}
}

/// Discards all progress.
pub struct Silent;

impl Progress for Silent {}

/// Redraws a single `> reading songs: [n/N]` line in place.
///
/// Skipped files are printed above the counter line. Write failures are
/// ignored: progress is feedback only.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn replace_last_line(&mut self, text: String) {
        let _ = queue!(
            self.out,
            MoveUp(1),
            Clear(ClearType::CurrentLine),
            Print(text)
        );
        let _ = self.out.flush();
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn started(&mut self, total: usize) {
        if total > 0 {
            // The counter overwrites this line.
            let _ = writeln!(self.out);
        }
    }

    fn advanced(&mut self, done: usize, total: usize) {
        let width = total.to_string().len();
        self.replace_last_line(format!("> reading songs: [{done:>width$}/{total}]\n"));
    }

    fn skipped(&mut self, path: &str, reason: &str) {
        self.replace_last_line(format!("> parsing tags for {path}: {reason}\n\n"));
    }

    fn finished(&mut self, report: &ScanReport) {
        let _ = writeln!(
            self.out,
            "> loaded {} songs with {} errors in {:.1} seconds",
            report.songs.len(),
            report.skipped.len(),
            report.elapsed.as_secs_f64()
        );
        let _ = self.out.flush();
    }
}
