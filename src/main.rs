use std::process::ExitCode;

mod command;
mod config;
mod library;
mod playlist;
mod runtime;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    runtime::run()
}
