//! Roadmap CLI - Local-first roadmap viewer for feedback boards

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = roadmap_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
