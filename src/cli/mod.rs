//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create a `.roadmap/` board |
//! | `import` | Load a posts/tags/counts snapshot |
//! | `show` | Render the roadmap sections |
//! | `groups` | Dump every status group |
//! | `excerpt` | Shorten text like a roadmap card |
//! | `signin-url` | Inspect sign-in redirects |
//! | `board` | Interactive roadmap |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr, or set `RUST_LOG`:
//! ```bash
//! roadmap --verbose show
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod logging;
mod view;
mod import;
mod signin;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
