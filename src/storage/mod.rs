//! # Storage Layer
//!
//! A board is a snapshot of what the fetch layer produced, kept in
//! git-friendly files.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Posts | JSONL (one JSON per line) | `.roadmap/posts.jsonl` |
//! | Tags | JSONL | `.roadmap/tags.jsonl` |
//! | Counts | JSON object, optional | `.roadmap/counts.json` |
//! | Config | TOML | `.roadmap/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`JsonlStore`] uses file locking (`fs2`) for concurrent access
//! - All JSONL writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Board`] - Entry point for accessing a board
//! - [`Snapshot`] - Posts, tags and counts loaded together
//! - [`Config`] - Board and global configuration

mod jsonl;
mod config;
mod board;

pub use jsonl::JsonlStore;
pub use config::{parse_status_list, BoardConfig, Config, ConfigError, GlobalConfig, OutputFormat, BOARD_DIR};
pub use board::{Board, BoardError, Snapshot};
