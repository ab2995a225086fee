//! Roadmap CLI - A local-first roadmap viewer for feedback boards
//!
//! Posts collected on a feedback board are grouped by lifecycle status and
//! ranked by votes. The roadmap shows a curated subset of those statuses
//! (planned, started, completed by default).

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{group_and_rank, Post, PostStatus, Roadmap, StatusGroups, Tag};
