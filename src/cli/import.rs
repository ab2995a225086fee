//! Snapshot import
//!
//! Accepts the JSON document the fetch layer hands to the roadmap page:
//! `{ "posts": [...], "tags": [...], "countPerStatus": {...} }`.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::storage::{Board, Snapshot};

/// Replace the board contents with a snapshot file (`-` reads stdin)
pub fn run(output: &Output, file: &Path) -> Result<()> {
    let board = Board::open_current()?;

    let content = if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        buf
    } else {
        fs::read_to_string(file)
            .with_context(|| format!("Failed to read snapshot: {}", file.display()))?
    };

    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", file.display()))?;

    output.verbose_ctx(
        "import",
        &format!(
            "Importing {} posts, {} tags, counts: {}",
            snapshot.posts.len(),
            snapshot.tags.len(),
            snapshot.count_per_status.is_some()
        ),
    );

    board.import(&snapshot)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "posts": snapshot.posts.len(),
            "tags": snapshot.tags.len(),
            "counts": snapshot.count_per_status.is_some(),
        }));
    } else {
        output.success(&format!(
            "Imported {} post(s) and {} tag(s)",
            snapshot.posts.len(),
            snapshot.tags.len()
        ));
    }

    Ok(())
}
