//! Board management
//!
//! Handles board initialization and provides access to the snapshot files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{Config, BOARD_DIR};
use super::jsonl::{JsonlStore, StagedWrite};
use crate::domain::{CountPerStatus, Post, Tag};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Not in a roadmap board. Run 'roadmap init' first.")]
    NotInBoard,
}

/// Everything the roadmap is rendered from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub posts: Vec<Post>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Authoritative counts, absent when the fetch layer did not send any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_per_status: Option<CountPerStatus>,
}

/// A roadmap board on disk
pub struct Board {
    root: PathBuf,
    config: Config,
}

impl Board {
    /// Opens an existing board at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(BOARD_DIR).is_dir() {
            return Err(BoardError::NotInBoard.into());
        }

        let config = Config::for_board(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the board at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_board_root().ok_or(BoardError::NotInBoard)?;

        Self::open(root)
    }

    /// Initializes a new board at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let board_dir = root.join(BOARD_DIR);

        fs::create_dir_all(&board_dir).with_context(|| {
            format!("Failed to create {} directory: {}", BOARD_DIR, board_dir.display())
        })?;

        let config_path = board_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Roadmap board configuration

# Statuses shown on the roadmap, in order
status_order = ["planned", "started", "completed"]

# Card excerpt length in characters
description_max_len = 150

# Tags shown per card before "+N"
tag_display_cap = 3

# Posts with an unrecognized status: "collect" or "reject"
unknown_status = "collect"

[site]
base_url = "http://localhost:3000"
tenant_name = ""
private = false
email_auth_allowed = true
oauth = []
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        for file in ["posts.jsonl", "tags.jsonl"] {
            let path = board_dir.join(file);
            if !path.exists() {
                fs::write(&path, "")
                    .with_context(|| format!("Failed to create {}", path.display()))?;
            }
        }

        Self::open(root)
    }

    /// Returns the board root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.roadmap` directory
    pub fn board_dir(&self) -> PathBuf {
        self.root.join(BOARD_DIR)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn post_store(&self) -> JsonlStore<Post> {
        JsonlStore::new(self.board_dir().join("posts.jsonl"))
    }

    pub fn tag_store(&self) -> JsonlStore<Tag> {
        JsonlStore::new(self.board_dir().join("tags.jsonl"))
    }

    pub fn counts_path(&self) -> PathBuf {
        self.board_dir().join("counts.json")
    }

    /// Reads the authoritative counts, if the board has them
    pub fn read_counts(&self) -> Result<Option<CountPerStatus>> {
        let path = self.counts_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read counts: {}", path.display()))?;
        let counts = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse counts: {}", path.display()))?;

        Ok(Some(counts))
    }

    fn stage_counts(&self, counts: &CountPerStatus) -> Result<StagedWrite> {
        let path = self.counts_path();
        let staged = StagedWrite::new(path.with_extension("json.tmp"), &path);
        let content = serde_json::to_string_pretty(counts).context("Failed to serialize counts")?;
        fs::write(staged.temp_path(), content).with_context(|| {
            format!("Failed to write counts: {}", staged.temp_path().display())
        })?;
        Ok(staged)
    }

    /// Loads posts, tags and counts
    pub fn load_snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            posts: self.post_store().read_all()?,
            tags: self.tag_store().read_all()?,
            count_per_status: self.read_counts()?,
        })
    }

    /// Replaces the board contents with a snapshot.
    ///
    /// Every file is written out before any is replaced, so a failed write
    /// leaves the previous snapshot in place.
    pub fn import(&self, snapshot: &Snapshot) -> Result<()> {
        let posts = self.post_store().stage(&snapshot.posts)?;
        let tags = self.tag_store().stage(&snapshot.tags)?;
        let counts = snapshot
            .count_per_status
            .as_ref()
            .map(|counts| self.stage_counts(counts))
            .transpose()?;

        posts.commit()?;
        tags.commit()?;
        match counts {
            Some(counts) => counts.commit(),
            None => {
                let path = self.counts_path();
                if path.exists() {
                    fs::remove_file(&path)
                        .with_context(|| format!("Failed to remove counts: {}", path.display()))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let board = Board::init(dir.path()).unwrap();

        assert!(board.board_dir().is_dir());
        assert!(board.board_dir().join("config.toml").is_file());
        assert!(board.board_dir().join("posts.jsonl").is_file());
        assert!(board.board_dir().join("tags.jsonl").is_file());
        assert_eq!(board.load_snapshot().unwrap(), Snapshot::default());
    }

    #[test]
    fn default_config_file_parses() {
        let dir = TempDir::new().unwrap();
        let board = Board::init(dir.path()).unwrap();
        assert_eq!(board.config().board.status_order().unwrap(), PostStatus::ROADMAP.to_vec());
    }

    #[test]
    fn open_requires_board_dir() {
        let dir = TempDir::new().unwrap();
        let err = Board::open(dir.path()).err().unwrap();
        assert!(err.to_string().contains("roadmap init"));
    }

    #[test]
    fn import_replaces_snapshot() {
        let dir = TempDir::new().unwrap();
        let board = Board::init(dir.path()).unwrap();

        let mut counts = CountPerStatus::new();
        counts.set("planned", 4);
        let snapshot = Snapshot {
            posts: vec![Post::new(1, 1, "a", "A", PostStatus::Planned).with_votes(2)],
            tags: vec![Tag::new("ui", "UI", "#000")],
            count_per_status: Some(counts),
        };
        board.import(&snapshot).unwrap();
        assert_eq!(board.load_snapshot().unwrap(), snapshot);

        board.import(&Snapshot::default()).unwrap();
        assert!(!board.counts_path().exists());
        assert!(board.load_snapshot().unwrap().posts.is_empty());
    }

    #[test]
    fn failed_import_keeps_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let board = Board::init(dir.path()).unwrap();
        let before = Snapshot {
            posts: vec![Post::new(1, 1, "sso", "SSO", PostStatus::Planned)],
            tags: vec![Tag::new("ui", "UI", "#1f6feb")],
            count_per_status: None,
        };
        board.import(&before).unwrap();

        // A directory where the tags temp file goes makes staging fail
        fs::create_dir(board.board_dir().join("tags.jsonl.tmp")).unwrap();

        let after = Snapshot {
            posts: vec![Post::new(2, 2, "dark", "Dark mode", PostStatus::Started)],
            tags: Vec::new(),
            count_per_status: Some([("started".to_string(), 1)].into_iter().collect()),
        };
        assert!(board.import(&after).is_err());

        assert_eq!(board.load_snapshot().unwrap(), before);
        assert!(!board.board_dir().join("posts.jsonl.tmp").exists());
    }

    #[test]
    fn snapshot_reads_page_props_json() {
        let json = r#"{
            "posts": [{"id":1,"number":7,"slug":"sso","title":"SSO","status":"planned","votesCount":3}],
            "tags": [{"slug":"ui","name":"UI","color":"1f6feb"}],
            "countPerStatus": {"planned": 10}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.posts[0].number, 7);
        assert_eq!(snapshot.count_per_status.unwrap().get("planned"), 10);
    }
}
