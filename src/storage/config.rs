//! Configuration handling for the roadmap CLI
//!
//! Configuration is stored in `.roadmap/config.toml` (board) and
//! `~/.config/roadmap/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::signin::SiteSettings;
use crate::domain::{CardOptions, PostStatus, UnknownStatusPolicy, DEFAULT_EXCERPT_LEN, DEFAULT_TAG_DISPLAY_CAP};

/// Name of the board directory
pub const BOARD_DIR: &str = ".roadmap";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Board-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Statuses shown on the roadmap, in order
    pub status_order: Vec<String>,

    /// Maximum description excerpt length in characters
    pub description_max_len: usize,

    /// Tags shown per card before collapsing
    pub tag_display_cap: usize,

    /// Handling of posts with unrecognized statuses
    pub unknown_status: UnknownStatusPolicy,

    /// Site settings for sign-in redirects
    pub site: SiteSettings,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            status_order: PostStatus::ROADMAP.iter().map(|s| s.as_str().to_string()).collect(),
            description_max_len: DEFAULT_EXCERPT_LEN,
            tag_display_cap: DEFAULT_TAG_DISPLAY_CAP,
            unknown_status: UnknownStatusPolicy::default(),
            site: SiteSettings::default(),
        }
    }
}

impl BoardConfig {
    /// Parses the configured status order
    pub fn status_order(&self) -> Result<Vec<PostStatus>, ConfigError> {
        parse_status_list(&self.status_order)
    }

    pub fn card_options(&self) -> CardOptions {
        CardOptions {
            excerpt_len: self.description_max_len,
            tag_cap: self.tag_display_cap,
        }
    }
}

/// Parses status names, rejecting anything outside the enumeration
pub fn parse_status_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<PostStatus>, ConfigError> {
    names
        .iter()
        .map(|name| {
            name.as_ref()
                .parse::<PostStatus>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))
        })
        .collect()
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + board)
#[derive(Debug, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub global: GlobalConfig,
    pub board_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a specific board
    pub fn for_board(board_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let board = Self::load_board_config(board_root)?;

        Ok(Self {
            board,
            global,
            board_root: Some(board_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "roadmap", "roadmap").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads board configuration from a specific root
    fn load_board_config(board_root: &Path) -> Result<BoardConfig> {
        let config_path = board_root.join(BOARD_DIR).join("config.toml");

        if !config_path.exists() {
            return Ok(BoardConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read board config: {}", config_path.display()))?;

        let config: BoardConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse board config")?;

        config
            .status_order()
            .with_context(|| format!("Invalid status_order in {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the board root by looking for `.roadmap/` from the current directory up
    pub fn find_board_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_board_root_from(&current)
    }

    /// Finds the board root by looking for `.roadmap/` from `start` up
    pub fn find_board_root_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(BOARD_DIR).is_dir())
            .map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config {
            board: BoardConfig::default(),
            global: GlobalConfig::default(),
            board_root: None,
        };

        assert_eq!(
            config.board.status_order().unwrap(),
            vec![PostStatus::Planned, PostStatus::Started, PostStatus::Completed]
        );
        assert_eq!(config.board.description_max_len, 150);
        assert_eq!(config.board.tag_display_cap, 3);
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_board_config() {
        let toml = r#"
status_order = ["started", "completed"]
description_max_len = 80
unknown_status = "reject"

[site]
base_url = "https://feedback.example.com"
email_auth_allowed = false

[[site.oauth]]
provider = "github"
url = "https://github.com/login/oauth/authorize"
"#;

        let config: BoardConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.status_order().unwrap(),
            vec![PostStatus::Started, PostStatus::Completed]
        );
        assert_eq!(config.description_max_len, 80);
        assert_eq!(config.tag_display_cap, 3);
        assert_eq!(config.unknown_status, UnknownStatusPolicy::Reject);
        assert_eq!(config.site.oauth.len(), 1);
        assert!(!config.site.email_auth_allowed);
    }

    #[test]
    fn unknown_status_in_order_is_invalid() {
        let config: BoardConfig = toml::from_str(r#"status_order = ["planned", "shipping"]"#).unwrap();
        let err = config.status_order().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("shipping"));
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str(r#"default_format = "json""#).unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn find_board_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(BOARD_DIR)).unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_board_root_from(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn find_board_root_none_outside_board() {
        let dir = TempDir::new().unwrap();
        assert!(Config::find_board_root_from(dir.path()).is_none());
    }

    #[test]
    fn board_config_with_bad_order_fails_to_load() {
        let dir = TempDir::new().unwrap();
        let board_dir = dir.path().join(BOARD_DIR);
        fs::create_dir_all(&board_dir).unwrap();
        fs::write(board_dir.join("config.toml"), r#"status_order = ["nope"]"#).unwrap();

        assert!(Config::for_board(dir.path()).is_err());
    }
}
