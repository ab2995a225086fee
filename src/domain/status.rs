//! Post lifecycle statuses
//!
//! [`PostStatus`] is the closed set of stages a post moves through.
//! Posts arriving from the fetch layer may carry a value outside that set,
//! so the field on a post is a [`StatusValue`] which keeps the literal
//! around instead of failing deserialization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown post status: {0}")]
pub struct UnknownStatus(pub String);

/// Status of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Open,
    Planned,
    Started,
    Completed,
    Declined,
    Duplicate,
    Deleted,
}

impl PostStatus {
    /// Number of statuses in the enumeration
    pub const COUNT: usize = 7;

    /// Every status, in display order
    pub const ALL: [PostStatus; Self::COUNT] = [
        PostStatus::Open,
        PostStatus::Planned,
        PostStatus::Started,
        PostStatus::Completed,
        PostStatus::Declined,
        PostStatus::Duplicate,
        PostStatus::Deleted,
    ];

    /// Statuses shown on the roadmap when nothing else is configured
    pub const ROADMAP: [PostStatus; 3] = [
        PostStatus::Planned,
        PostStatus::Started,
        PostStatus::Completed,
    ];

    /// Position of this status in [`PostStatus::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Open => "open",
            PostStatus::Planned => "planned",
            PostStatus::Started => "started",
            PostStatus::Completed => "completed",
            PostStatus::Declined => "declined",
            PostStatus::Duplicate => "duplicate",
            PostStatus::Deleted => "deleted",
        }
    }

    /// Section heading for this status
    pub fn title(&self) -> &'static str {
        match self {
            PostStatus::Open => "Open",
            PostStatus::Planned => "Planned",
            PostStatus::Started => "Started",
            PostStatus::Completed => "Completed",
            PostStatus::Declined => "Declined",
            PostStatus::Duplicate => "Duplicate",
            PostStatus::Deleted => "Deleted",
        }
    }

    /// Returns true if posts in this status are never grouped
    pub fn is_excluded(&self) -> bool {
        matches!(self, PostStatus::Deleted | PostStatus::Duplicate)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// The status a post actually carries
///
/// Serializes as a bare string. Names from [`PostStatus`] map to
/// `Known`; anything else is kept verbatim as `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusValue {
    Known(PostStatus),
    Unrecognized(String),
}

impl StatusValue {
    /// Parses a raw status string, never failing
    pub fn parse(raw: &str) -> Self {
        match raw.parse() {
            Ok(status) => StatusValue::Known(status),
            Err(_) => StatusValue::Unrecognized(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusValue::Known(status) => status.as_str(),
            StatusValue::Unrecognized(raw) => raw,
        }
    }

    /// Returns the known status, if any
    pub fn known(&self) -> Option<PostStatus> {
        match self {
            StatusValue::Known(status) => Some(*status),
            StatusValue::Unrecognized(_) => None,
        }
    }

    /// Returns true for deleted and duplicate posts
    pub fn is_excluded(&self) -> bool {
        self.known().is_some_and(|s| s.is_excluded())
    }
}

impl Default for StatusValue {
    fn default() -> Self {
        StatusValue::Known(PostStatus::default())
    }
}

impl From<PostStatus> for StatusValue {
    fn from(status: PostStatus) -> Self {
        StatusValue::Known(status)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(StatusValue::parse(&raw))
    }
}
