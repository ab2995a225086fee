//! Roadmap assembly
//!
//! Picks the displayed statuses out of [`StatusGroups`] and turns each post
//! into a [`RoadmapCard`]. Section visibility follows the authoritative
//! per-status counts, not the number of grouped posts: a status whose
//! count is zero gets no section even if posts were grouped under it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::grouping::StatusGroups;
use super::post::Post;
use super::status::PostStatus;
use super::tag::{resolve_tags, Tag, TagBadgeStyle, DEFAULT_TAG_DISPLAY_CAP};
use super::text::{truncate_description, DEFAULT_EXCERPT_LEN};

/// Authoritative number of posts per status, supplied by the fetch layer.
///
/// May exceed what was fetched. Missing keys read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountPerStatus(HashMap<String, u64>);

impl CountPerStatus {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, key: &str) -> u64 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: impl Into<String>, count: u64) {
        self.0.insert(key.into(), count);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Counts derived from grouped posts, for boards without a counts file
    pub fn from_groups(groups: &StatusGroups) -> Self {
        Self(groups.counts().into_iter().collect())
    }
}

impl FromIterator<(String, u64)> for CountPerStatus {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Display knobs for cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOptions {
    pub excerpt_len: usize,
    pub tag_cap: usize,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            excerpt_len: DEFAULT_EXCERPT_LEN,
            tag_cap: DEFAULT_TAG_DISPLAY_CAP,
        }
    }
}

/// A resolved tag as shown on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBadge {
    pub slug: String,
    pub name: String,
    pub style: TagBadgeStyle,
}

/// One post as rendered in a roadmap section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapCard {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub tags: Vec<TagBadge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_tags: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl RoadmapCard {
    pub fn from_post(post: &Post, tags: &[Tag], options: CardOptions) -> Self {
        let resolved = resolve_tags(post.tags.as_slice(), tags, options.tag_cap);

        Self {
            id: post.id,
            number: post.number,
            title: post.title.clone(),
            url: post.url(),
            votes: (post.votes_count > 0).then_some(post.votes_count),
            excerpt: post
                .description_text()
                .map(|d| truncate_description(d, options.excerpt_len)),
            tags: resolved
                .shown
                .into_iter()
                .map(|t| TagBadge {
                    slug: t.slug.clone(),
                    name: t.name.clone(),
                    style: t.badge_style(),
                })
                .collect(),
            more_tags: (resolved.remainder > 0).then_some(resolved.remainder),
            comments: post.comments_label(),
        }
    }
}

/// A displayed status with its ranked cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadmapSection {
    pub status: PostStatus,
    pub title: String,
    /// Authoritative count, may exceed `cards.len()`
    pub count: u64,
    pub cards: Vec<RoadmapCard>,
}

/// The rendered roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Roadmap {
    pub sections: Vec<RoadmapSection>,
}

impl Roadmap {
    /// Builds sections for `status_order`, skipping zero-count statuses
    pub fn build(
        groups: &StatusGroups,
        status_order: &[PostStatus],
        counts: &CountPerStatus,
        tags: &[Tag],
        options: CardOptions,
    ) -> Self {
        let sections = status_order
            .iter()
            .filter_map(|&status| {
                let count = counts.get(status.as_str());
                if count == 0 {
                    return None;
                }

                let cards = groups
                    .get(status)
                    .iter()
                    .map(|post| RoadmapCard::from_post(post, tags, options))
                    .collect();

                Some(RoadmapSection {
                    status,
                    title: status.title().to_string(),
                    count,
                    cards,
                })
            })
            .collect();

        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, status: PostStatus) -> Option<&RoadmapSection> {
        self.sections.iter().find(|s| s.status == status)
    }
}
