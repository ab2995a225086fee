//! Tags and tag resolution for post cards

use serde::{Deserialize, Serialize};

/// Number of tags shown on a card before collapsing into `+N`
pub const DEFAULT_TAG_DISPLAY_CAP: usize = 3;

/// A label attachable to posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub slug: String,
    pub name: String,
    /// Hex color, display only
    #[serde(default)]
    pub color: String,
}

impl Tag {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// Badge colors: the tag color as text on a faint tint of itself
    pub fn badge_style(&self) -> TagBadgeStyle {
        TagBadgeStyle {
            color: self.color.clone(),
            background: format!("{}15", self.color),
        }
    }
}

/// Colors for rendering a tag badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBadgeStyle {
    pub color: String,
    pub background: String,
}

/// Tags resolved for display on one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTags<'a> {
    pub shown: Vec<&'a Tag>,
    /// References beyond the display cap
    pub remainder: usize,
}

/// Resolves a post's tag slugs against the known tags.
///
/// Only the first `cap` references are looked up. Slugs with no matching
/// tag are dropped. The remainder counts references past the cap whether
/// or not they would have resolved.
pub fn resolve_tags<'a, S: AsRef<str>>(slugs: &[S], tags: &'a [Tag], cap: usize) -> ResolvedTags<'a> {
    let shown = slugs
        .iter()
        .take(cap)
        .filter_map(|slug| tags.iter().find(|t| t.slug == slug.as_ref()))
        .collect();

    ResolvedTags {
        shown,
        remainder: slugs.len().saturating_sub(cap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<Tag> {
        vec![
            Tag::new("ui", "UI", "1f6feb"),
            Tag::new("api", "API", "8250df"),
            Tag::new("mobile", "Mobile", "bf8700"),
            Tag::new("docs", "Docs", "1a7f37"),
        ]
    }

    #[test]
    fn drops_unresolved_slugs() {
        let tags = vec![Tag::new("ui", "UI", "000000")];
        let resolved = resolve_tags(&["ui", "missing"], &tags, DEFAULT_TAG_DISPLAY_CAP);
        let names: Vec<_> = resolved.shown.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["UI"]);
        assert_eq!(resolved.remainder, 0);
    }

    #[test]
    fn caps_and_counts_remainder() {
        let tags = tags();
        let resolved = resolve_tags(&["docs", "api", "ui", "mobile", "gone"], &tags, 3);
        let names: Vec<_> = resolved.shown.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Docs", "API", "UI"]);
        assert_eq!(resolved.remainder, 2);
    }

    #[test]
    fn unresolved_slug_inside_cap_is_not_backfilled() {
        let tags = tags();
        let resolved = resolve_tags(&["gone", "ui", "api", "docs"], &tags, 3);
        assert_eq!(resolved.shown.len(), 2);
        assert_eq!(resolved.remainder, 1);
    }

    #[test]
    fn empty_references() {
        let tags = tags();
        let resolved = resolve_tags::<&str>(&[], &tags, 3);
        assert!(resolved.shown.is_empty());
        assert_eq!(resolved.remainder, 0);
    }

    #[test]
    fn badge_style_appends_alpha() {
        let style = Tag::new("ui", "UI", "#1f6feb").badge_style();
        assert_eq!(style.color, "#1f6feb");
        assert_eq!(style.background, "#1f6feb15");
    }
}
