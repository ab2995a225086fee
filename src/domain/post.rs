//! Post domain model
//!
//! A post is a single feedback item. Posts are produced by the fetch layer
//! and only read here, so the model is a plain data carrier with a few
//! display helpers.

use serde::{Deserialize, Deserializer, Serialize};

use super::status::{PostStatus, StatusValue};

/// A feedback post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,

    /// Sequence number shown in URLs
    pub number: u64,

    pub slug: String,

    pub title: String,

    /// Free text, may contain lightweight markup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: StatusValue,

    #[serde(default, deserialize_with = "null_as_default")]
    pub votes_count: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub comments_count: u32,

    /// Tag slugs, in the order they were attached
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    /// Creates a post with no description, votes, comments or tags
    pub fn new(
        id: u64,
        number: u64,
        slug: impl Into<String>,
        title: impl Into<String>,
        status: impl Into<StatusValue>,
    ) -> Self {
        Self {
            id,
            number,
            slug: slug.into(),
            title: title.into(),
            description: None,
            status: status.into(),
            votes_count: 0,
            comments_count: 0,
            tags: Vec::new(),
        }
    }

    pub fn with_votes(mut self, votes: u32) -> Self {
        self.votes_count = votes;
        self
    }

    pub fn with_comments(mut self, comments: u32) -> Self {
        self.comments_count = comments;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the known status, if the post carries one
    pub fn known_status(&self) -> Option<PostStatus> {
        self.status.known()
    }

    /// Relative link to the post page
    pub fn url(&self) -> String {
        format!("/posts/{}/{}", self.number, self.slug)
    }

    /// Description text if present and not blank
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Comment count label, `None` when there are no comments
    pub fn comments_label(&self) -> Option<String> {
        match self.comments_count {
            0 => None,
            1 => Some("1 comment".to_string()),
            n => Some(format!("{} comments", n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_number_and_slug() {
        let post = Post::new(10, 42, "dark-mode", "Dark mode", PostStatus::Planned);
        assert_eq!(post.url(), "/posts/42/dark-mode");
    }

    #[test]
    fn comments_label_pluralizes() {
        let post = Post::new(1, 1, "a", "A", PostStatus::Open);
        assert_eq!(post.comments_label(), None);
        assert_eq!(post.clone().with_comments(1).comments_label().as_deref(), Some("1 comment"));
        assert_eq!(post.with_comments(7).comments_label().as_deref(), Some("7 comments"));
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{"id":3,"number":9,"slug":"s","title":"T","status":"started","votesCount":12,"commentsCount":2,"tags":["ui"]}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.votes_count, 12);
        assert_eq!(post.comments_count, 2);
        assert_eq!(post.known_status(), Some(PostStatus::Started));
        assert_eq!(post.tags, vec!["ui"]);
        assert!(post.description.is_none());
    }

    #[test]
    fn missing_counts_default_to_zero() {
        let json = r#"{"id":1,"number":1,"slug":"s","title":"T","status":"open"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.votes_count, 0);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn null_fields_read_as_empty() {
        let json = r#"{"id":4,"number":4,"slug":"s","title":"T","description":null,"status":null,"votesCount":null,"commentsCount":null,"tags":null}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.tags.is_empty());
        assert!(post.description.is_none());
        assert_eq!(post.known_status(), Some(PostStatus::Open));
        assert_eq!(post.votes_count, 0);
        assert_eq!(post.comments_count, 0);
    }

    #[test]
    fn empty_description_is_treated_as_absent() {
        let post = Post::new(1, 1, "s", "T", PostStatus::Open).with_description("");
        assert!(post.description_text().is_none());
    }
}
