//! Status grouping and ranking
//!
//! Splits a flat post list into one list per status, each ranked by votes.
//!
//! ## Rules
//!
//! - Every [`PostStatus`] has a list, even when no post carries it.
//! - Deleted and duplicate posts are dropped before grouping.
//! - Lists are sorted by `votes_count` descending. The sort is stable, so
//!   posts with equal votes keep their input order.
//! - Posts with an unrecognized status go through [`UnknownStatusPolicy`].
//!
//! Grouping never fails: empty input gives empty groups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::post::Post;
use super::status::{PostStatus, StatusValue};

/// What to do with posts whose status is not in [`PostStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStatusPolicy {
    /// Group them under their literal status in the overflow table
    #[default]
    Collect,
    /// Drop them and log a warning
    Reject,
}

/// Posts grouped by status, each group ranked by votes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGroups {
    table: [Vec<Post>; PostStatus::COUNT],
    overflow: BTreeMap<String, Vec<Post>>,
    rejected: usize,
}

impl StatusGroups {
    fn empty() -> Self {
        Self {
            table: Default::default(),
            overflow: BTreeMap::new(),
            rejected: 0,
        }
    }

    /// Posts for a known status. Always defined.
    pub fn get(&self, status: PostStatus) -> &[Post] {
        &self.table[status.index()]
    }

    /// Posts for a raw status key, known or overflow.
    ///
    /// Returns `None` only for an unrecognized key no post carried.
    pub fn get_key(&self, key: &str) -> Option<&[Post]> {
        match StatusValue::parse(key) {
            StatusValue::Known(status) => Some(self.get(status)),
            StatusValue::Unrecognized(raw) => self.overflow.get(&raw).map(Vec::as_slice),
        }
    }

    /// Known groups in [`PostStatus::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (PostStatus, &[Post])> {
        PostStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Groups for unrecognized statuses, keyed by literal
    pub fn overflow(&self) -> &BTreeMap<String, Vec<Post>> {
        &self.overflow
    }

    /// Number of grouped posts, overflow included
    pub fn total(&self) -> usize {
        self.table.iter().map(Vec::len).sum::<usize>()
            + self.overflow.values().map(Vec::len).sum::<usize>()
    }

    /// Number of posts dropped under [`UnknownStatusPolicy::Reject`]
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Per-status counts of the grouped posts
    pub fn counts(&self) -> BTreeMap<String, u64> {
        let known = self
            .iter()
            .map(|(status, posts)| (status.as_str().to_string(), posts.len() as u64));
        let overflow = self
            .overflow
            .iter()
            .map(|(key, posts)| (key.clone(), posts.len() as u64));
        known.chain(overflow).collect()
    }
}

/// Groups posts by status and ranks each group by votes.
pub fn group_and_rank(posts: &[Post], policy: UnknownStatusPolicy) -> StatusGroups {
    let mut groups = StatusGroups::empty();
    let mut excluded = 0usize;

    for post in posts {
        match &post.status {
            StatusValue::Known(status) if status.is_excluded() => {
                excluded += 1;
            }
            StatusValue::Known(status) => {
                groups.table[status.index()].push(post.clone());
            }
            StatusValue::Unrecognized(raw) => match policy {
                UnknownStatusPolicy::Collect => {
                    groups.overflow.entry(raw.clone()).or_default().push(post.clone());
                }
                UnknownStatusPolicy::Reject => {
                    warn!(post = post.number, status = %raw, "rejecting post with unknown status");
                    groups.rejected += 1;
                }
            },
        }
    }

    for list in groups.table.iter_mut().chain(groups.overflow.values_mut()) {
        rank_by_votes(list);
    }

    debug!(
        input = posts.len(),
        grouped = groups.total(),
        excluded,
        rejected = groups.rejected,
        "grouped posts by status"
    );

    groups
}

/// Stable sort, most votes first
fn rank_by_votes(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.votes_count.cmp(&a.votes_count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn post(id: u64, status: &str, votes: u32) -> Post {
        Post::new(id, id, format!("post-{}", id), format!("Post {}", id), StatusValue::parse(status))
            .with_votes(votes)
    }

    fn votes(posts: &[Post]) -> Vec<u32> {
        posts.iter().map(|p| p.votes_count).collect()
    }

    #[test]
    fn empty_input_yields_every_status() {
        let groups = group_and_rank(&[], UnknownStatusPolicy::Collect);
        for status in PostStatus::ALL {
            assert!(groups.get(status).is_empty());
        }
        assert_eq!(groups.total(), 0);
    }

    #[test]
    fn planned_scenario() {
        let posts = vec![post(1, "planned", 5), post(2, "planned", 20), post(3, "deleted", 99)];
        let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);

        assert_eq!(votes(groups.get(PostStatus::Planned)), vec![20, 5]);
        assert!(groups.get(PostStatus::Deleted).is_empty());
        assert!(groups.get(PostStatus::Open).is_empty());
        assert!(groups.get(PostStatus::Started).is_empty());
        assert!(groups.get(PostStatus::Completed).is_empty());
    }

    #[test]
    fn duplicates_are_excluded() {
        let posts = vec![post(1, "duplicate", 3), post(2, "open", 1)];
        let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);
        assert!(groups.get(PostStatus::Duplicate).is_empty());
        assert_eq!(groups.total(), 1);
    }

    #[test]
    fn ties_keep_input_order() {
        let posts = vec![post(1, "started", 4), post(2, "started", 9), post(3, "started", 4)];
        let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);
        let ids: Vec<_> = groups.get(PostStatus::Started).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn unknown_status_is_collected() {
        let posts = vec![post(1, "archived", 1), post(2, "archived", 8), post(3, "open", 2)];
        let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);

        assert_eq!(votes(groups.get_key("archived").unwrap()), vec![8, 1]);
        assert_eq!(groups.total(), 3);
        assert_eq!(groups.rejected(), 0);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let posts = vec![post(1, "archived", 1), post(2, "open", 2)];
        let groups = group_and_rank(&posts, UnknownStatusPolicy::Reject);

        assert!(groups.get_key("archived").is_none());
        assert!(groups.overflow().is_empty());
        assert_eq!(groups.total(), 1);
        assert_eq!(groups.rejected(), 1);
    }

    #[test]
    fn get_key_resolves_known_statuses() {
        let groups = group_and_rank(&[post(1, "completed", 1)], UnknownStatusPolicy::Collect);
        assert_eq!(groups.get_key("completed").map(<[Post]>::len), Some(1));
        assert_eq!(groups.get_key("open").map(<[Post]>::len), Some(0));
        assert!(groups.get_key("never-seen").is_none());
    }

    #[test]
    fn counts_cover_known_and_overflow() {
        let posts = vec![post(1, "planned", 1), post(2, "weird", 1)];
        let counts = group_and_rank(&posts, UnknownStatusPolicy::Collect).counts();
        assert_eq!(counts.get("planned"), Some(&1));
        assert_eq!(counts.get("open"), Some(&0));
        assert_eq!(counts.get("weird"), Some(&1));
    }

    const STATUSES: [&str; 9] = [
        "open", "planned", "started", "completed", "declined", "duplicate", "deleted", "archived",
        "",
    ];

    fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
        prop::collection::vec((0..STATUSES.len(), 0u32..50), 0..60).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (s, v))| post(i as u64, STATUSES[s], v))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn every_status_is_present(posts in arb_posts()) {
            let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);
            prop_assert_eq!(groups.iter().count(), PostStatus::COUNT);
            for status in PostStatus::ALL {
                prop_assert!(groups.get_key(status.as_str()).is_some());
            }
        }

        #[test]
        fn excluded_posts_never_appear(posts in arb_posts()) {
            let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);
            let all = groups.iter().flat_map(|(_, p)| p.iter())
                .chain(groups.overflow().values().flatten());
            for p in all {
                prop_assert!(!p.status.is_excluded());
            }
        }

        #[test]
        fn groups_are_ranked(posts in arb_posts()) {
            let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);
            let lists = groups.iter().map(|(_, p)| p)
                .chain(groups.overflow().values().map(Vec::as_slice));
            for list in lists {
                for pair in list.windows(2) {
                    prop_assert!(pair[0].votes_count >= pair[1].votes_count);
                }
            }
        }

        #[test]
        fn total_is_input_minus_excluded(posts in arb_posts()) {
            let groups = group_and_rank(&posts, UnknownStatusPolicy::Collect);
            let excluded = posts.iter().filter(|p| p.status.is_excluded()).count();
            prop_assert_eq!(groups.total(), posts.len() - excluded);
        }

        #[test]
        fn reject_accounts_for_every_post(posts in arb_posts()) {
            let groups = group_and_rank(&posts, UnknownStatusPolicy::Reject);
            let excluded = posts.iter().filter(|p| p.status.is_excluded()).count();
            prop_assert!(groups.overflow().is_empty());
            prop_assert_eq!(groups.total() + groups.rejected(), posts.len() - excluded);
        }
    }
}
