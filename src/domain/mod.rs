//! Domain models for the roadmap
//!
//! Pure data and transformations, no I/O.

mod status;
mod post;
mod tag;
mod text;
mod grouping;
mod roadmap;
pub mod signin;

pub use status::{PostStatus, StatusValue, UnknownStatus};
pub use post::Post;
pub use tag::{resolve_tags, ResolvedTags, Tag, TagBadgeStyle, DEFAULT_TAG_DISPLAY_CAP};
pub use text::{truncate_description, DEFAULT_EXCERPT_LEN};
pub use grouping::{group_and_rank, StatusGroups, UnknownStatusPolicy};
pub use roadmap::{CardOptions, CountPerStatus, Roadmap, RoadmapCard, RoadmapSection, TagBadge};
