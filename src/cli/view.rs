//! View commands (show, groups, excerpt)

use anyhow::Result;

use super::output::Output;
use crate::domain::{
    group_and_rank, truncate_description, CountPerStatus, Roadmap, RoadmapCard, StatusGroups,
};
use crate::storage::{parse_status_list, Board};

/// Everything needed to draw the roadmap, loaded from the current board
pub struct RoadmapView {
    pub roadmap: Roadmap,
    pub groups: StatusGroups,
    /// True when counts came from the board rather than the grouped posts
    pub authoritative_counts: bool,
}

impl RoadmapView {
    /// Loads the board snapshot and builds the roadmap.
    ///
    /// `statuses` overrides the configured order when non-empty.
    pub fn load(board: &Board, statuses: &[String], max_len: Option<usize>) -> Result<Self> {
        let config = &board.config().board;
        let snapshot = board.load_snapshot()?;

        let status_order = if statuses.is_empty() {
            config.status_order()?
        } else {
            parse_status_list(statuses)?
        };

        let mut options = config.card_options();
        if let Some(len) = max_len {
            options.excerpt_len = len;
        }

        let groups = group_and_rank(&snapshot.posts, config.unknown_status);
        let authoritative_counts = snapshot.count_per_status.is_some();
        let counts = snapshot
            .count_per_status
            .unwrap_or_else(|| CountPerStatus::from_groups(&groups));

        let roadmap = Roadmap::build(&groups, &status_order, &counts, &snapshot.tags, options);

        Ok(Self {
            roadmap,
            groups,
            authoritative_counts,
        })
    }
}

/// Render the roadmap
pub fn show(output: &Output, statuses: &[String], max_len: Option<usize>) -> Result<()> {
    let board = Board::open_current()?;
    output.verbose_ctx("show", &format!("Opened board at: {}", board.root().display()));

    let view = RoadmapView::load(&board, statuses, max_len)?;
    if !view.authoritative_counts {
        output.verbose_ctx("show", "No counts.json, using counts of grouped posts");
    }
    output.verbose_ctx("show", &format!("Rendering {} sections", view.roadmap.sections.len()));

    if output.is_json() {
        output.data(&view.roadmap);
        return Ok(());
    }

    if view.roadmap.is_empty() {
        println!("Nothing on the roadmap yet.");
        return Ok(());
    }

    for (i, section) in view.roadmap.sections.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} ({})", section.title, section.count);
        println!("{}", "-".repeat(60));
        for card in &section.cards {
            print_card(card);
        }
    }

    Ok(())
}

fn print_card(card: &RoadmapCard) {
    let votes = card.votes.map(|v| v.to_string()).unwrap_or_default();
    println!("{:>5}  {}  {}", votes, card.title, card.url);

    if let Some(excerpt) = &card.excerpt {
        println!("       {}", excerpt);
    }

    let mut footer: Vec<String> = card.tags.iter().map(|t| format!("#{}", t.name)).collect();
    if let Some(more) = card.more_tags {
        footer.push(format!("+{}", more));
    }
    if let Some(comments) = &card.comments {
        footer.push(comments.clone());
    }
    if !footer.is_empty() {
        println!("       {}", footer.join("  "));
    }
}

/// Dump every status group with its ranked posts
pub fn groups(output: &Output, include_empty: bool) -> Result<()> {
    let board = Board::open_current()?;
    let config = &board.config().board;
    let snapshot = board.load_snapshot()?;

    let groups = group_and_rank(&snapshot.posts, config.unknown_status);
    output.verbose_ctx(
        "groups",
        &format!(
            "Grouped {} of {} posts ({} rejected)",
            groups.total(),
            snapshot.posts.len(),
            groups.rejected()
        ),
    );

    if output.is_json() {
        let known: serde_json::Map<_, _> = groups
            .iter()
            .filter(|(_, posts)| include_empty || !posts.is_empty())
            .map(|(status, posts)| (status.as_str().to_string(), serde_json::json!(posts)))
            .collect();
        output.data(&serde_json::json!({
            "groups": known,
            "overflow": groups.overflow(),
            "total": groups.total(),
            "rejected": groups.rejected(),
        }));
        return Ok(());
    }

    let known = groups
        .iter()
        .map(|(status, posts)| (status.as_str().to_string(), posts));
    let overflow = groups
        .overflow()
        .iter()
        .map(|(key, posts)| (format!("{} (unrecognized)", key), posts.as_slice()));

    println!("{:<24} {:>6}  TOP", "STATUS", "POSTS");
    println!("{}", "-".repeat(60));
    for (label, posts) in known.chain(overflow) {
        if posts.is_empty() && !include_empty {
            continue;
        }
        let top = posts
            .first()
            .map(|p| format!("{} ({} votes)", p.title, p.votes_count))
            .unwrap_or_default();
        println!("{:<24} {:>6}  {}", label, posts.len(), top);
    }

    println!();
    println!("Grouped {} post(s)", groups.total());
    if groups.rejected() > 0 {
        println!("Rejected {} post(s) with unrecognized status", groups.rejected());
    }

    Ok(())
}

/// Print the card excerpt for a piece of text
pub fn excerpt(output: &Output, text: &str, max_len: usize) -> Result<()> {
    let excerpt = truncate_description(text, max_len);

    if output.is_json() {
        output.data(&serde_json::json!({
            "excerpt": excerpt,
            "truncated": excerpt.ends_with("...") && excerpt.chars().count() > max_len,
        }));
    } else {
        println!("{}", excerpt);
    }

    Ok(())
}
