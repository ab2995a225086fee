//! Board layout: one column per roadmap section

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::App;
use crate::domain::{PostStatus, RoadmapCard, RoadmapSection};

pub fn draw(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Columns
            Constraint::Length(7), // Selected card
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let sections = app.sections();
    if sections.is_empty() {
        let empty = Paragraph::new("Nothing on the roadmap yet. Import a snapshot and press r.")
            .block(Block::default().borders(Borders::ALL).title("Roadmap"));
        frame.render_widget(empty, rows[0]);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, sections.len() as u32); sections.len()])
            .split(rows[0]);

        for (i, section) in sections.iter().enumerate() {
            draw_column(frame, app, i, section, columns[i]);
        }
    }

    draw_details(frame, app.selected_card(), rows[1]);
    draw_status_bar(frame, app, rows[2]);
}

fn status_color(status: PostStatus) -> Color {
    match status {
        PostStatus::Planned => Color::Blue,
        PostStatus::Started => Color::Yellow,
        PostStatus::Completed => Color::Green,
        PostStatus::Declined => Color::Red,
        _ => Color::Gray,
    }
}

fn draw_column(frame: &mut Frame, app: &App, index: usize, section: &RoadmapSection, area: Rect) {
    let color = status_color(section.status);
    let focused = index == app.column();
    let width = area.width.saturating_sub(10) as usize;

    let items: Vec<ListItem> = section
        .cards
        .iter()
        .map(|card| {
            let votes = card.votes.map(|v| format!("{:>4}", v)).unwrap_or_else(|| "    ".to_string());
            ListItem::new(format!("{} {}", votes, clip(&card.title, width)))
        })
        .collect();

    let border = if focused {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("{} ({})", section.title, section.count))
                .borders(Borders::ALL)
                .border_style(border),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused && !section.cards.is_empty() {
        state.select(Some(app.selected_in(index)));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_details(frame: &mut Frame, card: Option<&RoadmapCard>, area: Rect) {
    let mut lines = Vec::new();

    if let Some(card) = card {
        lines.push(Line::from(vec![
            Span::styled(card.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  {}", card.url)),
        ]));
        if let Some(excerpt) = &card.excerpt {
            lines.push(Line::from(excerpt.clone()));
        }

        let mut footer: Vec<Span> = card
            .tags
            .iter()
            .map(|t| Span::styled(format!("#{} ", t.name), Style::default().fg(Color::Cyan)))
            .collect();
        if let Some(more) = card.more_tags {
            footer.push(Span::raw(format!("+{} ", more)));
        }
        if let Some(comments) = &card.comments {
            footer.push(Span::styled(comments.clone(), Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(footer));
    }

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Post"));

    frame.render_widget(details, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let message = app
        .status_message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} posts grouped  [?]help [r]eload [q]uit", app.grouped_total()));

    let paragraph = Paragraph::new(format!("Roadmap  {}", message))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Cut to `width` characters, marking the cut with `~`
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_titles() {
        assert_eq!(clip("Dark mode", 20), "Dark mode");
        assert_eq!(clip("", 0), "");
    }

    #[test]
    fn clip_marks_cut() {
        assert_eq!(clip("Single sign-on", 6), "Singl~");
        assert_eq!(clip("Ünïcödé", 4), "Ünï~");
    }
}
