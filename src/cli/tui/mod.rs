//! Interactive roadmap board
//!
//! One column per roadmap section, cards ranked by votes, rendered with
//! ratatui on a crossterm backend.

mod app;
mod event;
mod draw;

use std::io::{self, Stdout};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use anyhow::{anyhow, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::view::RoadmapView;
use super::Output;
use crate::storage::Board;
use app::{Action, App};
use event::{Event, EventHandler};

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(ratatui::Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Launch the board
pub fn run(output: &Output) -> Result<()> {
    let board = Board::open_current()?;
    let view = load_view(board.root())?;
    output.verbose_ctx("board", &format!("Loaded {} sections", view.roadmap.sections.len()));

    let mut app = App::new(view);
    let mut terminal = init_terminal()?;
    let events = EventHandler::new(250);

    // Restore the terminal even if drawing panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        event_loop(&mut terminal, &mut app, &events, board.root())
    }));
    let restored = restore_terminal();

    match result {
        Ok(inner) => {
            restored?;
            inner
        }
        Err(payload) => {
            let _ = restored;
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown error".to_string());
            Err(anyhow!("Board panicked: {}", message))
        }
    }
}

/// Reopens the board so config edits are picked up along with the snapshot
fn load_view(root: &Path) -> Result<RoadmapView> {
    let board = Board::open(root)?;
    RoadmapView::load(&board, &[], None)
}

fn event_loop(terminal: &mut Terminal, app: &mut App, events: &EventHandler, root: &Path) -> Result<()> {
    loop {
        terminal.draw(|frame| draw::draw(frame, app))?;

        let Event::Key(key) = events.next()? else {
            continue;
        };

        match app.handle_key(key) {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Reload => match load_view(root) {
                Ok(view) => app.replace_view(view, "Reloaded"),
                Err(e) => app.set_status(format!("Reload failed: {:#}", e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, PostStatus};
    use crate::storage::Snapshot;
    use std::fs;
    use tempfile::TempDir;

    fn statuses(view: &RoadmapView) -> Vec<PostStatus> {
        view.roadmap.sections.iter().map(|s| s.status).collect()
    }

    #[test]
    fn reload_picks_up_config_changes() {
        let dir = TempDir::new().unwrap();
        let board = Board::init(dir.path()).unwrap();
        board
            .import(&Snapshot {
                posts: vec![
                    Post::new(1, 1, "sso", "SSO", PostStatus::Planned),
                    Post::new(2, 2, "api", "API v2", PostStatus::Started),
                ],
                ..Snapshot::default()
            })
            .unwrap();

        let view = load_view(board.root()).unwrap();
        assert_eq!(statuses(&view), vec![PostStatus::Planned, PostStatus::Started]);

        fs::write(
            board.board_dir().join("config.toml"),
            r#"status_order = ["started", "planned"]"#,
        )
        .unwrap();

        let view = load_view(board.root()).unwrap();
        assert_eq!(statuses(&view), vec![PostStatus::Started, PostStatus::Planned]);
    }
}
