//! Board state and key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::view::RoadmapView;
use crate::domain::{RoadmapCard, RoadmapSection};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Reload,
}

/// Board state
pub struct App {
    view: RoadmapView,

    /// Focused column
    column: usize,

    /// Selected card per column
    selected: Vec<usize>,

    status_message: Option<String>,
}

impl App {
    pub fn new(view: RoadmapView) -> Self {
        let selected = vec![0; view.roadmap.sections.len()];
        Self {
            view,
            column: 0,
            selected,
            status_message: None,
        }
    }

    /// Swap in freshly loaded data, keeping the focus where it still fits
    pub fn replace_view(&mut self, view: RoadmapView, message: &str) {
        let columns = view.roadmap.sections.len();
        self.selected = (0..columns)
            .map(|i| {
                let old = self.selected.get(i).copied().unwrap_or(0);
                let cards = view.roadmap.sections[i].cards.len();
                old.min(cards.saturating_sub(1))
            })
            .collect();
        self.column = self.column.min(columns.saturating_sub(1));
        self.view = view;
        self.status_message = Some(message.to_string());
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('r') => return Action::Reload,

            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => self.move_column(-1),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => self.move_column(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_card(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_card(1),

            KeyCode::Char('?') => {
                self.status_message = Some("h/l:column j/k:card r:reload q:quit".to_string());
            }

            _ => {}
        }

        Action::None
    }

    fn move_column(&mut self, delta: isize) {
        let columns = self.sections().len();
        if columns == 0 {
            return;
        }
        self.column = (self.column as isize + delta).rem_euclid(columns as isize) as usize;
        self.status_message = None;
    }

    fn move_card(&mut self, delta: isize) {
        let Some(section) = self.sections().get(self.column) else {
            return;
        };
        let cards = section.cards.len();
        if cards == 0 {
            return;
        }
        let current = self.selected[self.column] as isize;
        self.selected[self.column] = (current + delta).clamp(0, cards as isize - 1) as usize;
        self.status_message = None;
    }

    pub fn sections(&self) -> &[RoadmapSection] {
        &self.view.roadmap.sections
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn selected_in(&self, column: usize) -> usize {
        self.selected.get(column).copied().unwrap_or(0)
    }

    pub fn selected_card(&self) -> Option<&RoadmapCard> {
        self.sections()
            .get(self.column)
            .and_then(|s| s.cards.get(self.selected_in(self.column)))
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Posts grouped across every status, not only the displayed ones
    pub fn grouped_total(&self) -> usize {
        self.view.groups.total()
    }
}
