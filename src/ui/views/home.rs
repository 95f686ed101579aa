use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::ui::view::{Effect, View, ViewId, help_line, is_quit, render_chrome};

const MENU: &[(&str, Option<ViewId>)] = &[
    ("Check latest version", Some(ViewId::Version)),
    ("Check latest build", Some(ViewId::Build)),
    ("Check installed build", Some(ViewId::InstalledBuild)),
    ("Download latest build", Some(ViewId::Download)),
    ("Quit", None),
];

pub(in crate::ui) struct HomeView {
    selected: usize,
}

impl HomeView {
    pub(in crate::ui) fn new() -> Self {
        Self { selected: 0 }
    }
}

impl View for HomeView {
    fn id(&self) -> ViewId {
        ViewId::Home
    }

    fn init(&mut self) -> Effect {
        Effect::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if is_quit(&key) {
            return Effect::Quit;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Effect::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(MENU.len() - 1);
                Effect::None
            }
            KeyCode::Enter => match MENU[self.selected].1 {
                Some(id) => Effect::Switch(id),
                None => Effect::Quit,
            },
            _ => Effect::None,
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let inner = render_chrome(frame, "PaperMC updater", area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let items: Vec<ListItem> = MENU.iter().map(|(label, _)| ListItem::new(*label)).collect();
        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, parts[0], &mut state);

        frame.render_widget(
            Paragraph::new(help_line(&[
                ("up/down", "select"),
                ("enter", "open"),
                ("q", "quit"),
            ])),
            parts[1],
        );
    }
}
