use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::error::UpdateError;
use crate::ledger::InstallLedger;
use crate::ui::view::{Effect, View, ViewId, help_line, is_quit, render_chrome};

pub(in crate::ui) struct InstalledBuildView {
    ledger: InstallLedger,
    result: Option<Result<String, UpdateError>>,
}

impl InstalledBuildView {
    pub(in crate::ui) fn new(ledger: InstallLedger) -> Self {
        Self {
            ledger,
            result: None,
        }
    }
}

impl View for InstalledBuildView {
    fn id(&self) -> ViewId {
        ViewId::InstalledBuild
    }

    fn init(&mut self) -> Effect {
        self.result = Some(self.ledger.last_installed());
        Effect::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if is_quit(&key) {
            return Effect::Quit;
        }
        match key.code {
            KeyCode::Esc => Effect::Switch(ViewId::Home),
            _ => Effect::None,
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let inner = render_chrome(frame, "Installed build", area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let lines = match &self.result {
            Some(Ok(id)) if id.is_empty() => vec![Line::from("No build installed yet")],
            Some(Ok(id)) => vec![
                Line::from(format!("Installed build is {id}")),
                Line::from(""),
                Line::from(format!(
                    "According to {}; manual updates are not tracked.",
                    self.ledger.marker_path().display()
                )),
            ],
            Some(Err(err)) => vec![Line::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            )],
            None => vec![Line::from("Checking...")],
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[0]);

        frame.render_widget(
            Paragraph::new(help_line(&[("esc", "back"), ("q", "quit")])),
            parts[1],
        );
    }
}
