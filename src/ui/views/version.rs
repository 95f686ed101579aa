use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::api::ReleaseApi;
use crate::error::UpdateError;
use crate::resolver::Resolver;
use crate::ui::view::{Effect, View, ViewId, help_line, is_quit, render_chrome};

pub(in crate::ui) struct VersionView<A> {
    resolver: Resolver<A>,
    result: Option<Result<String, UpdateError>>,
}

impl<A: ReleaseApi> VersionView<A> {
    pub(in crate::ui) fn new(resolver: Resolver<A>) -> Self {
        Self {
            resolver,
            result: None,
        }
    }
}

impl<A: ReleaseApi + 'static> View for VersionView<A> {
    fn id(&self) -> ViewId {
        ViewId::Version
    }

    fn init(&mut self) -> Effect {
        self.result = Some(self.resolver.latest_stable_version());
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
        let inner = render_chrome(frame, "Latest version", area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let line = match &self.result {
            Some(Ok(version)) => Line::from(format!("Latest stable version is {version}")),
            Some(Err(err)) => Line::styled(err.to_string(), Style::default().fg(Color::Red)),
            None => Line::from("Checking..."),
        };
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }), parts[0]);

        frame.render_widget(
            Paragraph::new(help_line(&[("esc", "back"), ("q", "quit")])),
            parts[1],
        );
    }
}
