use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::api::{BuildRecord, ReleaseApi};
use crate::error::UpdateError;
use crate::resolver::Resolver;
use crate::ui::view::{Effect, View, ViewId, help_line, is_quit, render_chrome};

pub(in crate::ui) struct BuildView<A> {
    resolver: Resolver<A>,
    result: Option<Result<(String, BuildRecord), UpdateError>>,
}

impl<A: ReleaseApi> BuildView<A> {
    pub(in crate::ui) fn new(resolver: Resolver<A>) -> Self {
        Self {
            resolver,
            result: None,
        }
    }

    fn check(&self) -> Result<(String, BuildRecord), UpdateError> {
        let version = self.resolver.latest_stable_version()?;
        let build = self.resolver.latest_build(&version)?;
        Ok((version, build))
    }
}

impl<A: ReleaseApi + 'static> View for BuildView<A> {
    fn id(&self) -> ViewId {
        ViewId::Build
    }

    fn init(&mut self) -> Effect {
        self.result = Some(self.check());
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
        let inner = render_chrome(frame, "Latest build", area);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let lines = match &self.result {
            Some(Ok((version, build))) => vec![
                Line::from(format!(
                    "Latest available build for {version} is #{}",
                    build.build
                )),
                Line::from(format!("Artifact: {}", build.artifact_name())),
                Line::from(format!("Channel: {}", build.channel)),
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
