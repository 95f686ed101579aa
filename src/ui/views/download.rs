use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::api::ReleaseApi;
use crate::config::{AppConfig, DEFAULT_BACKUP_NAME};
use crate::ui::input::Input;
use crate::ui::view::{Effect, View, ViewId, help_line, is_quit, render_chrome};
use crate::workflow::{DownloadWorkflow, RunOutcome, WorkflowState};

pub(in crate::ui) struct DownloadView<A> {
    workflow: DownloadWorkflow<A>,
    config: AppConfig,
    input: Input,
    outcome: Option<RunOutcome>,
}

impl<A: ReleaseApi> DownloadView<A> {
    pub(in crate::ui) fn new(workflow: DownloadWorkflow<A>, config: AppConfig) -> Self {
        Self {
            workflow,
            config,
            input: Input::default(),
            outcome: None,
        }
    }
}

impl<A: ReleaseApi + 'static> View for DownloadView<A> {
    fn id(&self) -> ViewId {
        ViewId::Download
    }

    fn init(&mut self) -> Effect {
        self.outcome = Some(self.workflow.run());
        Effect::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        match self.workflow.state() {
            // Free-text entry: every printable key belongs to the input,
            // so quit is not reachable from here.
            WorkflowState::BackupInput => match key.code {
                KeyCode::Enter => {
                    let filename = self.input.buf.clone();
                    self.outcome = Some(self.workflow.confirm_backup(&filename));
                    Effect::None
                }
                KeyCode::Esc => {
                    self.workflow.cancel_backup_input();
                    Effect::None
                }
                KeyCode::Backspace => {
                    self.input.backspace();
                    Effect::None
                }
                KeyCode::Delete => {
                    self.input.delete();
                    Effect::None
                }
                KeyCode::Left => {
                    self.input.move_left();
                    Effect::None
                }
                KeyCode::Right => {
                    self.input.move_right();
                    Effect::None
                }
                KeyCode::Char(c) => {
                    self.input.insert_char(c);
                    Effect::None
                }
                _ => Effect::None,
            },

            WorkflowState::BackupPrompt => {
                if is_quit(&key) {
                    return Effect::Quit;
                }
                match key.code {
                    KeyCode::Char('y') => {
                        self.input.clear();
                        self.workflow.accept_backup();
                        Effect::None
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        self.workflow.decline_backup();
                        Effect::Switch(ViewId::Home)
                    }
                    _ => Effect::None,
                }
            }

            WorkflowState::Normal => {
                if is_quit(&key) {
                    return Effect::Quit;
                }
                match key.code {
                    KeyCode::Char('r') => {
                        self.outcome = Some(self.workflow.retry());
                        Effect::None
                    }
                    KeyCode::Esc => Effect::Switch(ViewId::Home),
                    _ => Effect::None,
                }
            }
        }
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        let inner = render_chrome(frame, "Download latest build", area);

        match self.workflow.state() {
            WorkflowState::BackupPrompt => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(inner);

                let text = vec![
                    Line::from(format!(
                        "{} already exists.",
                        self.config.artifact_path.display()
                    )),
                    Line::from("Back it up before downloading?"),
                ];
                frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), parts[0]);
                frame.render_widget(
                    Paragraph::new(help_line(&[
                        ("y", "back up"),
                        ("n/esc", "cancel"),
                        ("q", "quit"),
                    ])),
                    parts[1],
                );
            }

            WorkflowState::BackupInput => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(0),
                        Constraint::Length(3),
                        Constraint::Length(1),
                    ])
                    .split(inner);

                frame.render_widget(
                    Paragraph::new(format!(
                        "Backup filename (blank for {DEFAULT_BACKUP_NAME}):"
                    )),
                    parts[0],
                );
                frame.render_widget(
                    Paragraph::new(self.input.buf.as_str())
                        .block(Block::default().borders(Borders::ALL).title("Filename")),
                    parts[1],
                );
                frame.set_cursor_position((
                    parts[1].x + 1 + self.input.cursor() as u16,
                    parts[1].y + 1,
                ));
                frame.render_widget(
                    Paragraph::new(help_line(&[("enter", "confirm"), ("esc", "back")])),
                    parts[2],
                );
            }

            WorkflowState::Normal => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(inner);

                let mut lines = outcome_lines(&self.outcome);
                if self.workflow.retries() > 0 {
                    lines.push(Line::from(""));
                    lines.push(Line::from(format!("Retries: {}", self.workflow.retries())));
                }
                if let Some(warning) = self.workflow.persist_warning() {
                    lines.push(Line::from(""));
                    lines.push(Line::styled(
                        warning.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), parts[0]);

                let help = if matches!(self.outcome, Some(RunOutcome::Failed(_))) {
                    help_line(&[("r", "retry"), ("esc", "back"), ("q", "quit")])
                } else {
                    help_line(&[("esc", "back"), ("q", "quit")])
                };
                frame.render_widget(Paragraph::new(help), parts[1]);
            }
        }
    }
}

fn outcome_lines(outcome: &Option<RunOutcome>) -> Vec<Line<'static>> {
    match outcome {
        Some(RunOutcome::Success(release)) => vec![
            Line::styled(
                "Downloaded latest build!".to_string(),
                Style::default().fg(Color::Green),
            ),
            Line::from(""),
            Line::from(format!(
                "{} (version {}, build #{})",
                release.identifier(),
                release.version,
                release.build.build
            )),
        ],
        Some(RunOutcome::AlreadyCurrent(release)) => vec![Line::from(vec![
            Span::raw("Already on the latest build ("),
            Span::styled(
                release.identifier().to_string(),
                Style::default().fg(Color::Green),
            ),
            Span::raw(")"),
        ])],
        // The prompt states render this instead; reachable only if the
        // workflow was abandoned mid-prompt.
        Some(RunOutcome::BackupRequired) => vec![Line::from("Backup pending")],
        Some(RunOutcome::Failed(err)) => vec![Line::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )],
        None => vec![Line::from("Working...")],
    }
}
