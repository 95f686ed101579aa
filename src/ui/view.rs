use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

/// Screens reachable from the home menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewId {
    Home,
    Version,
    Build,
    InstalledBuild,
    Download,
}

/// What a view wants the manager to do after handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Switch(ViewId),
    Quit,
}

pub(super) trait View {
    fn id(&self) -> ViewId;
    fn init(&mut self) -> Effect;
    fn handle_key(&mut self, key: KeyEvent) -> Effect;
    fn render(&self, frame: &mut ratatui::Frame, area: Rect);
}

pub(super) fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL))
}

pub(super) fn render_chrome(frame: &mut ratatui::Frame, title: &str, area: Rect) -> Rect {
    let header = Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Yellow),
    ));
    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}

pub(super) fn help_line(entries: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, label)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw(format!(" {label}")));
    }
    Line::from(spans)
}
