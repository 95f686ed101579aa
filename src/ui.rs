//! Terminal frontend: one active view plus the navigation manager.

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::{HttpReleaseApi, ReleaseApi};
use crate::config::AppConfig;
use crate::ledger::InstallLedger;
use crate::resolver::Resolver;
use crate::workflow::DownloadWorkflow;

mod input;
mod view;
mod views;

pub use view::{Effect, ViewId};

use view::View;
use views::{BuildView, DownloadView, HomeView, InstalledBuildView, VersionView};

pub fn run(config: AppConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("paperup requires an interactive terminal (TTY)");
    }

    let api = HttpReleaseApi::new(&config.base_url, &config.project)
        .context("build release API client")?;
    let ledger = InstallLedger::open(&config.logs_dir).context("open install ledger")?;

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut manager = Manager::new(config, api, ledger);
    let res = run_loop(&mut terminal, &mut manager);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn run_loop<A: ReleaseApi + Clone + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    manager: &mut Manager<A>,
) -> Result<()> {
    loop {
        terminal.draw(|f| manager.render(f)).context("draw")?;
        if manager.should_quit() {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => manager.handle_key(k),
                // Resizes are picked up by the next draw.
                _ => {}
            }
        }
    }
}

/// Owns exactly one live view and performs all view switching. Switching
/// drops the previous view outright; nothing survives a navigation
/// away-and-back.
pub struct Manager<A: ReleaseApi + Clone> {
    config: AppConfig,
    api: A,
    ledger: InstallLedger,
    view: Box<dyn View>,
    quit: bool,
}

impl<A: ReleaseApi + Clone + 'static> Manager<A> {
    pub fn new(config: AppConfig, api: A, ledger: InstallLedger) -> Self {
        let mut manager = Self {
            config,
            api,
            ledger,
            view: Box::new(HomeView::new()),
            quit: false,
        };
        let effect = manager.view.init();
        manager.apply(effect);
        manager
    }

    pub fn view_id(&self) -> ViewId {
        self.view.id()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Forwards the key to the active view and applies whatever effect it
    /// returns.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let effect = self.view.handle_key(key);
        self.apply(effect);
    }

    pub fn render(&self, frame: &mut ratatui::Frame) {
        self.view.render(frame, frame.area());
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Quit => self.quit = true,
            Effect::Switch(id) => self.switch(id),
        }
    }

    fn switch(&mut self, id: ViewId) {
        self.view = self.build_view(id);
        let effect = self.view.init();
        self.apply(effect);
    }

    fn build_view(&self, id: ViewId) -> Box<dyn View> {
        match id {
            ViewId::Home => Box::new(HomeView::new()),
            ViewId::Version => Box::new(VersionView::new(Resolver::new(self.api.clone()))),
            ViewId::Build => Box::new(BuildView::new(Resolver::new(self.api.clone()))),
            ViewId::InstalledBuild => Box::new(InstalledBuildView::new(self.ledger.clone())),
            ViewId::Download => Box::new(DownloadView::new(
                DownloadWorkflow::new(
                    self.config.clone(),
                    Resolver::new(self.api.clone()),
                    self.ledger.clone(),
                ),
                self.config.clone(),
            )),
        }
    }
}
