pub mod catalog;
pub mod config;
pub mod runtime;
pub mod session;
pub mod ui;

use crate::{
    catalog::{Catalog, Tier},
    config::{Config, ConfigStore, FileConfigStore},
    runtime::{spawn_input_listener, Countdown, SprintEvent},
    session::Session,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    sync::mpsc::{self, Sender},
};

/// minimal 60-second typing sprint
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A minimal typing sprint for the terminal: sixty seconds on the clock, sample paragraphs in three difficulty tiers, per-character feedback while you type."
)]
pub struct Cli {
    /// difficulty tier to draw sample paragraphs from (remembered between runs)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

pub struct App {
    pub session: Session,
    pub state: AppState,
    pub tier: Tier,
    pub catalog: Catalog,
    /// Live only while the session is `Running`; dropping it cancels the task.
    pub countdown: Option<Countdown>,
    pub config_store: FileConfigStore,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self, Box<dyn Error>> {
        let catalog = Catalog::load()?;
        let config_store = FileConfigStore::new();

        let tier = cli
            .difficulty
            .or_else(|| config_store.load().tier())
            .unwrap_or(Tier::Easy);

        let session = Session::new(catalog.pick(tier).text);
        Ok(Self {
            session,
            state: AppState::Typing,
            tier,
            catalog,
            countdown: None,
            config_store,
        })
    }

    /// Restart over the same paragraph.
    pub fn reset(&mut self) {
        self.countdown = None;
        self.session.reset();
        self.state = AppState::Typing;
    }

    /// Draw a fresh paragraph from the current tier.
    pub fn new_paragraph(&mut self) {
        self.countdown = None;
        self.session = Session::new(self.catalog.pick(self.tier).text);
        self.state = AppState::Typing;
    }

    /// Switch tiers, remember the choice, start over on a fresh paragraph.
    pub fn select_difficulty(&mut self, tier: Tier) {
        self.tier = tier;
        let _ = self.config_store.save(&Config::from_tier(tier));
        self.new_paragraph();
    }

    fn arm_countdown_if_started(&mut self, tx: &Sender<SprintEvent>) {
        if self.session.is_running() && self.countdown.is_none() {
            self.countdown = Some(Countdown::start(tx.clone()));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(cli)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel();
    spawn_input_listener(tx.clone());

    loop {
        terminal.draw(|f| ui(app, f))?;

        match rx.recv()? {
            SprintEvent::Tick => {
                app.session.tick();
                if app.session.has_finished() {
                    app.countdown = None;
                    app.state = AppState::Results;
                }
            }
            SprintEvent::Resize => {}
            SprintEvent::Key(key) => match app.state {
                AppState::Typing => match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Left => app.reset(),
                    KeyCode::Right => app.new_paragraph(),
                    KeyCode::Backspace => {
                        app.session.backspace();
                        app.arm_countdown_if_started(&tx);
                    }
                    KeyCode::Char(c) => {
                        app.session.write(c);
                        app.arm_countdown_if_started(&tx);
                    }
                    _ => {}
                },
                AppState::Results => match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('r') => app.reset(),
                    KeyCode::Char('n') => app.new_paragraph(),
                    KeyCode::Char('1') => app.select_difficulty(Tier::Easy),
                    KeyCode::Char('2') => app.select_difficulty(Tier::Medium),
                    KeyCode::Char('3') => app.select_difficulty(Tier::Hard),
                    _ => {}
                },
            },
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
