pub mod reconciler;
pub mod runtime;
pub mod sprint;
pub mod stats;
pub mod surface;
pub mod ui;
pub mod words;

use crate::runtime::{CrosstermEventSource, FixedTicker, Runner, SprintEvent};
use crate::sprint::{Sprint, TICK_MS};
use crate::ui::Screen;
use crate::words::{Lexicon, RandomWordSource};
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
    time::Duration,
};

/// sixty second word sprint typing tui
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A sixty second word sprint: type the scrolling words, end each with space, and see live words-per-minute, characters-per-minute and accuracy."
)]
pub struct Cli {}

#[derive(Debug)]
pub struct App {
    pub sprint: Sprint,
    pub screen: Screen,
    pub words: RandomWordSource,
}

impl App {
    pub fn new() -> Self {
        let mut words = RandomWordSource::new(Lexicon::english());
        let mut screen = Screen::new();
        let mut sprint = Sprint::new();
        sprint.start(&mut words, &mut screen);

        Self {
            sprint,
            screen,
            words,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = run_session(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_session<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_MS)),
    );

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            SprintEvent::Tick => app.sprint.on_tick(&mut app.screen),
            SprintEvent::Resize => {}
            SprintEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Backspace => reconciler::backspace(&mut app.sprint, &mut app.screen),
                KeyCode::Char(' ') => {
                    reconciler::space(&mut app.sprint, &mut app.words, &mut app.screen)
                }
                KeyCode::Char('r') if app.sprint.has_ended() => {
                    app.sprint.reset(&mut app.words, &mut app.screen)
                }
                KeyCode::Char(c) => reconciler::insert_char(&mut app.sprint, c, &mut app.screen),
                _ => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
