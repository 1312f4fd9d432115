use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};
use wordsprint::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging::{self, LogConfig},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, SessionEvent, Ticker},
    theme::Theme,
    App, Difficulty, TICK_RATE_MS,
};

/// word-by-word typing practice with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a fixed paragraph word by word. Each word turns green or red as you finish it, with live words-per-minute and accuracy."
)]
pub struct Cli {
    /// paragraph to practice on (defaults to the last one used)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// color theme (defaults to the last one used)
    #[clap(short = 't', long, value_enum)]
    theme: Option<Theme>,

    /// file to write logs to
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// more verbose logging, repeat for more detail
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// do not remember the chosen difficulty and theme
    #[clap(long)]
    no_save: bool,
}

impl Cli {
    /// Flags win over stored preferences
    fn merge(&self, stored: Config) -> Config {
        Config {
            difficulty: self.difficulty.unwrap_or(stored.difficulty),
            theme: self.theme.unwrap_or(stored.theme),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_file) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // logging is optional; the game runs without it
        let _ = logging::init(&LogConfig::from_verbosity(cli.verbose, log_file));
    }

    let store = FileConfigStore::new();
    let config = cli.merge(store.load());
    info!(?config, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if !cli.no_save {
        if let Err(err) = store.save(&app.config()) {
            warn!(%err, "could not save preferences");
        }
    }

    res
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit() {
        match runner.step() {
            SessionEvent::Key(key) => app.on_key(key),
            SessionEvent::Resize | SessionEvent::Tick => {}
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
