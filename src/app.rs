use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::{
    config::Config,
    difficulty::Difficulty,
    session::{Clock, SystemClock, TypingSession},
    theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    Quit,
}

/// Terminal front-end over a [`TypingSession`]
#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub theme: Theme,
    pub state: AppState,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Box<dyn Clock>) -> Self {
        Self {
            session: TypingSession::with_clock(config.difficulty, clock),
            theme: config.theme,
            state: AppState::Running,
        }
    }

    /// Current preferences, for saving on exit
    pub fn config(&self) -> Config {
        Config {
            difficulty: self.session.difficulty(),
            theme: self.theme,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }

    /// Input is disabled once every word has been typed
    pub fn input_disabled(&self) -> bool {
        self.session.is_complete()
    }

    pub fn select_difficulty(&mut self, level: Difficulty) {
        self.session.select_difficulty(level);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state = AppState::Quit
            }
            KeyCode::Tab => self.select_difficulty(self.session.difficulty().next()),
            KeyCode::BackTab => self.select_difficulty(self.session.difficulty().previous()),
            KeyCode::Enter if self.input_disabled() => {
                self.select_difficulty(self.session.difficulty())
            }
            KeyCode::Backspace if !self.input_disabled() => {
                let mut field = self.session.current_input().to_string();
                // nothing to delete means no change event
                if field.pop().is_some() {
                    self.session.submit(&field);
                }
            }
            KeyCode::Char(c)
                if !self.input_disabled()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut field = self.session.current_input().to_string();
                field.push(c);
                self.session.submit(&field);
            }
            code => debug!(?code, "key ignored"),
        }
    }
}
