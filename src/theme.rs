use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

use crate::session::{InputStatus, WordState};

/// Named look for the typing screen
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Ocean,
    Mono,
}

/// Resolved styles for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub title: Style,
    pub selected: Style,
    pub untyped: Style,
    pub correct: Style,
    pub incorrect: Style,
    pub border: Style,
    pub border_matching: Style,
    pub border_mismatch: Style,
    pub stats: Style,
    pub hint: Style,
}

impl Theme {
    pub fn palette(&self) -> Palette {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);
        let hint = Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM);

        match self {
            Theme::Classic => Palette {
                title: bold,
                selected: bold.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
                untyped: Style::default(),
                correct: Style::default().fg(Color::Green),
                incorrect: Style::default().fg(Color::Red),
                border: Style::default(),
                border_matching: Style::default().fg(Color::Green),
                border_mismatch: Style::default().fg(Color::Red),
                stats: bold,
                hint,
            },
            Theme::Ocean => Palette {
                title: bold.fg(Color::Blue),
                selected: bold.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                untyped: dim,
                correct: bold.fg(Color::Cyan),
                incorrect: bold.fg(Color::Magenta),
                border: Style::default().fg(Color::Blue),
                border_matching: Style::default().fg(Color::Cyan),
                border_mismatch: Style::default().fg(Color::Magenta),
                stats: bold.fg(Color::Blue),
                hint,
            },
            Theme::Mono => Palette {
                title: bold,
                selected: bold.add_modifier(Modifier::REVERSED),
                untyped: dim,
                correct: bold,
                incorrect: Style::default().add_modifier(Modifier::CROSSED_OUT),
                border: dim,
                border_matching: bold,
                border_mismatch: Style::default().add_modifier(Modifier::SLOW_BLINK),
                stats: bold,
                hint,
            },
        }
    }
}

impl Palette {
    pub fn word(&self, state: WordState) -> Style {
        match state {
            WordState::Untyped => self.untyped,
            WordState::Correct => self.correct,
            WordState::Incorrect => self.incorrect,
        }
    }

    pub fn input_border(&self, status: InputStatus) -> Style {
        match status {
            InputStatus::Empty => self.border,
            InputStatus::Matching => self.border_matching,
            InputStatus::Mismatch => self.border_mismatch,
        }
    }
}
