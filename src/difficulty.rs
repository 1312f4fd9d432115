use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the three preset paragraphs a session can be played on
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn paragraph(&self) -> &'static str {
        match self {
            Difficulty::Easy => "This is an easy typing test",
            Difficulty::Medium => "Typing can be moderately challenging if we add some complexity",
            Difficulty::Hard => {
                "Typing games can include complex punctuation, grammar, and less common vocabulary."
            }
        }
    }

    /// Reference words of the paragraph, split on whitespace
    pub fn words(&self) -> Vec<String> {
        self.paragraph()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Next level, wrapping from hard back to easy
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}
