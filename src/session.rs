use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::difficulty::Difficulty;
use crate::util::mean;

/// Result of a completed (space-terminated) word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordOutcome {
    Correct,
    Incorrect,
}

impl WordOutcome {
    fn score(&self) -> f64 {
        match self {
            WordOutcome::Correct => 100.0,
            WordOutcome::Incorrect => 0.0,
        }
    }
}

/// Highlight state of a single reference word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordState {
    Untyped,
    Correct,
    Incorrect,
}

/// How the in-progress input relates to the next expected word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputStatus {
    Empty,
    Matching,
    Mismatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Complete,
}

/// Source of wall-clock time for the session timer
pub trait Clock: Debug + Send {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// A single attempt at typing one difficulty's paragraph.
///
/// The consumer hands over the full contents of the input field on every
/// change via [`TypingSession::submit`] and reads back the derived state to
/// render. Once [`TypingSession::is_complete`] is true the consumer should
/// stop delivering input; further submits are ignored.
#[derive(Debug)]
pub struct TypingSession {
    difficulty: Difficulty,
    words: Vec<String>,
    typed_results: Vec<WordOutcome>,
    current_input: String,
    started_at: Option<DateTime<Utc>>,
    wpm: f64,
    accuracy: f64,
    clock: Box<dyn Clock>,
}

impl TypingSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_clock(difficulty, Box::new(SystemClock))
    }

    pub fn with_clock(difficulty: Difficulty, clock: Box<dyn Clock>) -> Self {
        Self {
            difficulty,
            words: difficulty.words(),
            typed_results: vec![],
            current_input: String::new(),
            started_at: None,
            wpm: 0.0,
            accuracy: 100.0,
            clock,
        }
    }

    /// Switch to `level` and throw away all progress, even for the same level
    pub fn select_difficulty(&mut self, level: Difficulty) {
        info!(from = %self.difficulty, to = %level, "difficulty selected");
        self.difficulty = level;
        self.words = level.words();
        self.typed_results.clear();
        self.current_input.clear();
        self.started_at = None;
        self.wpm = 0.0;
        self.accuracy = 100.0;
    }

    /// Feed the full current field value after a change
    pub fn submit(&mut self, raw: &str) {
        if self.is_complete() {
            debug!(raw, "input after completion ignored");
            return;
        }

        if raw.ends_with(char::is_whitespace) {
            let word = raw.trim();
            let idx = self.typed_results.len();
            let outcome = if word == self.words[idx] {
                WordOutcome::Correct
            } else {
                WordOutcome::Incorrect
            };
            debug!(idx, word, expected = %self.words[idx], ?outcome, "word completed");

            self.typed_results.push(outcome);
            self.accuracy = self.calc_accuracy();
            self.current_input.clear();
        } else {
            self.current_input = raw.to_string();
        }

        let now = self.clock.now();
        let started_at = *self.started_at.get_or_insert(now);
        self.wpm = self.calc_wpm(started_at, now);

        if self.is_complete() {
            info!(
                difficulty = %self.difficulty,
                wpm = self.wpm,
                accuracy = self.accuracy,
                "session complete"
            );
        }
    }

    /// Mean of the per-word scores (100 for a match, 0 otherwise)
    fn calc_accuracy(&self) -> f64 {
        let scores = self
            .typed_results
            .iter()
            .map(WordOutcome::score)
            .collect::<Vec<f64>>();
        mean(&scores).unwrap_or(100.0)
    }

    /// Counts the word being typed as done. Infinite when no time has passed.
    fn calc_wpm(&self, started_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = (now - started_at).num_milliseconds().max(0);
        let elapsed_mins = elapsed_ms as f64 / 60_000.0;
        ((self.typed_results.len() + 1) as f64 / elapsed_mins).floor()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn typed_results(&self) -> &[WordOutcome] {
        &self.typed_results
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn wpm(&self) -> f64 {
        self.wpm
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// The next reference word still to be typed
    pub fn expected_word(&self) -> Option<&str> {
        self.words.get(self.typed_results.len()).map(String::as_str)
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.typed_results.len() >= self.words.len()
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.has_started() {
            Phase::InProgress
        } else {
            Phase::NotStarted
        }
    }

    pub fn word_states(&self) -> Vec<WordState> {
        (0..self.words.len())
            .map(|idx| match self.typed_results.get(idx) {
                Some(WordOutcome::Correct) => WordState::Correct,
                Some(WordOutcome::Incorrect) => WordState::Incorrect,
                None => WordState::Untyped,
            })
            .collect()
    }

    pub fn input_status(&self) -> InputStatus {
        if self.current_input.is_empty() {
            return InputStatus::Empty;
        }
        match self.expected_word() {
            Some(expected) if expected.starts_with(&self.current_input) => InputStatus::Matching,
            _ => InputStatus::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn session_with_clock(difficulty: Difficulty) -> (TypingSession, ManualClock) {
        let clock = ManualClock::default();
        let session = TypingSession::with_clock(difficulty, Box::new(clock.clone()));
        (session, clock)
    }

    fn assert_initial(session: &TypingSession) {
        assert!(session.typed_results().is_empty());
        assert_eq!(session.current_input(), "");
        assert_eq!(session.started_at(), None);
        assert_eq!(session.wpm(), 0.0);
        assert_eq!(session.accuracy(), 100.0);
        assert_eq!(session.phase(), Phase::NotStarted);
    }

    #[test]
    fn test_new_session_is_initial() {
        for level in Difficulty::ALL {
            let session = TypingSession::new(level);
            assert_initial(&session);
            assert_eq!(session.words(), level.words().as_slice());
        }
    }

    #[test]
    fn test_select_difficulty_resets_everything() {
        for level in Difficulty::ALL {
            let (mut session, clock) = session_with_clock(Difficulty::Easy);
            session.submit("This ");
            clock.advance(Duration::seconds(2));
            session.submit("is");
            assert!(session.has_started());

            session.select_difficulty(level);
            assert_initial(&session);
            assert_eq!(session.difficulty(), level);
            assert_eq!(session.words(), level.words().as_slice());
        }
    }

    #[test]
    fn test_medium_scenario() {
        let (mut session, clock) = session_with_clock(Difficulty::Medium);

        session.submit("Typing ");
        assert_eq!(session.typed_results(), &[WordOutcome::Correct]);
        assert_eq!(session.accuracy(), 100.0);

        clock.advance(Duration::seconds(1));
        session.submit("can ");
        assert_eq!(session.accuracy(), 100.0);

        clock.advance(Duration::seconds(1));
        session.submit("xyz ");
        assert_eq!(
            session.typed_results(),
            &[
                WordOutcome::Correct,
                WordOutcome::Correct,
                WordOutcome::Incorrect
            ]
        );
        assert!((session.accuracy() - 66.67).abs() < 0.01);
    }

    #[test]
    fn test_accuracy_matches_ratio_for_any_sequence() {
        let words = Difficulty::Hard.words();
        let (mut session, _clock) = session_with_clock(Difficulty::Hard);
        let mut correct = 0;

        for (n, word) in words.iter().enumerate() {
            // every third word is mistyped
            if n % 3 == 2 {
                session.submit("nope ");
            } else {
                session.submit(&format!("{word} "));
                correct += 1;
            }
            let expected = correct as f64 / (n + 1) as f64 * 100.0;
            assert!((session.accuracy() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_matching_is_exact() {
        let (mut session, _clock) = session_with_clock(Difficulty::Hard);
        session.submit("typing ");
        assert_eq!(session.typed_results(), &[WordOutcome::Incorrect]);

        for word in ["games", "can", "include", "complex"] {
            session.submit(&format!("{word} "));
        }
        session.submit("punctuation ");
        assert_eq!(session.typed_results().last(), Some(&WordOutcome::Incorrect));
        session.submit("grammar, ");
        assert_eq!(session.typed_results().last(), Some(&WordOutcome::Correct));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        session.submit("  This\t");
        assert_eq!(session.typed_results(), &[WordOutcome::Correct]);
    }

    #[test]
    fn test_lone_space_counts_as_wrong_word() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        session.submit(" ");
        assert_eq!(session.typed_results(), &[WordOutcome::Incorrect]);
        assert_eq!(session.accuracy(), 0.0);
    }

    #[test]
    fn test_partial_input_is_kept() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        session.submit("Th");
        assert_eq!(session.current_input(), "Th");
        assert!(session.typed_results().is_empty());
        assert_matches!(session.input_status(), InputStatus::Matching);

        session.submit("Tx");
        assert_matches!(session.input_status(), InputStatus::Mismatch);

        session.submit("Tx ");
        assert_eq!(session.current_input(), "");
        assert_matches!(session.input_status(), InputStatus::Empty);
    }

    #[test]
    fn test_no_append_after_completion() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        for word in Difficulty::Easy.words() {
            session.submit(&format!("{word} "));
        }
        assert!(session.is_complete());
        assert_eq!(session.phase(), Phase::Complete);
        let wpm = session.wpm();

        session.submit("extra ");
        session.submit("more");
        assert_eq!(session.typed_results().len(), Difficulty::Easy.words().len());
        assert_eq!(session.current_input(), "");
        assert_eq!(session.wpm(), wpm);
        assert_eq!(session.expected_word(), None);
    }

    #[test]
    fn test_first_keystroke_starts_clock() {
        let (mut session, clock) = session_with_clock(Difficulty::Easy);
        assert!(!session.has_started());

        session.submit("T");
        assert_eq!(session.started_at(), Some(clock.now()));
        assert_eq!(session.phase(), Phase::InProgress);

        let wpm = session.wpm();
        assert!(wpm.is_infinite() || wpm >= 0.0);
        assert!(!wpm.is_nan());
    }

    #[test]
    fn test_first_keystroke_as_space_also_starts_clock() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        session.submit("This ");
        assert!(session.has_started());
    }

    #[test]
    fn test_start_time_is_not_moved_by_later_keys() {
        let (mut session, clock) = session_with_clock(Difficulty::Easy);
        session.submit("T");
        let started = session.started_at();
        clock.advance(Duration::seconds(5));
        session.submit("Th");
        assert_eq!(session.started_at(), started);
    }

    #[test]
    fn test_wpm_counts_word_in_progress() {
        let (mut session, clock) = session_with_clock(Difficulty::Easy);
        session.submit("T");
        clock.advance(Duration::seconds(30));
        session.submit("This ");
        // (1 completed + 1 in progress) words over half a minute
        assert_eq!(session.wpm(), 4.0);

        clock.advance(Duration::seconds(30));
        session.submit("is ");
        assert_eq!(session.wpm(), 3.0);
    }

    #[test]
    fn test_wpm_is_floored() {
        let (mut session, clock) = session_with_clock(Difficulty::Easy);
        session.submit("T");
        clock.advance(Duration::seconds(7));
        session.submit("Th");
        // 1 / (7 / 60) = 8.57
        assert_eq!(session.wpm(), 8.0);
    }

    #[test]
    fn test_word_states() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        session.submit("This ");
        session.submit("was ");
        session.submit("a");

        let states = session.word_states();
        assert_eq!(states.len(), 6);
        assert_eq!(states[0], WordState::Correct);
        assert_eq!(states[1], WordState::Incorrect);
        assert!(states[2..].iter().all(|s| *s == WordState::Untyped));
    }

    #[test]
    fn test_switch_after_completion_discards_progress() {
        let (mut session, _clock) = session_with_clock(Difficulty::Easy);
        for word in Difficulty::Easy.words() {
            session.submit(&format!("{word} "));
        }
        assert!(session.is_complete());

        session.select_difficulty(Difficulty::Medium);
        assert_initial(&session);
        assert_eq!(session.expected_word(), Some("Typing"));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.advance(Duration::milliseconds(250));
        assert_eq!(other.now(), clock.now());
    }
}
