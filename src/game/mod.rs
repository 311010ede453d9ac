pub mod letter;
pub mod word;

use std::fmt;

use anyhow::{ensure, Result};

use letter::{KeyboardState, Verdict};
use word::{Word, WORD_LENGTH};

/// The answer is always "woof", unless overridden at startup.
pub const TARGET: &str = "woof";
pub const MAX_ATTEMPTS: usize = 6;
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Construction-time game parameters.
///
/// The word length is fixed at compile time (`WORD_LENGTH`); target and
/// attempt count are plain data, fixed once the session is built.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub target: Word,
    pub max_attempts: usize,
    pub alphabet: &'static str,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            target: Word::parse(TARGET).expect("default target is well formed"),
            max_attempts: MAX_ATTEMPTS,
            alphabet: ALPHABET,
        }
    }
}

impl GameConfig {
    /// Build a config from user-supplied overrides, validating them.
    pub fn new(target: &str, max_attempts: usize) -> Result<Self> {
        ensure!(max_attempts > 0, "at least one attempt is required");
        Ok(GameConfig {
            target: Word::parse(target)?,
            max_attempts,
            alphabet: ALPHABET,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_over(self) -> bool {
        self != SessionState::InProgress
    }
}

/// One submitted row and its verdicts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredAttempt {
    pub row: usize,
    pub word: Word,
    pub verdicts: [Verdict; WORD_LENGTH],
}

/// Notification returned by every mutating session operation. Together
/// with the read accessors this is everything the presentation layer
/// needs to redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    AttemptChanged,
    IncompleteGuess,
    Scored {
        attempt: ScoredAttempt,
        state: SessionState,
    },
    Reset,
}

/// The turn state machine.
///
/// Owns the attempt buffer, the scored history, the keyboard aggregate and
/// the win/loss state; scoring itself is `Word::score`. Invalid operations
/// are silent no-ops, never failures.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    attempt: Word,
    row: usize,
    history: Vec<ScoredAttempt>,
    keyboard: KeyboardState,
    state: SessionState,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let history = Vec::with_capacity(config.max_attempts);
        GameSession {
            config,
            attempt: Word::new(),
            row: 0,
            history,
            keyboard: KeyboardState::new(),
            state: SessionState::InProgress,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Index of the row the next submission will score.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn attempt(&self) -> &Word {
        &self.attempt
    }

    pub fn history(&self) -> &[ScoredAttempt] {
        &self.history
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Append a letter to the current attempt. Out-of-alphabet letters, a
    /// full attempt and a finished game are all silent no-ops.
    pub fn push_letter(&mut self, letter: char) -> Option<SessionEvent> {
        if self.state.is_over() || !self.config.alphabet.contains(letter) {
            return None;
        }
        self.attempt
            .push(letter)
            .then_some(SessionEvent::AttemptChanged)
    }

    /// Remove the last letter of the current attempt.
    pub fn pop_letter(&mut self) -> Option<SessionEvent> {
        if self.state.is_over() {
            return None;
        }
        self.attempt.pop().then_some(SessionEvent::AttemptChanged)
    }

    /// Score the current attempt and advance the state machine.
    ///
    /// A short attempt is reported, not scored. The returned event carries
    /// the scored row and the state it led to; win/loss is settled the
    /// moment this returns.
    pub fn submit(&mut self) -> Option<SessionEvent> {
        if self.state.is_over() {
            return None;
        }
        if !self.attempt.is_full() {
            return Some(SessionEvent::IncompleteGuess);
        }

        let verdicts = self.config.target.score(&self.attempt);
        for (letter, verdict) in self.attempt.letters().zip(verdicts) {
            self.keyboard.record(letter, verdict);
        }

        let scored = ScoredAttempt {
            row: self.row,
            word: self.attempt,
            verdicts,
        };
        self.history.push(scored);

        if verdicts.iter().all(|&v| v == Verdict::Correct) {
            self.state = SessionState::Won;
        } else if self.row + 1 == self.config.max_attempts {
            self.state = SessionState::Lost;
        } else {
            self.row += 1;
            self.attempt = Word::new();
        }

        Some(SessionEvent::Scored {
            attempt: scored,
            state: self.state,
        })
    }

    /// Start over with the same target. Always succeeds, from any state.
    pub fn reset(&mut self) -> SessionEvent {
        self.attempt = Word::new();
        self.row = 0;
        self.history.clear();
        self.keyboard.clear();
        self.state = SessionState::InProgress;
        SessionEvent::Reset
    }
}

use colored::Colorize;
impl fmt::Display for ScoredAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, verdict) in self.verdicts.iter().enumerate() {
            let letter = match self.word.letter(i) {
                Some(letter) => letter.to_uppercase().to_string(),
                None => "_".to_string(),
            };
            match verdict {
                Verdict::Absent => write!(f, "{}", letter.on_black())?,
                Verdict::Present => write!(f, "{}", letter.black().on_yellow())?,
                Verdict::Correct => write!(f, "{}", letter.black().on_green())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Verdict::*;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default())
    }

    fn type_word(session: &mut GameSession, word: &str) {
        for letter in word.chars() {
            session.push_letter(letter);
        }
    }

    #[test]
    fn winning_guess_ends_the_game() {
        let mut session = session();
        type_word(&mut session, "woof");
        let event = session.submit();
        assert_eq!(
            event,
            Some(SessionEvent::Scored {
                attempt: ScoredAttempt {
                    row: 0,
                    word: Word::parse("woof").unwrap(),
                    verdicts: [Correct; WORD_LENGTH],
                },
                state: SessionState::Won,
            })
        );
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn six_misses_lose_without_a_seventh_row() {
        let mut session = session();
        for i in 0..MAX_ATTEMPTS {
            assert_eq!(session.state(), SessionState::InProgress);
            assert_eq!(session.row(), i);
            type_word(&mut session, "barn");
            let event = session.submit();
            assert!(matches!(event, Some(SessionEvent::Scored { .. })));
        }
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(session.row(), MAX_ATTEMPTS - 1);
        assert_eq!(session.history().len(), MAX_ATTEMPTS);
        // the seventh submit is a no-op
        assert_eq!(session.submit(), None);
        assert_eq!(session.history().len(), MAX_ATTEMPTS);
    }

    #[test]
    fn short_attempt_is_reported_not_scored() {
        let mut session = session();
        type_word(&mut session, "wo");
        assert_eq!(session.submit(), Some(SessionEvent::IncompleteGuess));
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.row(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.attempt().len(), 2);
    }

    #[test]
    fn keyboard_keeps_best_verdict_across_attempts() {
        let mut session = session();
        type_word(&mut session, "fowl");
        session.submit();
        assert_eq!(session.keyboard().verdict('o'), Some(Correct));
        assert_eq!(session.keyboard().verdict('w'), Some(Present));
        assert_eq!(session.keyboard().verdict('l'), Some(Absent));
        // a later guess with 'o' in the wrong spot must not downgrade it
        type_word(&mut session, "oars");
        session.submit();
        assert_eq!(session.keyboard().verdict('o'), Some(Correct));
    }

    #[test]
    fn attempt_bounds_are_enforced() {
        let mut session = session();
        assert_eq!(session.pop_letter(), None);
        type_word(&mut session, "woof");
        assert_eq!(session.push_letter('s'), None);
        assert_eq!(session.attempt().len(), WORD_LENGTH);
    }

    #[test]
    fn out_of_alphabet_letters_are_dropped() {
        let mut session = session();
        assert_eq!(session.push_letter('1'), None);
        assert_eq!(session.push_letter(' '), None);
        assert_eq!(session.push_letter('é'), None);
        assert!(session.attempt().is_empty());
    }

    #[test]
    fn finished_game_ignores_everything_but_reset() {
        let mut session = session();
        type_word(&mut session, "woof");
        session.submit();
        assert_eq!(session.push_letter('a'), None);
        assert_eq!(session.pop_letter(), None);
        assert_eq!(session.submit(), None);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut session = session();
        for _ in 0..MAX_ATTEMPTS {
            type_word(&mut session, "barn");
            session.submit();
        }
        assert_eq!(session.state(), SessionState::Lost);

        assert_eq!(session.reset(), SessionEvent::Reset);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.row(), 0);
        assert!(session.attempt().is_empty());
        assert!(session.history().is_empty());
        assert!(session.keyboard().is_empty());

        // the target survives the reset
        type_word(&mut session, "woof");
        assert!(matches!(
            session.submit(),
            Some(SessionEvent::Scored {
                state: SessionState::Won,
                ..
            })
        ));
    }

    #[test]
    fn config_rejects_bad_overrides() {
        assert!(GameConfig::new("woofs", MAX_ATTEMPTS).is_err());
        assert!(GameConfig::new("wo0f", MAX_ATTEMPTS).is_err());
        assert!(GameConfig::new("woof", 0).is_err());
        let config = GameConfig::new("WOOF", MAX_ATTEMPTS).unwrap();
        assert_eq!(config.target, Word::parse("woof").unwrap());
    }
}
