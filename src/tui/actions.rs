use crate::game::word::WORD_LENGTH;
use crate::game::{SessionEvent, SessionState};

use super::{App, Message, MessageKind, MESSAGE_TIMEOUT, REVEAL_INTERVAL, SETTLE_DELAY};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Exit,
    Letter(char),
    Backspace,
    Submit,
    /// Flip the next tile of a scored row face up.
    RevealTile { row: usize },
    /// The reveal of a scored row finished.
    RevealDone { row: usize },
    ClearMessage,
}

impl App {
    pub fn update(&mut self, msg: Option<Action>) {
        let Some(msg) = msg else { return };
        match msg {
            Action::Exit => {
                self.token.cancel();
                self.exit = true;
            }
            Action::Letter(letter) => {
                self.session.push_letter(letter);
            }
            Action::Backspace => {
                self.session.pop_letter();
            }
            Action::Submit => self.submit(),
            Action::RevealTile { row } => {
                if self.is_latest_row(row) && self.revealed < WORD_LENGTH {
                    self.revealed += 1;
                }
            }
            Action::RevealDone { row } => {
                if self.is_latest_row(row) {
                    self.settle();
                }
            }
            Action::ClearMessage => {
                if matches!(
                    self.message,
                    Some(Message {
                        kind: MessageKind::Warning,
                        ..
                    })
                ) {
                    self.message = None;
                }
            }
        }
    }

    /// A late timer action may refer to a row that is no longer the
    /// latest scored one; those are stale and dropped.
    fn is_latest_row(&self, row: usize) -> bool {
        self.session.history().len().checked_sub(1) == Some(row)
    }

    fn submit(&mut self) {
        if self.session.state().is_over() {
            // the board is settled; Enter now means play again
            if self.revealed == WORD_LENGTH {
                self.new_game();
            }
            return;
        }

        match self.session.submit() {
            Some(SessionEvent::IncompleteGuess) => self.show_warning("Not enough letters"),
            Some(SessionEvent::Scored { attempt, .. }) => self.start_reveal(attempt.row),
            _ => {}
        }
    }

    /// Flip the freshly scored row face up, one tile at a time, then let
    /// `RevealDone` raise the win/loss message. A newer submission or a
    /// reset cancels the run.
    fn start_reveal(&mut self, row: usize) {
        self.revealed = 0;
        self.message = None;

        if let Some(token) = self.reveal_token.take() {
            token.cancel();
        }
        let token = self.token.child_token();
        self.reveal_token = Some(token.clone());

        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            for _ in 0..WORD_LENGTH {
                tokio::time::sleep(REVEAL_INTERVAL).await;
                if token.is_cancelled() || tx.send(Some(Action::RevealTile { row })).is_err() {
                    return;
                }
            }
            tokio::time::sleep(SETTLE_DELAY).await;
            if !token.is_cancelled() {
                let _ = tx.send(Some(Action::RevealDone { row }));
            }
        });
    }

    /// The reveal finished: sync the keyboard view and raise the terminal
    /// message if the game just ended.
    fn settle(&mut self) {
        self.revealed = WORD_LENGTH;
        self.keyboard_view = self.session.keyboard().clone();
        match self.session.state() {
            SessionState::Won => {
                self.message = Some(Message {
                    text: "Genius!".to_string(),
                    kind: MessageKind::Won,
                });
            }
            SessionState::Lost => {
                self.message = Some(Message {
                    text: self.session.config().target.to_string(),
                    kind: MessageKind::Lost,
                });
            }
            SessionState::InProgress => {}
        }
    }

    fn show_warning(&mut self, text: &str) {
        self.message = Some(Message {
            text: text.to_string(),
            kind: MessageKind::Warning,
        });

        if let Some(token) = self.message_token.take() {
            token.cancel();
        }
        let token = self.token.child_token();
        self.message_token = Some(token.clone());

        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(MESSAGE_TIMEOUT).await;
            if !token.is_cancelled() {
                let _ = tx.send(Some(Action::ClearMessage));
            }
        });
    }

    fn new_game(&mut self) {
        if let Some(token) = self.reveal_token.take() {
            token.cancel();
        }
        if let Some(token) = self.message_token.take() {
            token.cancel();
        }
        self.session.reset();
        self.revealed = 0;
        self.keyboard_view.clear();
        self.message = None;
    }
}
