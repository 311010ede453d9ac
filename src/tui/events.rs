use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use super::actions::Action;
use super::App;

impl App {
    pub fn handle_events(
        &mut self,
        tx: mpsc::UnboundedSender<Option<Action>>,
    ) -> tokio::task::JoinHandle<()> {
        let tick_rate = Duration::from_millis(250);
        tokio::spawn(async move {
            let mut events = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            loop {
                let action = tokio::select! {
                    _ = tick.tick() => None,
                    event = events.next() => match event {
                        Some(Ok(Event::Key(key))) => handle_key_event(key),
                        Some(_) => None,
                        None => break,
                    },
                };
                if tx.send(action).is_err() {
                    break;
                }
            }
        })
    }
}

/// Normalize raw key events into the fixed input vocabulary: letters,
/// Backspace, Enter, plus Esc to leave. Everything else is dropped here.
fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Action::Exit),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(x) if x.is_ascii_alphabetic() => {
            Some(Action::Letter(x.to_ascii_lowercase()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn letters_are_normalized_to_lowercase() {
        let action = handle_key_event(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT));
        assert_eq!(action, Some(Action::Letter('w')));
    }

    #[test]
    fn the_fixed_vocabulary_is_mapped() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Submit)
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Action::Backspace)
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::Exit)
        );
    }

    #[test]
    fn everything_else_is_filtered_out() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('ü'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key), None);
    }
}
