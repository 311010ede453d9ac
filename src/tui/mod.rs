use std::io::{self, stdout, Stdout};
use std::time::Duration;

use crossterm::{execute, terminal::*};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::game::letter::KeyboardState;
use crate::game::{GameConfig, GameSession, ScoredAttempt};

use actions::Action;

mod actions;
mod events;
mod ui;

/// Tile flip cadence of the reveal animation.
const REVEAL_INTERVAL: Duration = Duration::from_millis(300);
/// Pause between the last flip and the win/loss message.
const SETTLE_DELAY: Duration = Duration::from_millis(250);
/// How long transient warnings stay on screen.
const MESSAGE_TIMEOUT: Duration = Duration::from_millis(2000);

/// A type alias for the terminal type used in this application
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

/// Initialize the terminal
pub fn init() -> io::Result<Tui> {
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

/// Restore the terminal to its original state
pub fn restore() -> io::Result<()> {
    execute!(stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MessageKind {
    Warning,
    Won,
    Lost,
}

#[derive(Debug)]
struct Message {
    text: String,
    kind: MessageKind,
}

/// The presentation layer. Owns the game session plus everything that is
/// about showing it: reveal progress, the lagging keyboard view and the
/// message bar. All timing runs as spawned tasks feeding the action
/// channel; the session itself is settled synchronously.
pub struct App {
    exit: bool,
    session: GameSession,
    /// Tiles of the latest scored row that are face up.
    revealed: usize,
    /// Keyboard colors shown to the player; lags the session's keyboard
    /// state until the reveal finishes.
    keyboard_view: KeyboardState,
    message: Option<Message>,
    action_tx: mpsc::UnboundedSender<Option<Action>>,
    action_rx: mpsc::UnboundedReceiver<Option<Action>>,
    token: CancellationToken,
    reveal_token: Option<CancellationToken>,
    message_token: Option<CancellationToken>,
}

impl App {
    pub fn init(config: GameConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        App {
            exit: false,
            session: GameSession::new(config),
            revealed: 0,
            keyboard_view: KeyboardState::new(),
            message: None,
            action_tx,
            action_rx,
            token: CancellationToken::new(),
            reveal_token: None,
            message_token: None,
        }
    }

    /// runs the application's main loop until the user quits
    pub async fn run(&mut self, terminal: &mut Tui) -> io::Result<()> {
        let task = self.handle_events(self.action_tx.clone());

        while !self.exit {
            terminal.draw(|frame| self.render_frame(frame))?;

            if let Some(action) = self.action_rx.recv().await {
                self.update(action);
            }
        }
        task.abort();
        Ok(())
    }

    fn render_frame(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.size());
    }

    /// Scored rows for the post-game summary.
    pub fn scored_rows(&self) -> &[ScoredAttempt] {
        self.session.history()
    }
}
