use crate::config::RETRY_KEY;
use crate::snake::Direction;

use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// What the game loop understands from the keyboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Move(Direction),
    Retry,
    Quit,
}

impl GameEvent {
    pub fn from_key(key: KeyEvent) -> Option<GameEvent> {
        if is_ctrl_c(&key) {
            return Some(GameEvent::Quit);
        }

        match key.code {
            KeyCode::Up => Some(GameEvent::Move(Direction::Up)),
            KeyCode::Down => Some(GameEvent::Move(Direction::Down)),
            KeyCode::Left => Some(GameEvent::Move(Direction::Left)),
            KeyCode::Right => Some(GameEvent::Move(Direction::Right)),
            KeyCode::Esc => Some(GameEvent::Quit),
            KeyCode::Char(c) if c.to_ascii_lowercase() == RETRY_KEY => Some(GameEvent::Retry),
            _ => None,
        }
    }
}

/// Starts the thread that blocks on terminal input and forwards game
/// events. It exits once the receiving end is dropped or reading fails;
/// either way the sender goes away with it.
pub fn spawn_listener(events: Sender<GameEvent>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || listen(events))
}

fn listen(events: Sender<GameEvent>) {
    loop {
        let key = match read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(err) => {
                error!(%err, "failed to read terminal input");
                return;
            }
        };

        if let Some(event) = GameEvent::from_key(key) {
            if events.send(event).is_err() {
                debug!("game loop stopped listening");
                return;
            }
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
