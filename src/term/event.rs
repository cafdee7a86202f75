//! Key input: a blocking reader plus the background listener that feeds
//! the game's key queue.

use std::fmt;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The key source has nothing more to give (terminal closed or interrupted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl fmt::Display for InputClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key input closed")
    }
}

impl std::error::Error for InputClosed {}

/// Blocking source of key symbols.
pub trait KeyReader {
    fn read_key(&mut self) -> Result<char, InputClosed>;
}

/// Reads key presses from the terminal via crossterm.
pub struct TerminalKeys {
    quit: char,
}

impl TerminalKeys {
    /// `quit` is what Ctrl+C is reported as, since raw mode swallows SIGINT.
    pub fn new(quit: char) -> Self {
        Self { quit }
    }
}

impl KeyReader for TerminalKeys {
    fn read_key(&mut self) -> Result<char, InputClosed> {
        loop {
            match event::read() {
                Ok(Event::Key(key_event)) => {
                    debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
                    if let Some(key) = key_symbol(key_event, self.quit) {
                        return Ok(key);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    info!("Terminal read failed: {}", e);
                    return Err(InputClosed);
                }
            }
        }
    }
}

/// Maps a terminal key event to a game symbol.
///
/// Only presses of character keys count. Ctrl+C becomes `quit`; other
/// control/alt chords are dropped.
pub fn key_symbol(key: KeyEvent, quit: char) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let chorded = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(quit),
        KeyCode::Char(c) if !chorded => Some(c),
        _ => None,
    }
}

/// Starts the background listener and returns the consuming end of its queue.
///
/// The listener runs on a detached thread so a pending blocking read never
/// holds up runtime shutdown. It exits when `reader` reports
/// [`InputClosed`] or the receiver is dropped.
pub fn spawn_listener<K>(reader: K) -> std::io::Result<UnboundedReceiver<char>>
where
    K: KeyReader + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("key-listener".into())
        .spawn(move || listen(reader, tx))?;
    Ok(rx)
}

fn listen<K: KeyReader>(mut reader: K, tx: UnboundedSender<char>) {
    info!("Key listener started");
    loop {
        match reader.read_key() {
            Ok(key) => {
                debug!("Forwarding key {:?}", key);
                if tx.send(key).is_err() {
                    debug!("Key queue receiver dropped, listener exiting");
                    return;
                }
            }
            Err(InputClosed) => {
                info!("Key input closed, listener exiting");
                return;
            }
        }
    }
}
