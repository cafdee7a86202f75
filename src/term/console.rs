use std::io::{Stdout, Write, stdout};

use crossterm::queue;
use crossterm::style::Print;
use log::warn;

/// Line-oriented output for the game.
pub trait Console {
    fn line(&mut self, text: &str);
}

/// Writes lines to a terminal in raw mode, where `\n` alone does not
/// return the cursor to column 0.
pub struct TermConsole<W: Write> {
    out: W,
}

impl TermConsole<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> TermConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Console for TermConsole<W> {
    fn line(&mut self, text: &str) {
        let written = queue!(self.out, Print(text), Print("\r\n")).and_then(|()| self.out.flush());
        if let Err(e) = written {
            warn!("Console write failed: {}", e);
        }
    }
}
