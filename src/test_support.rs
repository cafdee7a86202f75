//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::core::card::{Card, CardGenerator};
use crate::core::delay::DelayModel;
use crate::game::Game;
use crate::term::console::Console;

/// Plays back a fixed card sequence, cycling forever.
pub struct ScriptedCards {
    cards: Vec<Card>,
    next: usize,
}

impl ScriptedCards {
    /// `pairs` are (player, ai), in draw order.
    pub fn pairs(pairs: &[(Card, Card)]) -> Self {
        Self {
            cards: pairs.iter().flat_map(|&(p, a)| [p, a]).collect(),
            next: 0,
        }
    }
}

impl CardGenerator for ScriptedCards {
    fn draw(&mut self, _rng: &mut dyn RngCore) -> Card {
        let card = self.cards[self.next % self.cards.len()];
        self.next += 1;
        card
    }
}

/// A delay model that always returns the same duration.
pub struct FixedDelay(pub Duration);

impl DelayModel for FixedDelay {
    fn compute_delay(&self, _round: u32, _rng: &mut dyn RngCore) -> Duration {
        self.0
    }
}

/// Collects every printed line.
#[derive(Default)]
pub struct RecordingConsole {
    pub lines: Vec<String>,
}

impl RecordingConsole {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        self.lines.iter().filter(|l| l.contains(needle)).count()
    }
}

impl Console for RecordingConsole {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}

pub type ScriptedGame = Game<ScriptedCards, FixedDelay, RecordingConsole>;

/// A game with scripted cards, a fixed delay and a recording console.
/// Keys sent on the returned sender land in the game's key queue.
pub fn scripted_game(pairs: &[(Card, Card)], delay: Duration) -> (ScriptedGame, UnboundedSender<char>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let game = Game::new(
        ScriptedCards::pairs(pairs),
        FixedDelay(delay),
        RecordingConsole::default(),
        SmallRng::seed_from_u64(0),
        rx,
    );
    (game, tx)
}
