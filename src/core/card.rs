//! # Cards
//!
//! The fixed fruit vocabulary and the generator that draws from it.
//! Randomness is never owned here: callers pass the game's single
//! random source into every draw.

use std::fmt;

use rand::{Rng, RngCore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Card {
    Apple,
    Lemon,
    Grape,
    Mango,
    Peach,
}

impl Card {
    /// The full vocabulary, in draw order.
    pub const ALL: [Card; 5] = [Card::Apple, Card::Lemon, Card::Grape, Card::Mango, Card::Peach];

    pub fn name(self) -> &'static str {
        match self {
            Card::Apple => "apple",
            Card::Lemon => "lemon",
            Card::Grape => "grape",
            Card::Mango => "mango",
            Card::Peach => "peach",
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of cards for a round.
pub trait CardGenerator {
    /// Draws a single card.
    fn draw(&mut self, rng: &mut dyn RngCore) -> Card;

    /// Draws the player's card, then the AI's card.
    fn draw_pair(&mut self, rng: &mut dyn RngCore) -> (Card, Card) {
        let player = self.draw(rng);
        let ai = self.draw(rng);
        (player, ai)
    }
}

/// Uniform pick over [`Card::ALL`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformDeck;

impl CardGenerator for UniformDeck {
    fn draw(&mut self, rng: &mut dyn RngCore) -> Card {
        Card::ALL[rng.gen_range(0..Card::ALL.len())]
    }
}
