//! # Game State
//!
//! Everything the game remembers between key presses:
//!
//! ```text
//! Score            // lives for the whole process, never reset
//! ├── player: u32
//! └── ai: u32
//!
//! Round            // one draw; replaced on every wait cycle
//! ├── player_card: Card
//! ├── ai_card: Card
//! └── bell_rung: bool
//! ```
//!
//! State changes only happen through `update()` in action.rs.

use std::fmt;

use rand::RngCore;

use crate::core::card::{Card, CardGenerator};

/// Default number of rounds in a game.
pub const DEFAULT_ROUNDS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Ai,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn award(&mut self, winner: Winner) {
        match winner {
            Winner::Player => self.player += 1,
            Winner::Ai => self.ai += 1,
        }
    }
}

/// Rendered AI first, matching the scoreboard heading `AI:You`.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ai, self.player)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub player_card: Card,
    pub ai_card: Card,
    pub bell_rung: bool,
}

impl Round {
    pub fn new(player_card: Card, ai_card: Card) -> Self {
        Self {
            player_card,
            ai_card,
            bell_rung: false,
        }
    }

    /// Draws a fresh pair from `cards`.
    pub fn deal<C: CardGenerator + ?Sized>(cards: &mut C, rng: &mut dyn RngCore) -> Self {
        let (player_card, ai_card) = cards.draw_pair(rng);
        Self::new(player_card, ai_card)
    }

    pub fn is_match(&self) -> bool {
        self.player_card == self.ai_card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedCards;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_score_starts_at_zero() {
        let score = Score::default();
        assert_eq!(score.player, 0);
        assert_eq!(score.ai, 0);
    }

    #[test]
    fn test_award_increments_one_side() {
        let mut score = Score::default();
        score.award(Winner::Ai);
        score.award(Winner::Ai);
        score.award(Winner::Player);
        assert_eq!(score, Score { player: 1, ai: 2 });
    }

    #[test]
    fn test_score_display_ai_first() {
        let score = Score { player: 3, ai: 1 };
        assert_eq!(score.to_string(), "1:3");
    }

    #[test]
    fn test_deal_player_card_first() {
        let mut cards = ScriptedCards::pairs(&[(Card::Grape, Card::Peach)]);
        let mut rng = SmallRng::seed_from_u64(0);
        let round = Round::deal(&mut cards, &mut rng);
        assert_eq!(round.player_card, Card::Grape);
        assert_eq!(round.ai_card, Card::Peach);
        assert!(!round.bell_rung);
        assert!(!round.is_match());
    }
}
