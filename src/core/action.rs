//! # Actions
//!
//! Everything that can happen while a round is live becomes an `Action`.
//! Player hits the bell? That's `Action::Bell`. The AI's reaction window
//! runs out? That's `Action::TimerExpired`.
//!
//! `update()` applies an action to the current round and score, then
//! returns an `Effect` telling the caller what to do next. No I/O here.
//!
//! ```text
//! Round + Score + Action  →  update()  →  Effect
//! ```

use log::debug;

use crate::core::state::{Round, Score, Winner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Player claims a match.
    Bell,
    /// Player wants out of the whole game.
    Quit,
    /// Any other key. Read and discarded.
    Stray(char),
    /// The AI's reaction window elapsed before any key arrived.
    TimerExpired,
    /// The key source is gone; nothing more will arrive.
    InputClosed,
}

/// How a round was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Timer ran out on a matching pair.
    AiRangFirst,
    /// Player rang on a matching pair.
    PlayerRightBell,
    /// Player rang on a mismatched pair.
    PlayerWrongBell,
}

impl Verdict {
    pub fn winner(self) -> Winner {
        match self {
            Verdict::PlayerRightBell => Winner::Player,
            Verdict::AiRangFirst | Verdict::PlayerWrongBell => Winner::Ai,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Keep going: draw a new pair and wait again.
    Redraw,
    /// Round decided; the score has already been updated.
    RoundOver(Verdict),
    /// Stop the whole game. The score is untouched.
    EndGame,
}

/// Menu selection between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Quit,
    Invalid(char),
}

pub const DEFAULT_START_KEY: char = 's';
pub const DEFAULT_BELL_KEY: char = 'b';
pub const DEFAULT_QUIT_KEY: char = 'q';

/// Which characters mean what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub start: char,
    pub bell: char,
    pub quit: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_KEY,
            bell: DEFAULT_BELL_KEY,
            quit: DEFAULT_QUIT_KEY,
        }
    }
}

impl KeyBindings {
    pub fn menu_choice(&self, key: char) -> MenuChoice {
        if key == self.quit {
            MenuChoice::Quit
        } else if key == self.start {
            MenuChoice::Start
        } else {
            MenuChoice::Invalid(key)
        }
    }

    pub fn round_action(&self, key: char) -> Action {
        if key == self.bell {
            Action::Bell
        } else if key == self.quit {
            Action::Quit
        } else {
            Action::Stray(key)
        }
    }
}

/// Applies `action` to the live round. Scores at most once.
pub fn update(score: &mut Score, round: &mut Round, action: Action) -> Effect {
    debug!("update: {:?} on {:?}", action, round);
    match action {
        Action::Bell => {
            round.bell_rung = true;
            let verdict = if round.is_match() {
                Verdict::PlayerRightBell
            } else {
                Verdict::PlayerWrongBell
            };
            score.award(verdict.winner());
            Effect::RoundOver(verdict)
        }
        Action::TimerExpired if round.is_match() => {
            score.award(Winner::Ai);
            Effect::RoundOver(Verdict::AiRangFirst)
        }
        Action::TimerExpired | Action::Stray(_) => Effect::Redraw,
        Action::Quit | Action::InputClosed => Effect::EndGame,
    }
}
