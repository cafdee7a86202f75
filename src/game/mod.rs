//! # Game Loop
//!
//! Sequences rounds, owns the score and the single random source, and is
//! the sole consumer of the key queue.
//!
//! ```text
//! for each round:
//!     print header (round, score, key help)
//!     wait for menu key ── quit / input closed ──► stop
//!          │ start
//!          ▼
//!     play_round (arbiter.rs) ── aborted ──► stop
//! print final score
//! ```

mod arbiter;

pub use arbiter::RoundEnd;

use log::{debug, info};
use rand::rngs::SmallRng;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::core::action::{KeyBindings, MenuChoice};
use crate::core::card::CardGenerator;
use crate::core::delay::DelayModel;
use crate::core::state::{DEFAULT_ROUNDS, Score};
use crate::term::console::Console;

const SEPARATOR: &str = "------------";

pub struct Game<C, D, O> {
    cards: C,
    delay: D,
    console: O,
    rng: SmallRng,
    keys: UnboundedReceiver<char>,
    bindings: KeyBindings,
    total_rounds: u32,
    score: Score,
}

impl<C, D, O> Game<C, D, O>
where
    C: CardGenerator,
    D: DelayModel,
    O: Console,
{
    pub fn new(cards: C, delay: D, console: O, rng: SmallRng, keys: UnboundedReceiver<char>) -> Self {
        Self {
            cards,
            delay,
            console,
            rng,
            keys,
            bindings: KeyBindings::default(),
            total_rounds: DEFAULT_ROUNDS,
            score: Score::default(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn console(&self) -> &O {
        &self.console
    }

    /// Plays until the rounds run out, the player quits, or input closes.
    /// Returns the final score.
    pub async fn run(&mut self) -> Score {
        info!("Game starting: {} rounds", self.total_rounds);

        for round in 1..=self.total_rounds {
            self.print_header(round);

            if !self.wait_for_start().await {
                break;
            }
            if let RoundEnd::Aborted = self.play_round(round).await {
                break;
            }
        }

        self.console.line(SEPARATOR);
        self.console.line("<Game over>");
        self.console.line(&format!("AI:You = {}", self.score));
        info!("Game over, AI:You = {}", self.score);
        self.score
    }

    fn print_header(&mut self, round: u32) {
        let KeyBindings { start, bell, quit } = self.bindings;
        self.console.line(SEPARATOR);
        self.console.line(&format!("[Round {}] AI:You = {}", round, self.score));
        self.console.line(&format!("[{start}]: start round, [{quit}]: quit game..."));
        self.console.line(&format!("[{bell}]: ring the bell if the cards are the same shape!"));
        self.console.line(SEPARATOR);
    }

    /// Blocks on the menu. `true` means start the round, `false` means stop the game.
    async fn wait_for_start(&mut self) -> bool {
        loop {
            let Some(key) = self.keys.recv().await else {
                info!("Key queue closed at menu");
                self.console.line("Input closed, ending game...");
                return false;
            };
            match self.bindings.menu_choice(key) {
                MenuChoice::Start => return true,
                MenuChoice::Quit => {
                    self.console.line("Quitting game...");
                    return false;
                }
                MenuChoice::Invalid(key) => {
                    debug!("Invalid menu key {:?}", key);
                    self.console.line("Invalid input! Try again...");
                }
            }
        }
    }
}
