//! Round arbitration: race the next key against the AI's reaction window.
//!
//! Every wait cycle deals a fresh pair, even when the previous cycle ended
//! on an unrelated key. The timer is a new one-shot `Sleep` per cycle and
//! is dropped as soon as a key wins, so it can never fire into a later cycle.

use std::time::Duration;

use log::{debug, info};

use super::Game;
use crate::core::action::{Action, Effect, Verdict, update};
use crate::core::card::CardGenerator;
use crate::core::delay::DelayModel;
use crate::core::state::Round;
use crate::term::console::Console;

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// Scored; the game continues.
    Decided(Verdict),
    /// Quit or input closed; the game stops with the score untouched.
    Aborted,
}

enum Race {
    Key(Option<char>),
    Expired,
}

impl<C, D, O> Game<C, D, O>
where
    C: CardGenerator,
    D: DelayModel,
    O: Console,
{
    /// Plays one round to completion.
    pub async fn play_round(&mut self, round: u32) -> RoundEnd {
        self.console.line("Round Start :)");
        let mut draws = 0u32;

        loop {
            let mut current = Round::deal(&mut self.cards, &mut self.rng);
            draws += 1;
            self.console.line(&format!("AI's card: {}", current.ai_card));
            self.console.line(&format!("Your card: {}", current.player_card));
            self.console.line("");

            let delay = self.delay.compute_delay(round, &mut self.rng);
            debug!(
                "Round {} draw {}: {} vs {}, AI window {:.4}s",
                round,
                draws,
                current.player_card,
                current.ai_card,
                delay.as_secs_f64()
            );

            let action = self.race(delay).await;
            match update(&mut self.score, &mut current, action) {
                Effect::Redraw => continue,
                Effect::RoundOver(verdict) => {
                    self.announce(verdict);
                    info!("Round {} decided after {} draws: {:?}", round, draws, verdict);
                    return RoundEnd::Decided(verdict);
                }
                Effect::EndGame => {
                    if action == Action::InputClosed {
                        self.console.line("Input closed, ending game...");
                    } else {
                        self.console.line("Quitting game...");
                    }
                    info!("Round {} aborted by {:?}", round, action);
                    return RoundEnd::Aborted;
                }
            }
        }
    }

    /// Waits for whichever comes first: a queued key or the end of `delay`.
    /// A key already waiting in the queue beats an already-elapsed timer.
    async fn race(&mut self, delay: Duration) -> Action {
        let raced = tokio::select! {
            biased;
            key = self.keys.recv() => Race::Key(key),
            () = tokio::time::sleep(delay) => Race::Expired,
        };
        match raced {
            Race::Key(Some(key)) => self.bindings.round_action(key),
            Race::Key(None) => Action::InputClosed,
            Race::Expired => Action::TimerExpired,
        }
    }

    fn announce(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::AiRangFirst => {
                self.console.line("AI rings the bell first! AI wins this round.");
            }
            Verdict::PlayerRightBell => {
                self.console.line("You ring the bell! And It's CORRECT! :)");
                self.console.line("You win this round.");
            }
            Verdict::PlayerWrongBell => {
                self.console.line("You ring the bell! But It's WRONG. :(");
                self.console.line("AI wins this round.");
            }
        }
    }
}
