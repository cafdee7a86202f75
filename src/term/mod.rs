//! # Terminal Adapter
//!
//! The crossterm-specific layer. Puts the terminal in raw mode so single
//! key presses arrive without Enter, starts the key listener, and wires
//! the game to stdout.
//!
//! This is the only module that knows about crossterm.

pub mod console;
pub mod event;

use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::core::card::UniformDeck;
use crate::core::config::ResolvedConfig;
use crate::core::state::Score;
use crate::game::Game;
use crate::term::console::TermConsole;
use crate::term::event::{TerminalKeys, spawn_listener};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        enable_raw_mode()?;
        info!("Terminal raw mode enabled");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Seeded from `seed` when given, otherwise from OS entropy.
pub fn build_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    }
}

/// Plays one full game on the attached terminal.
pub async fn run(config: ResolvedConfig) -> std::io::Result<Score> {
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let keys = spawn_listener(TerminalKeys::new(config.keys.quit))?;
    let mut game = Game::new(
        UniformDeck,
        config.delay,
        TermConsole::stdout(),
        build_rng(config.seed),
        keys,
    )
    .with_bindings(config.keys)
    .with_rounds(config.rounds);

    Ok(game.run().await)
}
