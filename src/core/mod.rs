//! # Core Game Logic
//!
//! This module contains fruitbell's rules.
//! It knows nothing about terminals, channels or timers.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Card / Delay models  │
//!                    │  • State (score, round) │
//!                    │  • Action → update()    │
//!                    │                         │
//!                    │  No I/O. No clock.      │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    game    │          │    term    │
//!             │ (arbiter + │◄─────────│ (keys and  │
//!             │   loop)    │   keys   │  console)  │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`card`]: the fruit vocabulary and `CardGenerator`
//! - [`delay`]: the AI reaction window, `DelayModel`
//! - [`state`]: `Score` and `Round`
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`config`]: layered settings

pub mod action;
pub mod card;
pub mod config;
pub mod delay;
pub mod state;
