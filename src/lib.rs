//! # parlor
//!
//! A server-authoritative state machine for small turn-based party games.
//!
//! ## Design Principles
//!
//! 1. **One Mutator**: A `GameSession` owns the snapshot. Actions, joins and
//!    leaves all take `&mut self`, so they are applied strictly one at a time.
//!
//! 2. **Validate, Then Apply**: An action is checked against the snapshot
//!    first. A rejected action changes nothing; an accepted one applies its
//!    whole effect set.
//!
//! 3. **Injected Randomness**: Every random decision goes through a
//!    `RandomSource`. Seeded `GameRng` for play, `ScriptedRandom` for tests.
//!
//! 4. **Dynamic Membership**: Turn order is read from the `PlayerRegistry`
//!    each time, so players can join and leave between actions.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`, so a
//!   transport can broadcast a snapshot while the next action is applied.
//!
//! - **Audit Trail**: Every transition returns its `EffectLog`, and the
//!   snapshot keeps the accepted-action history.
//!
//! ## Modules
//!
//! - `core`: Players, registry, RNG, actions, errors, configuration, snapshot
//! - `turn`: Turn cursor and phases
//! - `rules`: `Rules` trait and shared validation
//! - `effects`: Applied consequences
//! - `outcome`: Termination detection and per-player results
//! - `session`: The host boundary
//! - `games`: Relay, dice and grid
//! - `sim`: Headless dice playouts

pub mod core;
pub mod effects;
pub mod games;
pub mod outcome;
pub mod rules;
pub mod session;
pub mod sim;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, GameAction, GameConfig, GameRng, GameRngState, InvalidAction, JoinOutcome,
    LeaveOutcome, PlayerId, PlayerLimits, PlayerMap, PlayerRegistry, RandomSource, ScriptedRandom,
    SetupError, SharedState, SpectatorReason, WeightedSet,
};

pub use crate::effects::{Effect, EffectLog};

pub use crate::outcome::{GameStatus, Outcome, PlayerOutcome, TerminationReason};

pub use crate::rules::Rules;

pub use crate::session::{GameSession, PlayerView, Transition};

pub use crate::turn::{TurnCursor, TurnPhase};
