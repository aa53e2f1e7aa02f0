//! Core engine types: players, registry, state, actions, RNG, configuration.
//!
//! This module contains the building blocks shared by every game.
//! Games plug in through `rules::Rules` rather than modifying the core.

pub mod player;
pub mod registry;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use registry::{JoinOutcome, LeaveOutcome, PlayerRegistry, SpectatorReason};
pub use rng::{choose, GameRng, GameRngState, RandomSource, ScriptedRandom, WeightedSet};
pub use config::{GameConfig, PlayerLimits};
pub use action::{ActionRecord, GameAction};
pub use error::{InvalidAction, SetupError};
pub use state::SharedState;
