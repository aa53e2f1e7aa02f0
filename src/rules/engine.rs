//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - What actions are legal (validation)
//! - How actions change state (resolution)
//! - How membership changes are absorbed
//! - Win/loss conditions

use serde::Serialize;

use crate::core::{GameAction, GameConfig, PlayerId, PlayerRegistry, RandomSource};
use crate::effects::EffectLog;
use crate::outcome::Outcome;

/// Rules of one game.
///
/// `GameSession` drives these methods; it owns the snapshot and guarantees
/// that membership changes never interleave with an action.
///
/// ## Implementation Notes
///
/// - `validate`: Pure predicate, no side effects; common checks (game over,
///   actor seated) have already passed
/// - `resolve`: Only called after `validate` accepted the same action
///   against the same state
/// - `outcome`: Return `None` while the game continues
pub trait Rules {
    /// Game-specific snapshot data.
    type State: Clone + std::fmt::Debug + PartialEq + Serialize;

    /// Closed action set.
    type Action: GameAction;

    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Build the starting state for the seated players.
    fn setup(&self, registry: &PlayerRegistry) -> Self::State;

    /// Turn counter recorded with each accepted action.
    fn turn_number(&self, state: &Self::State) -> u32;

    /// Check game-specific legality: turn ownership, targets, resources.
    fn validate(
        &self,
        registry: &PlayerRegistry,
        state: &Self::State,
        player: &PlayerId,
        action: &Self::Action,
    ) -> Result<(), crate::core::InvalidAction>;

    /// Apply a validated action, recording every consequence.
    fn resolve(
        &self,
        registry: &PlayerRegistry,
        state: &mut Self::State,
        player: &PlayerId,
        action: &Self::Action,
        rng: &mut dyn RandomSource,
    ) -> EffectLog;

    /// Whether the game is still early enough to seat a newcomer.
    fn admits_joiner(&self, _registry: &PlayerRegistry, _state: &Self::State) -> bool {
        true
    }

    /// Absorb a newcomer who has just been seated.
    fn on_joined(
        &self,
        registry: &PlayerRegistry,
        state: &mut Self::State,
        player: &PlayerId,
    ) -> EffectLog;

    /// Absorb a departure. `seat` is where the player sat before removal;
    /// the registry no longer contains them.
    fn on_left(
        &self,
        registry: &PlayerRegistry,
        state: &mut Self::State,
        player: &PlayerId,
        seat: usize,
    ) -> EffectLog;

    /// Check if the game is over.
    fn outcome(&self, registry: &PlayerRegistry, state: &Self::State) -> Option<Outcome>;

    /// Enumerate the actions `player` could legally submit.
    ///
    /// Free-form payload fields (relay content) are left empty.
    fn legal_actions(
        &self,
        registry: &PlayerRegistry,
        state: &Self::State,
        player: &PlayerId,
    ) -> Vec<Self::Action>;
}
