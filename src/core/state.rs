//! The authoritative per-game snapshot.
//!
//! ## SharedState
//!
//! Everything a renderer needs to redraw the game:
//! - Player registry (seating and turn order)
//! - Game-specific state (papers, dice pools, board cells)
//! - Status: in progress, or terminal with a frozen outcome
//! - History of accepted actions
//!
//! Uses `im` persistent data structures so a snapshot can be cloned and
//! handed to the transport in O(1) after every accepted action.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::PlayerId;
use super::registry::PlayerRegistry;
use crate::outcome::{GameStatus, Outcome};

/// One running game: registry, variant state and bookkeeping.
///
/// Mutated only by the owning `GameSession`; everyone else reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharedState<S, A: Clone> {
    registry: PlayerRegistry,

    /// Game-specific state.
    game: S,

    status: GameStatus,

    /// Accepted actions, oldest first.
    history: Vector<ActionRecord<A>>,

    /// Accepted actions plus lifecycle events applied so far.
    sequence: u32,
}

impl<S, A: Clone> SharedState<S, A> {
    /// Create a fresh in-progress snapshot.
    #[must_use]
    pub fn new(registry: PlayerRegistry, game: S) -> Self {
        Self {
            registry,
            game,
            status: GameStatus::InProgress,
            history: Vector::new(),
            sequence: 0,
        }
    }

    /// Seated players.
    #[must_use]
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Game-specific state.
    #[must_use]
    pub fn game(&self) -> &S {
        &self.game
    }

    /// In progress, or terminal with its outcome.
    #[must_use]
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// True once an outcome has been frozen.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The frozen outcome, if the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.status.outcome()
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<A>> {
        &self.history
    }

    /// Number of accepted actions and lifecycle events so far.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    // === Session-only mutation ===

    /// Split borrow: read the registry while mutating the game state.
    pub(crate) fn split_mut(&mut self) -> (&PlayerRegistry, &mut S) {
        (&self.registry, &mut self.game)
    }

    pub(crate) fn registry_mut(&mut self) -> &mut PlayerRegistry {
        &mut self.registry
    }

    /// Advance the sequence counter and return the new value.
    pub(crate) fn bump_sequence(&mut self) -> u32 {
        self.sequence += 1;
        self.sequence
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: A, turn: u32) {
        let record = ActionRecord::new(player, action, turn, self.sequence);
        self.history.push_back(record);
    }

    /// Freeze the outcome. Panics if the game is already terminal.
    pub(crate) fn terminate(&mut self, outcome: Outcome) {
        assert!(
            !self.status.is_terminal(),
            "outcome frozen twice for the same game"
        );
        self.status = GameStatus::Terminal(outcome);
    }
}

impl<S: Serialize, A: Clone + Serialize> SharedState<S, A> {
    /// Encode the snapshot for broadcast.
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerLimits;
    use crate::outcome::{PlayerOutcome, TerminationReason};

    fn snapshot() -> SharedState<u32, String> {
        let registry = PlayerRegistry::new(
            [PlayerId::new("a"), PlayerId::new("b")],
            PlayerLimits::new(2, 2),
        )
        .unwrap();
        SharedState::new(registry, 0)
    }

    #[test]
    fn test_new_snapshot() {
        let state = snapshot();
        assert!(!state.is_terminal());
        assert_eq!(state.sequence(), 0);
        assert!(state.history().is_empty());
        assert_eq!(state.registry().len(), 2);
    }

    #[test]
    fn test_record_uses_current_sequence() {
        let mut state = snapshot();
        let seq = state.bump_sequence();
        state.record(PlayerId::new("a"), "poke".to_string(), 4);

        let record = &state.history()[0];
        assert_eq!(record.sequence, seq);
        assert_eq!(record.turn, 4);
    }

    #[test]
    fn test_terminate() {
        let mut state = snapshot();
        let outcome = Outcome::uniform(state.registry().iter(), PlayerOutcome::Lost, TerminationReason::BoardFull);
        state.terminate(outcome.clone());

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(&outcome));
    }

    #[test]
    #[should_panic(expected = "outcome frozen twice")]
    fn test_terminate_twice_panics() {
        let mut state = snapshot();
        let outcome = Outcome::uniform(state.registry().iter(), PlayerOutcome::Lost, TerminationReason::BoardFull);
        state.terminate(outcome.clone());
        state.terminate(outcome);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = snapshot();
        let before = state.clone();
        *state.split_mut().1 += 1;
        state.bump_sequence();

        assert_eq!(*before.game(), 0);
        assert_ne!(before, state);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = snapshot();
        let b = snapshot();
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
        assert!(!a.encode().unwrap().is_empty());
    }
}
