//! Index-based turn cursor.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerRegistry};

/// Where the current turn stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The current player may submit their next action.
    AwaitingAction,
    /// A roll is waiting to be resolved.
    PendingResolution,
    /// Effects are being flushed before the turn moves on.
    ///
    /// Transient: `advance` leaves it within the same transition, so a
    /// published snapshot never holds it.
    AdvancingTurn,
}

/// Tracks whose turn it is by seat index.
///
/// The seat is always read modulo the registry's *current* length, and
/// `on_seat_removed` keeps it pointing at the same player (or at the
/// departed player's successor) when seats shift.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    seat: usize,
    turn: u32,
    phase: TurnPhase,
}

impl TurnCursor {
    /// Start with seat 0, turn 0.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Start at a given seat.
    #[must_use]
    pub fn starting_at(seat: usize) -> Self {
        Self {
            seat,
            turn: 0,
            phase: TurnPhase::AwaitingAction,
        }
    }

    /// Raw seat index (not yet reduced modulo the registry length).
    #[must_use]
    pub fn seat(&self) -> usize {
        self.seat
    }

    /// Completed turns so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The player who holds the turn.
    #[must_use]
    pub fn current<'a>(&self, registry: &'a PlayerRegistry) -> Option<&'a PlayerId> {
        registry.at(self.seat)
    }

    /// Check whether `player` holds the turn.
    #[must_use]
    pub fn is_current(&self, registry: &PlayerRegistry, player: &PlayerId) -> bool {
        self.current(registry) == Some(player)
    }

    /// Enter the given phase.
    pub fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    /// Move to the next seat and count the finished turn.
    ///
    /// Returns the new current player.
    pub fn advance<'a>(&mut self, registry: &'a PlayerRegistry) -> Option<&'a PlayerId> {
        let len = registry.len().max(1);
        self.seat = (self.seat % len + 1) % len;
        self.turn += 1;
        self.phase = TurnPhase::AwaitingAction;
        self.current(registry)
    }

    /// Re-anchor after the player at `removed` left.
    ///
    /// `remaining` is the registry length after removal. Returns true when
    /// the departed player held the turn; the successor then starts fresh.
    pub fn on_seat_removed(&mut self, removed: usize, remaining: usize) -> bool {
        if remaining == 0 {
            self.seat = 0;
            self.phase = TurnPhase::AwaitingAction;
            return false;
        }

        let old_len = remaining + 1;
        let current = self.seat % old_len;

        if removed < current {
            self.seat = current - 1;
            false
        } else if removed == current {
            // Successor slides into the vacated seat.
            self.seat = current % remaining;
            self.phase = TurnPhase::AwaitingAction;
            true
        } else {
            self.seat = current;
            false
        }
    }
}

impl Default for TurnCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerLimits;

    fn registry(names: &[&str]) -> PlayerRegistry {
        PlayerRegistry::new(names.iter().map(|n| PlayerId::new(*n)), PlayerLimits::new(1, 8))
            .unwrap()
    }

    fn id(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    #[test]
    fn test_advance_wraps() {
        let reg = registry(&["a", "b", "c"]);
        let mut cursor = TurnCursor::new();

        assert_eq!(cursor.current(&reg), Some(&id("a")));
        assert_eq!(cursor.advance(&reg), Some(&id("b")));
        assert_eq!(cursor.advance(&reg), Some(&id("c")));
        assert_eq!(cursor.advance(&reg), Some(&id("a")));
        assert_eq!(cursor.turn(), 3);
    }

    #[test]
    fn test_advance_resets_phase() {
        let reg = registry(&["a", "b"]);
        let mut cursor = TurnCursor::new();
        cursor.set_phase(TurnPhase::PendingResolution);
        cursor.advance(&reg);
        assert_eq!(cursor.phase(), TurnPhase::AwaitingAction);
    }

    #[test]
    fn test_earlier_seat_removed_keeps_player() {
        let mut reg = registry(&["a", "b", "c", "d"]);
        let mut cursor = TurnCursor::starting_at(2); // c

        if let crate::core::LeaveOutcome::Left { seat } = reg.leave(&id("a")) {
            assert!(!cursor.on_seat_removed(seat, reg.len()));
        }
        assert_eq!(cursor.current(&reg), Some(&id("c")));
    }

    #[test]
    fn test_current_seat_removed_moves_to_successor() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut cursor = TurnCursor::starting_at(1); // b
        cursor.set_phase(TurnPhase::PendingResolution);

        if let crate::core::LeaveOutcome::Left { seat } = reg.leave(&id("b")) {
            assert!(cursor.on_seat_removed(seat, reg.len()));
        }
        assert_eq!(cursor.current(&reg), Some(&id("c")));
        assert_eq!(cursor.phase(), TurnPhase::AwaitingAction);
    }

    #[test]
    fn test_last_seat_removed_wraps_to_first() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut cursor = TurnCursor::starting_at(2); // c

        if let crate::core::LeaveOutcome::Left { seat } = reg.leave(&id("c")) {
            assert!(cursor.on_seat_removed(seat, reg.len()));
        }
        assert_eq!(cursor.current(&reg), Some(&id("a")));
    }

    #[test]
    fn test_later_seat_removed_keeps_player() {
        let mut reg = registry(&["a", "b", "c"]);
        let mut cursor = TurnCursor::starting_at(0);

        if let crate::core::LeaveOutcome::Left { seat } = reg.leave(&id("c")) {
            assert!(!cursor.on_seat_removed(seat, reg.len()));
        }
        assert_eq!(cursor.current(&reg), Some(&id("a")));
        assert_eq!(cursor.advance(&reg), Some(&id("b")));
        assert_eq!(cursor.advance(&reg), Some(&id("a")));
    }
}
