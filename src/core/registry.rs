//! Ordered seating of the players in one game.
//!
//! Seat order is turn order. Seats shift when a player leaves, so anything
//! that needs "the player after X" asks the registry each time instead of
//! caching a seat index.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::config::PlayerLimits;
use super::error::SetupError;
use super::player::PlayerId;

/// Why a join request left the newcomer watching instead of playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectatorReason {
    /// Every seat is taken.
    TableFull,
    /// The identifier belonged to a player who already left.
    Departed,
    /// The game has progressed too far for a newcomer to catch up.
    TooLate,
    /// The game is over.
    GameOver,
}

/// Result of a join request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOutcome {
    /// Seated at the end of the turn order.
    Seated { seat: usize },
    /// Already seated; nothing changed.
    AlreadySeated,
    /// Not seated.
    Spectator(SpectatorReason),
}

/// Result of a leave request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveOutcome {
    /// Removed from the given seat; later seats moved down by one.
    Left { seat: usize },
    /// Was not seated; nothing changed.
    NotSeated,
}

/// Ordered, duplicate-free collection of seated players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    order: Vector<PlayerId>,
    departed: OrdSet<PlayerId>,
    limits: PlayerLimits,
}

impl PlayerRegistry {
    /// Seat the starting players in the order given.
    pub fn new(
        players: impl IntoIterator<Item = PlayerId>,
        limits: PlayerLimits,
    ) -> Result<Self, SetupError> {
        let mut order = Vector::new();
        for player in players {
            if order.contains(&player) {
                return Err(SetupError::DuplicatePlayer(player));
            }
            order.push_back(player);
        }
        limits.check(order.len())?;

        Ok(Self {
            order,
            departed: OrdSet::new(),
            limits,
        })
    }

    /// Seating limits this registry enforces.
    #[must_use]
    pub fn limits(&self) -> PlayerLimits {
        self.limits
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// True when fewer players remain than the game needs.
    #[must_use]
    pub fn is_underpopulated(&self) -> bool {
        self.order.len() < self.limits.min
    }

    /// Check whether a player is seated.
    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.order.contains(player)
    }

    /// Check whether a player has left this game.
    #[must_use]
    pub fn has_departed(&self, player: &PlayerId) -> bool {
        self.departed.contains(player)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<usize> {
        self.order.index_of(player)
    }

    /// Player at a seat, wrapping modulo the current length.
    #[must_use]
    pub fn at(&self, seat: usize) -> Option<&PlayerId> {
        if self.order.is_empty() {
            return None;
        }
        self.order.get(seat % self.order.len())
    }

    /// Iterate over seated players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.order.iter()
    }

    /// The player seated immediately after `player`, wrapping around.
    ///
    /// Returns `None` if `player` is not seated.
    #[must_use]
    pub fn next_player(&self, player: &PlayerId) -> Option<&PlayerId> {
        let seat = self.seat_of(player)?;
        self.at(seat + 1)
    }

    /// Seat a newcomer at the end of the turn order.
    pub fn join(&mut self, player: PlayerId) -> JoinOutcome {
        if self.contains(&player) {
            return JoinOutcome::AlreadySeated;
        }
        if self.departed.contains(&player) {
            return JoinOutcome::Spectator(SpectatorReason::Departed);
        }
        if self.order.len() >= self.limits.max {
            return JoinOutcome::Spectator(SpectatorReason::TableFull);
        }

        self.order.push_back(player);
        self.debug_check();
        JoinOutcome::Seated {
            seat: self.order.len() - 1,
        }
    }

    /// Remove a player. Their identifier can never be seated again.
    pub fn leave(&mut self, player: &PlayerId) -> LeaveOutcome {
        match self.seat_of(player) {
            Some(seat) => {
                self.order.remove(seat);
                self.departed.insert(player.clone());
                self.debug_check();
                LeaveOutcome::Left { seat }
            }
            None => LeaveOutcome::NotSeated,
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.order
                .iter()
                .enumerate()
                .all(|(i, p)| self.order.index_of(p) == Some(i)),
            "duplicate player in registry"
        );
    }
}
