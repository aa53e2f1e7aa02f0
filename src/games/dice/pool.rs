//! Per-player dice counts with a tracked total.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

/// Dice held by each player.
///
/// `total` is tracked alongside the counts and must always equal their sum;
/// a mismatch is an engine defect and panics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePool {
    counts: PlayerMap<u32>,
    total: u32,
}

impl DicePool {
    /// Give every player the same number of dice.
    pub fn new<'a>(players: impl IntoIterator<Item = &'a PlayerId>, dice_each: u32) -> Self {
        let counts = PlayerMap::with_value(players, dice_each);
        let total = counts.values().sum();
        Self { counts, total }
    }

    /// Dice held by a player (0 for unknown players).
    #[must_use]
    pub fn count(&self, player: &PlayerId) -> u32 {
        self.counts.get(player).copied().unwrap_or(0)
    }

    /// Dice still in the game.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Per-player counts.
    #[must_use]
    pub fn counts(&self) -> &PlayerMap<u32> {
        &self.counts
    }

    /// Move one die. No-op (returns false) if `from` has none or either
    /// player is unknown.
    pub fn transfer(&mut self, from: &PlayerId, to: &PlayerId) -> bool {
        if from == to || !self.counts.contains(to) || self.count(from) == 0 {
            return false;
        }
        if let Some(count) = self.counts.get_mut(from) {
            *count -= 1;
        }
        if let Some(count) = self.counts.get_mut(to) {
            *count += 1;
        }
        self.check();
        true
    }

    /// Remove one die from the game. No-op (returns false) if the player
    /// has none.
    pub fn eliminate(&mut self, player: &PlayerId) -> bool {
        match self.counts.get_mut(player) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total -= 1;
                self.check();
                true
            }
            _ => false,
        }
    }

    /// Add a player with `dice` dice.
    pub fn add_player(&mut self, player: PlayerId, dice: u32) {
        let previous = self.counts.insert(player, dice).unwrap_or(0);
        self.total = self.total - previous + dice;
        self.check();
    }

    /// Remove a player; their dice leave the game. Returns how many.
    pub fn remove_player(&mut self, player: &PlayerId) -> u32 {
        let removed = self.counts.remove(player).unwrap_or(0);
        self.total -= removed;
        self.check();
        removed
    }

    fn check(&self) {
        let sum: u32 = self.counts.values().sum();
        assert_eq!(self.total, sum, "dice pool total out of sync with player counts");
    }
}
