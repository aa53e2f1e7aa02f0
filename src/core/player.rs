//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Opaque, stable string handed in by the host. Unique within a game and
//! never reused after the player leaves.
//!
//! ## PlayerMap
//!
//! Per-player data keyed by `PlayerId`, backed by a persistent ordered map
//! so whole-state snapshots clone in O(1).

use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Host-assigned player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Per-player data storage.
///
/// Entries are added and removed as players join and leave, so unlike a
/// seat-indexed `Vec` the map never needs re-indexing.
///
/// ## Example
///
/// ```
/// use parlor::core::{PlayerId, PlayerMap};
///
/// let players = [PlayerId::new("a"), PlayerId::new("b")];
/// let mut dice: PlayerMap<u32> = PlayerMap::with_value(&players, 5);
///
/// assert_eq!(dice[&players[0]], 5);
///
/// *dice.get_mut(&players[1]).unwrap() = 3;
/// assert_eq!(dice[&players[1]], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T: Clone> {
    data: OrdMap<PlayerId, T>,
}

impl<T: Clone> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new<'a>(
        players: impl IntoIterator<Item = &'a PlayerId>,
        factory: impl Fn(&PlayerId) -> T,
    ) -> Self {
        let data = players
            .into_iter()
            .map(|p| (p.clone(), factory(p)))
            .collect();
        Self { data }
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value<'a>(players: impl IntoIterator<Item = &'a PlayerId>, value: T) -> Self {
        Self::new(players, |_| value.clone())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check whether a player has an entry.
    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.data.contains_key(player)
    }

    /// Get a player's data.
    #[must_use]
    pub fn get(&self, player: &PlayerId) -> Option<&T> {
        self.data.get(player)
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: &PlayerId) -> Option<&mut T> {
        self.data.get_mut(player)
    }

    /// Insert or replace a player's data, returning the previous value.
    pub fn insert(&mut self, player: PlayerId, value: T) -> Option<T> {
        self.data.insert(player, value)
    }

    /// Remove a player's entry.
    pub fn remove(&mut self, player: &PlayerId) -> Option<T> {
        self.data.remove(player)
    }

    /// Iterate over (PlayerId, &T) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &T)> {
        self.data.iter()
    }

    /// Iterate over values in id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.values()
    }
}

impl<T: Clone> Default for PlayerMap<T> {
    fn default() -> Self {
        Self { data: OrdMap::new() }
    }
}

impl<T: Clone> Index<&PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: &PlayerId) -> &Self::Output {
        match self.data.get(player) {
            Some(value) => value,
            None => panic!("no entry for player {player}"),
        }
    }
}
