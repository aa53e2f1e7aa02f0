//! Injectable randomness.
//!
//! ## Key Features
//!
//! - **Injectable**: rules draw through `&mut dyn RandomSource`, never an
//!   ambient generator
//! - **Deterministic**: `GameRng` replays identically from a seed
//! - **Scriptable**: `ScriptedRandom` feeds a fixed draw sequence to tests
//! - **Serializable**: `GameRngState` captures a `GameRng` in O(1)
//!
//! ```
//! use parlor::core::{GameRng, RandomSource, WeightedSet};
//!
//! let faces = WeightedSet::new([("blank", 3), ("star", 1)]);
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(faces.draw(&mut a), faces.draw(&mut b));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Source of uniform draws.
///
/// Every random decision in the engine reduces to "pick one of `len`
/// equally likely slots", which keeps scripted sources trivial.
pub trait RandomSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Choose a uniformly random element from a slice.
///
/// Returns `None` for an empty slice without consuming a draw.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.pick_index(items.len()))
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RandomSource for GameRng {
    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable RNG state for auditing and replay.
///
/// Uses the ChaCha8 word position so capture is O(1) regardless of how
/// many draws have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the generator was created from
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// A fixed sequence of draws, for tests and replays.
///
/// Each scripted value is reduced modulo the requested range. Once the
/// script runs out every draw returns 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<usize>,
    consumed: usize,
}

impl ScriptedRandom {
    /// Create a source that replays `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Append more draws to the end of the script.
    pub fn extend(&mut self, draws: impl IntoIterator<Item = usize>) {
        self.draws.extend(draws);
    }

    /// Draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Draws consumed so far, including any past the end of the script.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.consumed += 1;
        match self.draws.pop_front() {
            Some(draw) => draw % len,
            None => {
                tracing::warn!(consumed = self.consumed, "random script exhausted, drawing 0");
                0
            }
        }
    }
}

/// A weighted symbol set sampled with a single uniform draw.
///
/// A symbol with weight `w` occupies `w` consecutive slots; one slot is
/// picked uniformly and mapped back to its symbol. Slot order follows
/// declaration order, so a scripted draw of `k` always selects the symbol
/// covering slot `k`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedSet<T> {
    entries: SmallVec<[(T, u32); 8]>,
    total: u32,
}

impl<T> WeightedSet<T> {
    /// Build a set from `(symbol, weight)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (T, u32)>) -> Self {
        let entries: SmallVec<[(T, u32); 8]> =
            entries.into_iter().filter(|(_, w)| *w > 0).collect();
        let total = entries.iter().map(|(_, w)| *w).sum();
        assert!(total > 0, "Weighted set needs at least one positive weight");
        Self { entries, total }
    }

    /// Total number of slots.
    #[must_use]
    pub fn slots(&self) -> u32 {
        self.total
    }

    /// Symbol covering the given slot, if the slot exists.
    #[must_use]
    pub fn at_slot(&self, slot: u32) -> Option<&T> {
        let mut remaining = slot;
        for (symbol, weight) in &self.entries {
            if remaining < *weight {
                return Some(symbol);
            }
            remaining -= weight;
        }
        None
    }

    /// Draw one symbol.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> &T {
        let slot = rng.pick_index(self.total as usize) as u32;
        match self.at_slot(slot) {
            Some(symbol) => symbol,
            None => panic!("slot {slot} outside weighted set of {}", self.total),
        }
    }
}
