//! Effect definitions.
//!
//! Effects are the atomic, already-applied consequences of an accepted
//! action or lifecycle event. They form the audit trail returned with every
//! transition: renderers animate them, tests assert on them, and together
//! with the pending-roll snapshot they explain every random decision.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, SpectatorReason};

/// One applied consequence.
///
/// ## Dice Effects
///
/// - `Rolled`: the actor's dice were rolled into the pending buffer
/// - `TransferDie`: one die moved between pools (total unchanged)
/// - `EliminateDie`: one die left the game (total decreased by one)
/// - `Challenge`: a defensive sub-roll was made
///
/// ## Relay Effects
///
/// - `AppendContribution`: a caption or drawing was added to a paper
/// - `PassPaper`: a paper changed hands (or closed, with `to: None`)
/// - `DiscardPaper`: a departed player's paper was removed
///
/// ## Grid Effects
///
/// - `ClaimCell`: a cell was marked
///
/// ## Turn and Membership
///
/// - `RotateTurn`, `Seated`, `Spectating`, `Departed`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Dice ===

    /// `dice` faces were rolled for `player`.
    Rolled { player: PlayerId, dice: u32 },

    /// The pending die at `index` was applied.
    DieResolved { index: usize },

    /// One die moved from `from` to `to`.
    TransferDie { from: PlayerId, to: PlayerId },

    /// One die was removed from `player` and from the game.
    EliminateDie { player: PlayerId },

    /// `defender` rolled `defense_dice` dice against a candy cane and
    /// blocked it if any came up candy cane.
    Challenge {
        attacker: PlayerId,
        defender: PlayerId,
        defense_dice: u32,
        blocked: bool,
    },

    // === Relay ===

    /// `author` added the contribution at `position` on paper id `paper`.
    AppendContribution {
        paper: usize,
        position: usize,
        author: PlayerId,
    },

    /// `paper` now waits on `to`; `None` once the paper is complete.
    PassPaper { paper: usize, to: Option<PlayerId> },

    /// Paper `paper`, owned by `owner`, left the game with them.
    DiscardPaper { paper: usize, owner: PlayerId },

    // === Grid ===

    /// `player` claimed `cell`.
    ClaimCell { cell: usize, player: PlayerId },

    // === Turn / Membership ===

    /// `to` now holds the turn; `turn` is the global turn counter.
    RotateTurn { to: PlayerId, turn: u32 },

    /// `player` took a seat.
    Seated { player: PlayerId },

    /// `player` was not seated and watches instead.
    Spectating {
        player: PlayerId,
        reason: SpectatorReason,
    },

    /// `player` left the game.
    Departed { player: PlayerId },
}

/// Ordered effects produced by one transition.
///
/// SmallVec keeps the common case (a handful of effects) off the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLog {
    entries: SmallVec<[Effect; 4]>,
}

impl EffectLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect.
    pub fn push(&mut self, effect: Effect) {
        self.entries.push(effect);
    }

    /// Append every effect from another log.
    pub fn extend(&mut self, other: EffectLog) {
        self.entries.extend(other.entries);
    }

    /// Number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing happened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over effects in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.entries.iter()
    }

    /// Effects as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Effect] {
        &self.entries
    }
}

impl FromIterator<Effect> for EffectLog {
    fn from_iter<I: IntoIterator<Item = Effect>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EffectLog {
    type Item = Effect;
    type IntoIter = smallvec::IntoIter<[Effect; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
