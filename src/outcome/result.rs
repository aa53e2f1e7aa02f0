//! Terminal results.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Per-player result reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerOutcome {
    Won,
    Lost,
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Every relay paper reached its target length.
    PapersComplete,
    /// One player kept dice while everyone else ran out.
    LastPlayerStanding,
    /// Every player ran out of dice at once.
    NoSurvivors,
    /// A player completed a line on the grid.
    LineCompleted,
    /// The grid filled up without a line.
    BoardFull,
    /// Too few players remained to continue.
    Underpopulated,
}

/// Frozen result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Result for every player seated when the game ended.
    pub players: OrdMap<PlayerId, PlayerOutcome>,

    /// What ended the game.
    pub reason: TerminationReason,
}

impl Outcome {
    /// Every listed player gets the same result.
    pub fn uniform<'a>(
        players: impl IntoIterator<Item = &'a PlayerId>,
        result: PlayerOutcome,
        reason: TerminationReason,
    ) -> Self {
        Self {
            players: players.into_iter().map(|p| (p.clone(), result)).collect(),
            reason,
        }
    }

    /// `winner` wins, every other listed player loses.
    pub fn single_winner<'a>(
        players: impl IntoIterator<Item = &'a PlayerId>,
        winner: &PlayerId,
        reason: TerminationReason,
    ) -> Self {
        Self {
            players: players
                .into_iter()
                .map(|p| {
                    let result = if p == winner {
                        PlayerOutcome::Won
                    } else {
                        PlayerOutcome::Lost
                    };
                    (p.clone(), result)
                })
                .collect(),
            reason,
        }
    }

    /// Result for one player.
    #[must_use]
    pub fn result_for(&self, player: &PlayerId) -> Option<PlayerOutcome> {
        self.players.get(player).copied()
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.result_for(player) == Some(PlayerOutcome::Won)
    }

    /// Every player who won.
    pub fn winners(&self) -> impl Iterator<Item = &PlayerId> {
        self.players
            .iter()
            .filter(|(_, r)| **r == PlayerOutcome::Won)
            .map(|(p, _)| p)
    }
}

/// Whether a game is still accepting actions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Actions and lifecycle events are accepted.
    InProgress,
    /// Read-only from here on.
    Terminal(Outcome),
}

impl GameStatus {
    /// True once the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Terminal(_))
    }

    /// The frozen outcome, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            GameStatus::Terminal(outcome) => Some(outcome),
            GameStatus::InProgress => None,
        }
    }
}
