//! Rejection and setup errors.
//!
//! Every rejection is recoverable: the submitting client is told why and the
//! game state is left untouched. Broken engine invariants are not errors at
//! all; they panic.

use super::player::PlayerId;

/// Why an action was refused.
///
/// Structural violations (unknown name, malformed payload, out-of-range
/// target) are reported through the same type and handled the same way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAction {
    /// The game has already reported its outcome.
    #[error("the game is over")]
    GameOver,

    /// The acting player is not a member of the game.
    #[error("{player} is not seated in this game")]
    NotSeated { player: PlayerId },

    /// The acting player does not own the turn (or the targeted paper).
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    /// The action name is not part of this game's action set.
    #[error("unknown action `{name}`")]
    UnknownAction { name: String },

    /// The payload does not have the shape the action expects.
    #[error("malformed payload for `{name}`: {reason}")]
    MalformedPayload { name: String, reason: String },

    /// A paper, cell or die index outside its collection.
    #[error("{target} {index} is out of range (only {len})")]
    OutOfRange {
        target: &'static str,
        index: usize,
        len: usize,
    },

    /// The paper was discarded when its owner left.
    #[error("paper {paper} was discarded")]
    PaperDiscarded { paper: usize },

    /// The paper already holds every contribution it needs.
    #[error("paper {paper} is already complete")]
    PaperComplete { paper: usize },

    /// The cell has already been claimed.
    #[error("cell {cell} is already claimed")]
    CellOccupied { cell: usize },

    /// The player made the previous move and cannot move again.
    #[error("{player} made the previous move")]
    ConsecutiveMove { player: PlayerId },

    /// A roll is already waiting to be resolved.
    #[error("dice have already been rolled this turn")]
    AlreadyRolled,

    /// Resolution was requested before rolling.
    #[error("no dice have been rolled this turn")]
    NothingRolled,

    /// The die has already been resolved.
    #[error("die {index} has already been resolved")]
    DieAlreadyResolved { index: usize },
}

impl InvalidAction {
    /// True for malformed submissions rather than illegal moves.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnknownAction { .. } | Self::MalformedPayload { .. } | Self::OutOfRange { .. }
        )
    }
}

/// Why a game could not be created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// Too few or too many players.
    #[error("expected between {min} and {max} players, got {got}")]
    PlayerCount { min: usize, max: usize, got: usize },

    /// The same identifier was supplied twice.
    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    /// Player limits with no valid count.
    #[error("invalid player limits {min}..={max}")]
    InvalidLimits { min: usize, max: usize },
}
