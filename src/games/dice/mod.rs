//! Elimination dice.
//!
//! Each player starts with a handful of dice. On your turn you roll all of
//! them and apply every face in order:
//! - Present: give one die to a random player who still has dice
//! - Snowflake / Star: lose one die from the game
//! - Candy cane: the next player rolls their dice in defense; any candy
//!   cane blocks and you pay them a die, otherwise they pay you
//!
//! The last player holding dice wins.

mod face;
mod game;
mod pool;

pub use face::{roll, DieFace};
pub use game::{DiceAction, DiceConfig, DiceGame, DiceState, PendingDie, PendingRoll};
pub use pool::DicePool;
