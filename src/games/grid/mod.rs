//! Two-player grid claiming.
//!
//! Players claim cells of a 3×3 board. There is no turn index: a player
//! simply may not claim twice in a row. Three in a line wins; a full board
//! with no line means both lose.

mod game;

pub use game::{GridAction, GridConfig, GridGame, GridState, CELLS, LINES};
