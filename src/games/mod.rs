//! Game implementations.
//!
//! Each game is a `Rules` implementation plus its own config and snapshot
//! types. The session drives all three the same way.

pub mod dice;
pub mod grid;
pub mod relay;

pub use dice::{DiceConfig, DiceGame};
pub use grid::{GridConfig, GridGame};
pub use relay::{RelayConfig, RelayGame};
