//! Outcome detection.
//!
//! - `Outcome`: frozen per-player results plus the reason the game ended
//! - `GameStatus`: in progress or terminal
//! - `detect`: under-population check followed by the game's own rules
//!
//! An outcome is computed purely from a snapshot. Once frozen into
//! `GameStatus::Terminal` it never changes.

mod result;
mod detector;

pub use result::{GameStatus, Outcome, PlayerOutcome, TerminationReason};
pub use detector::{detect, underpopulation};
