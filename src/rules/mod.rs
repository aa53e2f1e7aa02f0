//! Rules trait and shared validation.
//!
//! Games implement `Rules` to define:
//! - Legal actions for each game state
//! - How actions modify state
//! - Win/loss conditions
//!
//! The session calls into `Rules` but never interprets game-specific
//! concepts directly.

pub mod engine;
pub mod validator;

pub use engine::Rules;
pub use validator::{check_actor, check_index, validate};
