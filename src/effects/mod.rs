//! Effect system: the audit trail of applied consequences.
//!
//! - `Effect`: one transfer, elimination, contribution, claim or rotation
//! - `EffectLog`: the ordered effects of one transition
//!
//! Games apply their consequences directly to their own state inside
//! `Rules::resolve` and record each one here as they go.

mod effect;

pub use effect::{Effect, EffectLog};
