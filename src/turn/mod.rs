//! Turn engine.
//!
//! Index-based games (elimination dice) hold a `TurnCursor`: a seat index,
//! a completed-turn counter and a `TurnPhase`:
//!
//! ```text
//! AwaitingAction --roll--> PendingResolution --resolve all--> (AdvancingTurn) --advance--> AwaitingAction
//! ```
//!
//! `AdvancingTurn` only exists while a transition is being applied; the
//! flush and the advance happen together, so snapshots show either
//! `PendingResolution` or the next player's `AwaitingAction`.
//!
//! Games whose turn is owned per unit (relay papers) or implied by the last
//! mover (grid) derive the next actor from the registry instead.

mod cursor;

pub use cursor::{TurnCursor, TurnPhase};
