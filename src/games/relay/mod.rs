//! Caption/drawing relay.
//!
//! Every player starts a paper. Papers travel around the table; each holder
//! adds a caption or a drawing (alternating, captions first) and passes it
//! on. The game ends, with everyone winning, once every paper holds its
//! target number of contributions.

mod game;

pub use game::{
    Contribution, ContributionKind, Paper, RelayAction, RelayConfig, RelayGame, RelayState,
};
