//! 3×3 grid claiming rules.

use serde::{Deserialize, Serialize};

use crate::core::{
    GameAction, GameConfig, InvalidAction, PlayerId, PlayerLimits, PlayerRegistry, RandomSource,
};
use crate::effects::{Effect, EffectLog};
use crate::outcome::{Outcome, PlayerOutcome, TerminationReason};
use crate::rules::{check_index, Rules};

/// Cells on the board.
pub const CELLS: usize = 9;

/// Every winning triple: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Setup parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub limits: PlayerLimits,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            limits: PlayerLimits::new(2, 2),
        }
    }
}

/// Grid snapshot data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub cells: [Option<PlayerId>; CELLS],
    /// Whoever claimed most recently; they may not claim again until the
    /// other player has.
    pub last_mover: Option<PlayerId>,
    /// The completed line, once there is one.
    pub win_line: Option<[usize; 3]>,
}

impl GridState {
    fn new() -> Self {
        Self {
            cells: Default::default(),
            last_mover: None,
            win_line: None,
        }
    }

    /// Indices of unclaimed cells.
    pub fn free_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// First line whose three cells share one owner.
    #[must_use]
    pub fn find_line(&self) -> Option<[usize; 3]> {
        LINES.iter().copied().find(|[a, b, c]| {
            self.cells[*a].is_some()
                && self.cells[*a] == self.cells[*b]
                && self.cells[*a] == self.cells[*c]
        })
    }
}

/// Actions a grid player can take.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload", rename_all = "camelCase")]
pub enum GridAction {
    /// Claim the cell at this index (row-major).
    ClaimCell(usize),
}

impl GameAction for GridAction {
    const NAMES: &'static [&'static str] = &["claimCell"];

    fn name(&self) -> &'static str {
        match self {
            GridAction::ClaimCell(_) => "claimCell",
        }
    }
}

/// Two players alternately claim cells; three in a line wins.
#[derive(Clone, Debug)]
pub struct GridGame {
    config: GameConfig,
}

impl GridGame {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config: GameConfig::new("Grid", config.limits),
        }
    }
}

impl Default for GridGame {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl Rules for GridGame {
    type State = GridState;
    type Action = GridAction;

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn setup(&self, _registry: &PlayerRegistry) -> GridState {
        GridState::new()
    }

    fn turn_number(&self, state: &GridState) -> u32 {
        state.cells.iter().filter(|c| c.is_some()).count() as u32
    }

    fn validate(
        &self,
        _registry: &PlayerRegistry,
        state: &GridState,
        player: &PlayerId,
        action: &GridAction,
    ) -> Result<(), InvalidAction> {
        let GridAction::ClaimCell(cell) = *action;

        check_index("cell", cell, CELLS)?;
        if state.cells[cell].is_some() {
            return Err(InvalidAction::CellOccupied { cell });
        }
        if state.last_mover.as_ref() == Some(player) {
            return Err(InvalidAction::ConsecutiveMove {
                player: player.clone(),
            });
        }
        Ok(())
    }

    fn resolve(
        &self,
        _registry: &PlayerRegistry,
        state: &mut GridState,
        player: &PlayerId,
        action: &GridAction,
        _rng: &mut dyn RandomSource,
    ) -> EffectLog {
        let GridAction::ClaimCell(cell) = *action;

        state.cells[cell] = Some(player.clone());
        state.last_mover = Some(player.clone());
        state.win_line = state.find_line();

        let mut log = EffectLog::new();
        log.push(Effect::ClaimCell {
            cell,
            player: player.clone(),
        });
        log
    }

    fn on_joined(
        &self,
        _registry: &PlayerRegistry,
        _state: &mut GridState,
        _player: &PlayerId,
    ) -> EffectLog {
        EffectLog::new()
    }

    fn on_left(
        &self,
        _registry: &PlayerRegistry,
        _state: &mut GridState,
        _player: &PlayerId,
        _seat: usize,
    ) -> EffectLog {
        EffectLog::new()
    }

    fn outcome(&self, registry: &PlayerRegistry, state: &GridState) -> Option<Outcome> {
        if state.win_line.is_some() {
            let winner = state.last_mover.as_ref()?;
            return Some(Outcome::single_winner(
                registry.iter(),
                winner,
                TerminationReason::LineCompleted,
            ));
        }
        state.is_full().then(|| {
            Outcome::uniform(registry.iter(), PlayerOutcome::Lost, TerminationReason::BoardFull)
        })
    }

    fn legal_actions(
        &self,
        _registry: &PlayerRegistry,
        state: &GridState,
        player: &PlayerId,
    ) -> Vec<GridAction> {
        if state.last_mover.as_ref() == Some(player) {
            return Vec::new();
        }
        state.free_cells().map(GridAction::ClaimCell).collect()
    }
}
