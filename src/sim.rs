//! Headless elimination-dice playouts.
//!
//! Each player rolls and immediately ends their turn until one player is
//! left holding dice. Used to tune starting dice and table size.

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::{GameRng, InvalidAction, PlayerId, PlayerLimits, SetupError};
use crate::effects::Effect;
use crate::games::dice::{DiceAction, DiceConfig, DieFace};
use crate::outcome::Outcome;
use crate::session::GameSession;

/// Playout parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub players: usize,
    pub starting_dice: u32,
    /// Stop a game that has not finished after this many turns.
    pub max_turns: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 5,
            starting_dice: 5,
            max_turns: 10_000,
        }
    }
}

impl SimConfig {
    /// Reject parameters the dice rules cannot start with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.starting_dice == 0 {
            return Err(SimError::Config("players must start with at least one die"));
        }
        Ok(())
    }
}

/// Errors from a playout.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid simulation config: {0}")]
    Config(&'static str),

    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),

    /// The driver submitted an action the rules refused.
    #[error("action rejected during playout: {0}")]
    Rejected(#[from] InvalidAction),
}

/// Statistics for one game.
#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    pub seed: u64,
    /// Completed turns.
    pub turns: u32,
    pub turns_per_player: FxHashMap<PlayerId, u32>,
    /// Players in the order they were left without dice. A player who
    /// regains dice and loses them again moves to the later position.
    pub eliminations: Vec<PlayerId>,
    pub winner: Option<PlayerId>,
    /// Faces rolled on turns (defensive rolls are not counted).
    pub faces: FxHashMap<DieFace, u64>,
    /// `None` if the turn cap was hit.
    pub outcome: Option<Outcome>,
}

/// Aggregate over many games.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SimSummary {
    pub games: u32,
    pub unfinished: u32,
    pub wins: FxHashMap<PlayerId, u32>,
    pub total_turns: u64,
    pub longest: u32,
    pub faces: FxHashMap<DieFace, u64>,
}

impl SimSummary {
    /// Mean completed turns per game.
    #[must_use]
    pub fn mean_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / f64::from(self.games)
        }
    }

    fn add(&mut self, report: &SimReport) {
        self.games += 1;
        self.total_turns += u64::from(report.turns);
        self.longest = self.longest.max(report.turns);
        match &report.winner {
            Some(winner) => *self.wins.entry(winner.clone()).or_default() += 1,
            None => self.unfinished += u32::from(report.outcome.is_none()),
        }
        for (face, count) in &report.faces {
            *self.faces.entry(*face).or_default() += count;
        }
    }
}

/// Seat names used by the simulator.
pub fn seat_names(players: usize) -> Vec<PlayerId> {
    (1..=players)
        .map(|i| PlayerId::new(format!("Player {i}")))
        .collect()
}

/// Play one game to completion (or the turn cap).
pub fn play(config: &SimConfig, seed: u64) -> Result<SimReport, SimError> {
    config.validate()?;
    let rules = DiceConfig::new()
        .limits(PlayerLimits::new(2, config.players.max(2)))
        .starting_dice(config.starting_dice)
        .build();
    let mut session = GameSession::setup(rules, seat_names(config.players), GameRng::new(seed))?;

    let mut report = SimReport {
        seed,
        turns: 0,
        turns_per_player: FxHashMap::default(),
        eliminations: Vec::new(),
        winner: None,
        faces: FxHashMap::default(),
        outcome: None,
    };

    while session.outcome().is_none() && report.turns < config.max_turns {
        let snapshot = session.snapshot();
        let Some(player) = snapshot.game().current_player(snapshot.registry()).cloned() else {
            break;
        };
        *report.turns_per_player.entry(player.clone()).or_default() += 1;

        session.apply(&player, DiceAction::RollDice)?;
        if let Some(pending) = &session.snapshot().game().pending {
            for die in pending.dice.iter() {
                *report.faces.entry(die.face).or_default() += 1;
            }
        }

        let transition = session.apply(&player, DiceAction::EndTurn)?;
        let pool = &session.snapshot().game().pool;
        for effect in transition.effects.iter() {
            let loser = match effect {
                Effect::EliminateDie { player } => player,
                Effect::TransferDie { from, .. } => from,
                _ => continue,
            };
            if pool.count(loser) == 0 {
                report.eliminations.retain(|p| p != loser);
                report.eliminations.push(loser.clone());
            }
        }
        report.turns = session.snapshot().game().cursor.turn();
    }

    report.outcome = session.outcome().cloned();
    report.winner = report
        .outcome
        .as_ref()
        .and_then(|outcome| outcome.winners().next().cloned());
    // A revived player may have been listed before winning.
    if let Some(winner) = &report.winner {
        report.eliminations.retain(|p| p != winner);
    }

    debug!(seed, turns = report.turns, winner = ?report.winner, "playout finished");
    Ok(report)
}

/// Play `games` games with consecutive seeds starting at `seed`.
pub fn run(config: &SimConfig, seed: u64, games: u32) -> Result<(Vec<SimReport>, SimSummary), SimError> {
    config.validate()?;
    let mut reports = Vec::with_capacity(games as usize);
    let mut summary = SimSummary::default();

    for offset in 0..u64::from(games) {
        let report = play(config, seed.wrapping_add(offset))?;
        summary.add(&report);
        reports.push(report);
    }

    info!(
        games = summary.games,
        unfinished = summary.unfinished,
        mean_turns = summary.mean_turns(),
        "simulation complete"
    );
    Ok((reports, summary))
}
