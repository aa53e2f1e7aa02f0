//! Elimination dice rules.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    choose, GameAction, GameConfig, InvalidAction, PlayerId, PlayerLimits, PlayerRegistry,
    RandomSource, WeightedSet,
};
use crate::effects::{Effect, EffectLog};
use crate::outcome::{Outcome, PlayerOutcome, TerminationReason};
use crate::rules::{check_index, Rules};
use crate::turn::{TurnCursor, TurnPhase};

use super::face::{roll, DieFace};
use super::pool::DicePool;

/// Setup parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceConfig {
    pub limits: PlayerLimits,
    pub starting_dice: u32,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            limits: PlayerLimits::new(2, 5),
            starting_dice: 5,
        }
    }
}

impl DiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: PlayerLimits) -> Self {
        assert!(limits.min >= 2, "Dice needs at least 2 players");
        self.limits = limits;
        self
    }

    pub fn starting_dice(mut self, dice: u32) -> Self {
        assert!(dice >= 1, "Players must start with at least one die");
        self.starting_dice = dice;
        self
    }

    pub fn build(self) -> DiceGame {
        DiceGame::new(self)
    }
}

/// One die of a pending roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDie {
    pub face: DieFace,
    pub resolved: bool,
}

/// Faces rolled by the current player, waiting to be applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRoll {
    pub roller: PlayerId,
    pub dice: Vector<PendingDie>,
}

impl PendingRoll {
    /// Indices of dice not yet applied, in order.
    pub fn unresolved(&self) -> impl Iterator<Item = usize> + '_ {
        self.dice
            .iter()
            .enumerate()
            .filter(|(_, die)| !die.resolved)
            .map(|(i, _)| i)
    }

    /// True once every die has been applied.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.dice.iter().all(|die| die.resolved)
    }
}

/// Dice-game snapshot data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    pub pool: DicePool,
    pub cursor: TurnCursor,
    pub pending: Option<PendingRoll>,
}

impl DiceState {
    /// Whose turn it is.
    #[must_use]
    pub fn current_player<'a>(&self, registry: &'a PlayerRegistry) -> Option<&'a PlayerId> {
        self.cursor.current(registry)
    }

    /// Seated players still holding dice, in seat order.
    pub fn active_players<'a>(
        &'a self,
        registry: &'a PlayerRegistry,
    ) -> impl Iterator<Item = &'a PlayerId> + 'a {
        registry.iter().filter(|player| self.pool.count(player) > 0)
    }
}

/// Actions a dice player can take.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload", rename_all = "camelCase")]
pub enum DiceAction {
    /// Roll every die you hold.
    RollDice,
    /// Apply one die of the pending roll.
    ResolveDie { index: usize },
    /// Apply whatever is left and pass the turn.
    EndTurn,
}

impl GameAction for DiceAction {
    const NAMES: &'static [&'static str] = &["rollDice", "resolveDie", "endTurn"];

    fn name(&self) -> &'static str {
        match self {
            DiceAction::RollDice => "rollDice",
            DiceAction::ResolveDie { .. } => "resolveDie",
            DiceAction::EndTurn => "endTurn",
        }
    }
}

/// Elimination dice: roll, apply faces, last player holding dice wins.
#[derive(Clone, Debug)]
pub struct DiceGame {
    config: GameConfig,
    starting_dice: u32,
    die: WeightedSet<DieFace>,
}

impl DiceGame {
    pub fn new(config: DiceConfig) -> Self {
        Self {
            config: GameConfig::new("Winter Dice", config.limits),
            starting_dice: config.starting_dice,
            die: DieFace::standard_die(),
        }
    }

    /// Dice each player starts with.
    #[must_use]
    pub fn starting_dice(&self) -> u32 {
        self.starting_dice
    }

    /// The die every roll uses.
    #[must_use]
    pub fn die(&self) -> &WeightedSet<DieFace> {
        &self.die
    }

    /// Apply one face for `actor`.
    fn apply_face(
        &self,
        registry: &PlayerRegistry,
        pool: &mut DicePool,
        actor: &PlayerId,
        face: DieFace,
        rng: &mut dyn RandomSource,
        log: &mut EffectLog,
    ) {
        match face {
            DieFace::Blank => {}

            DieFace::Present => {
                if pool.count(actor) == 0 {
                    trace!(%actor, "present with no dice to give");
                    return;
                }
                let recipients: Vec<&PlayerId> = registry
                    .iter()
                    .filter(|p| *p != actor && pool.count(p) > 0)
                    .collect();
                if let Some(to) = choose(rng, &recipients).map(|p| (*p).clone()) {
                    if pool.transfer(actor, &to) {
                        log.push(Effect::TransferDie {
                            from: actor.clone(),
                            to,
                        });
                    }
                }
            }

            DieFace::Snowflake | DieFace::Star => {
                if pool.eliminate(actor) {
                    log.push(Effect::EliminateDie {
                        player: actor.clone(),
                    });
                }
            }

            DieFace::CandyCane => {
                let Some(defender) = registry.next_player(actor).filter(|p| *p != actor) else {
                    return;
                };
                let defense_dice = pool.count(defender);
                // Every defensive die is drawn, even after a block.
                let blocked = roll(&self.die, defense_dice, rng).contains(&DieFace::CandyCane);
                log.push(Effect::Challenge {
                    attacker: actor.clone(),
                    defender: defender.clone(),
                    defense_dice,
                    blocked,
                });

                let (from, to) = if blocked {
                    (actor, defender)
                } else {
                    (defender, actor)
                };
                if pool.transfer(from, to) {
                    log.push(Effect::TransferDie {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
    }

    /// Mark die `index` resolved and apply it.
    fn resolve_die(
        &self,
        registry: &PlayerRegistry,
        state: &mut DiceState,
        actor: &PlayerId,
        index: usize,
        rng: &mut dyn RandomSource,
        log: &mut EffectLog,
    ) {
        let pending = state
            .pending
            .as_mut()
            .expect("die resolved without a pending roll");
        let die = &mut pending.dice[index];
        assert!(!die.resolved, "die {index} resolved twice");
        die.resolved = true;
        let face = die.face;

        log.push(Effect::DieResolved { index });
        self.apply_face(registry, &mut state.pool, actor, face, rng, log);
    }

    fn finish_turn(&self, registry: &PlayerRegistry, state: &mut DiceState, log: &mut EffectLog) {
        state.pending = None;
        if let Some(next) = state.cursor.advance(registry) {
            log.push(Effect::RotateTurn {
                to: next.clone(),
                turn: state.cursor.turn(),
            });
        }
    }
}

impl Default for DiceGame {
    fn default() -> Self {
        Self::new(DiceConfig::default())
    }
}

impl Rules for DiceGame {
    type State = DiceState;
    type Action = DiceAction;

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn setup(&self, registry: &PlayerRegistry) -> DiceState {
        DiceState {
            pool: DicePool::new(registry.iter(), self.starting_dice),
            cursor: TurnCursor::new(),
            pending: None,
        }
    }

    fn turn_number(&self, state: &DiceState) -> u32 {
        state.cursor.turn()
    }

    fn validate(
        &self,
        registry: &PlayerRegistry,
        state: &DiceState,
        player: &PlayerId,
        action: &DiceAction,
    ) -> Result<(), InvalidAction> {
        if !state.cursor.is_current(registry, player) {
            return Err(InvalidAction::NotYourTurn {
                player: player.clone(),
            });
        }

        match action {
            DiceAction::RollDice => match state.pending {
                Some(_) => Err(InvalidAction::AlreadyRolled),
                None => Ok(()),
            },
            DiceAction::ResolveDie { index } => {
                let pending = state.pending.as_ref().ok_or(InvalidAction::NothingRolled)?;
                check_index("die", *index, pending.dice.len())?;
                if pending.dice[*index].resolved {
                    return Err(InvalidAction::DieAlreadyResolved { index: *index });
                }
                Ok(())
            }
            DiceAction::EndTurn => state
                .pending
                .as_ref()
                .map(|_| ())
                .ok_or(InvalidAction::NothingRolled),
        }
    }

    fn resolve(
        &self,
        registry: &PlayerRegistry,
        state: &mut DiceState,
        player: &PlayerId,
        action: &DiceAction,
        rng: &mut dyn RandomSource,
    ) -> EffectLog {
        let mut log = EffectLog::new();

        match action {
            DiceAction::RollDice => {
                let count = state.pool.count(player);
                let dice = roll(&self.die, count, rng)
                    .into_iter()
                    .map(|face| PendingDie {
                        face,
                        resolved: false,
                    })
                    .collect();
                state.pending = Some(PendingRoll {
                    roller: player.clone(),
                    dice,
                });
                state.cursor.set_phase(TurnPhase::PendingResolution);
                log.push(Effect::Rolled {
                    player: player.clone(),
                    dice: count,
                });
            }

            DiceAction::ResolveDie { index } => {
                self.resolve_die(registry, state, player, *index, rng, &mut log);
                if state.pending.as_ref().map_or(false, PendingRoll::is_settled) {
                    self.finish_turn(registry, state, &mut log);
                }
            }

            DiceAction::EndTurn => {
                let remaining: Vec<usize> = state
                    .pending
                    .as_ref()
                    .map(|p| p.unresolved().collect())
                    .unwrap_or_default();
                for index in remaining {
                    self.resolve_die(registry, state, player, index, rng, &mut log);
                }
                self.finish_turn(registry, state, &mut log);
            }
        }

        log
    }

    fn admits_joiner(&self, _registry: &PlayerRegistry, state: &DiceState) -> bool {
        state.cursor.turn() == 0
    }

    fn on_joined(
        &self,
        _registry: &PlayerRegistry,
        state: &mut DiceState,
        player: &PlayerId,
    ) -> EffectLog {
        state.pool.add_player(player.clone(), self.starting_dice);
        EffectLog::new()
    }

    fn on_left(
        &self,
        registry: &PlayerRegistry,
        state: &mut DiceState,
        player: &PlayerId,
        seat: usize,
    ) -> EffectLog {
        let mut log = EffectLog::new();

        let removed = state.pool.remove_player(player);
        trace!(%player, removed, "dice left with player");

        if state.pending.as_ref().map_or(false, |p| &p.roller == player) {
            state.pending = None;
        }
        if state.cursor.on_seat_removed(seat, registry.len()) {
            if let Some(next) = state.cursor.current(registry) {
                log.push(Effect::RotateTurn {
                    to: next.clone(),
                    turn: state.cursor.turn(),
                });
            }
        }
        log
    }

    fn outcome(&self, registry: &PlayerRegistry, state: &DiceState) -> Option<Outcome> {
        let active: Vec<&PlayerId> = state.active_players(registry).collect();
        match active.as_slice() {
            [] => Some(Outcome::uniform(
                registry.iter(),
                PlayerOutcome::Lost,
                TerminationReason::NoSurvivors,
            )),
            [winner] => Some(Outcome::single_winner(
                registry.iter(),
                winner,
                TerminationReason::LastPlayerStanding,
            )),
            _ => None,
        }
    }

    fn legal_actions(
        &self,
        registry: &PlayerRegistry,
        state: &DiceState,
        player: &PlayerId,
    ) -> Vec<DiceAction> {
        if !state.cursor.is_current(registry, player) {
            return Vec::new();
        }
        match &state.pending {
            None => vec![DiceAction::RollDice],
            Some(pending) => pending
                .unresolved()
                .map(|index| DiceAction::ResolveDie { index })
                .chain(std::iter::once(DiceAction::EndTurn))
                .collect(),
        }
    }
}
