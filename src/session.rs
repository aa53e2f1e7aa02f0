//! Host boundary: one exclusive handle per running game.
//!
//! The transport delivers actions and membership events; `GameSession`
//! validates, applies, detects termination and hands back a `Transition`.
//! Every method takes `&mut self`, so the borrow checker provides the
//! single-mutator discipline: a join or leave can never interleave with an
//! action's validate-then-apply sequence.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::core::{
    GameAction, GameRng, InvalidAction, JoinOutcome, LeaveOutcome, PlayerId, PlayerRegistry,
    RandomSource, SetupError, SharedState, SpectatorReason,
};
use crate::effects::{Effect, EffectLog};
use crate::outcome::{self, Outcome};
use crate::rules::{self, Rules};

/// What one accepted action or lifecycle event did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Snapshot sequence number after the transition.
    pub sequence: u32,

    /// Consequences, in application order.
    pub effects: EffectLog,

    /// The outcome, on the one transition that ended the game.
    pub game_over: Option<Outcome>,
}

impl Transition {
    fn unchanged(sequence: u32, effects: EffectLog) -> Self {
        Self {
            sequence,
            effects,
            game_over: None,
        }
    }
}

/// Read-only view handed to a renderer: the snapshot plus who is looking.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerView<'a, S, A: Clone> {
    /// The player this view is rendered for.
    pub viewer: &'a PlayerId,

    /// False for spectators.
    pub seated: bool,

    /// The authoritative snapshot.
    pub snapshot: &'a SharedState<S, A>,
}

/// The authoritative state holder for one game instance.
pub struct GameSession<G: Rules, R: RandomSource = GameRng> {
    rules: G,
    state: SharedState<G::State, G::Action>,
    rng: R,
}

impl<G: Rules, R: RandomSource> GameSession<G, R> {
    /// Create a game for the given players, seated in order.
    pub fn setup(
        rules: G,
        players: impl IntoIterator<Item = PlayerId>,
        rng: R,
    ) -> Result<Self, SetupError> {
        let registry = PlayerRegistry::new(players, rules.config().limits)?;
        let game = rules.setup(&registry);
        debug!(game = %rules.config().name, players = registry.len(), "game set up");

        Ok(Self {
            rules,
            state: SharedState::new(registry, game),
            rng,
        })
    }

    /// The game's rules.
    pub fn rules(&self) -> &G {
        &self.rules
    }

    /// The authoritative snapshot.
    pub fn snapshot(&self) -> &SharedState<G::State, G::Action> {
        &self.state
    }

    /// The random source (for inspecting scripted draws).
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Mutable access to the random source, e.g. to queue scripted draws.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// The frozen outcome, once the game is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.outcome()
    }

    /// Snapshot as seen by one player or spectator.
    pub fn view<'a>(&'a self, viewer: &'a PlayerId) -> PlayerView<'a, G::State, G::Action> {
        PlayerView {
            viewer,
            seated: self.state.registry().contains(viewer),
            snapshot: &self.state,
        }
    }

    /// Check an action without applying it.
    pub fn validate(&self, player: &PlayerId, action: &G::Action) -> Result<(), InvalidAction> {
        rules::validate(&self.rules, &self.state, player, action)
    }

    /// Actions `player` could submit right now.
    pub fn legal_actions(&self, player: &PlayerId) -> Vec<G::Action> {
        if rules::check_actor(self.state.status(), self.state.registry(), player).is_err() {
            return Vec::new();
        }
        self.rules
            .legal_actions(self.state.registry(), self.state.game(), player)
    }

    /// Decode and apply a transport submission.
    #[instrument(level = "debug", skip(self, payload), fields(game = %self.rules.config().name))]
    pub fn apply_action(
        &mut self,
        name: &str,
        payload: &Value,
        player: &PlayerId,
    ) -> Result<Transition, InvalidAction> {
        let action = match G::Action::decode(name, payload) {
            Ok(action) => action,
            Err(reason) => {
                warn!(%player, %reason, "undecodable action");
                return Err(reason);
            }
        };
        self.apply(player, action)
    }

    /// Validate and apply a typed action.
    ///
    /// On rejection nothing changes. On acceptance the whole effect set is
    /// applied, the action is recorded and termination is re-evaluated.
    pub fn apply(&mut self, player: &PlayerId, action: G::Action) -> Result<Transition, InvalidAction> {
        if let Err(reason) = self.validate(player, &action) {
            warn!(%player, action = action.name(), %reason, "action rejected");
            return Err(reason);
        }

        let turn = self.rules.turn_number(self.state.game());
        let (registry, game) = self.state.split_mut();
        let effects = self
            .rules
            .resolve(registry, game, player, &action, &mut self.rng);

        let sequence = self.state.bump_sequence();
        debug!(%player, action = action.name(), sequence, effects = effects.len(), "action applied");
        self.state.record(player.clone(), action, turn);

        let game_over = self.settle();
        Ok(Transition {
            sequence,
            effects,
            game_over,
        })
    }

    /// Seat a newcomer, or leave them spectating.
    pub fn on_player_joined(&mut self, player: PlayerId) -> Transition {
        let mut effects = EffectLog::new();

        if self.state.is_terminal() {
            effects.push(Effect::Spectating {
                player,
                reason: SpectatorReason::GameOver,
            });
            return Transition::unchanged(self.state.sequence(), effects);
        }

        let joined = if self.state.registry().contains(&player) {
            JoinOutcome::AlreadySeated
        } else if !self
            .rules
            .admits_joiner(self.state.registry(), self.state.game())
        {
            JoinOutcome::Spectator(SpectatorReason::TooLate)
        } else {
            self.state.registry_mut().join(player.clone())
        };

        match joined {
            JoinOutcome::Seated { seat } => {
                debug!(%player, seat, "player seated");
                effects.push(Effect::Seated {
                    player: player.clone(),
                });
                let (registry, game) = self.state.split_mut();
                effects.extend(self.rules.on_joined(registry, game, &player));

                let sequence = self.state.bump_sequence();
                let game_over = self.settle();
                Transition {
                    sequence,
                    effects,
                    game_over,
                }
            }
            JoinOutcome::AlreadySeated => Transition::unchanged(self.state.sequence(), effects),
            JoinOutcome::Spectator(reason) => {
                debug!(%player, ?reason, "player spectating");
                effects.push(Effect::Spectating { player, reason });
                Transition::unchanged(self.state.sequence(), effects)
            }
        }
    }

    /// Remove a player; may end the game.
    pub fn on_player_left(&mut self, player: &PlayerId) -> Transition {
        let mut effects = EffectLog::new();

        if self.state.is_terminal() {
            return Transition::unchanged(self.state.sequence(), effects);
        }

        match self.state.registry_mut().leave(player) {
            LeaveOutcome::Left { seat } => {
                debug!(%player, seat, "player left");
                effects.push(Effect::Departed {
                    player: player.clone(),
                });
                let (registry, game) = self.state.split_mut();
                effects.extend(self.rules.on_left(registry, game, player, seat));

                let sequence = self.state.bump_sequence();
                let game_over = self.settle();
                Transition {
                    sequence,
                    effects,
                    game_over,
                }
            }
            LeaveOutcome::NotSeated => Transition::unchanged(self.state.sequence(), effects),
        }
    }

    /// Freeze the outcome if the snapshot is terminal. Returns it only the
    /// first time.
    fn settle(&mut self) -> Option<Outcome> {
        if self.state.is_terminal() {
            return None;
        }
        let outcome = outcome::detect(&self.rules, self.state.registry(), self.state.game())?;
        info!(game = %self.rules.config().name, reason = ?outcome.reason, "game over");
        self.state.terminate(outcome.clone());
        Some(outcome)
    }
}
