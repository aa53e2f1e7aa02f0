//! Caption/drawing relay rules.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    GameAction, GameConfig, InvalidAction, PlayerId, PlayerLimits, PlayerRegistry, RandomSource,
};
use crate::effects::{Effect, EffectLog};
use crate::outcome::{Outcome, PlayerOutcome, TerminationReason};
use crate::rules::{check_index, Rules};

/// Setup parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    pub limits: PlayerLimits,
    /// Each paper gets this many contributions per seated player.
    pub contributions_per_player: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            limits: PlayerLimits::new(3, 6),
            contributions_per_player: 2,
        }
    }
}

impl RelayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limits(mut self, limits: PlayerLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn contributions_per_player(mut self, count: usize) -> Self {
        assert!(count >= 1, "Papers need at least one contribution per player");
        self.contributions_per_player = count;
        self
    }

    pub fn build(self) -> RelayGame {
        RelayGame::new(self)
    }
}

/// What a contribution is. Alternates by position, starting with a caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionKind {
    Caption,
    Drawing,
}

impl ContributionKind {
    /// Kind required at `position` in a paper.
    #[must_use]
    pub fn at(position: usize) -> Self {
        if position % 2 == 0 {
            ContributionKind::Caption
        } else {
            ContributionKind::Drawing
        }
    }
}

/// One caption or drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub kind: ContributionKind,
    pub content: String,
    pub author: PlayerId,
}

/// One chain of contributions started by its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Stable identifier, never reused within a game.
    pub id: usize,
    pub owner: PlayerId,
    /// Who must contribute next; `None` once complete.
    pub current: Option<PlayerId>,
    pub contributions: Vector<Contribution>,
}

impl Paper {
    fn new(id: usize, owner: PlayerId) -> Self {
        Self {
            id,
            current: Some(owner.clone()),
            owner,
            contributions: Vector::new(),
        }
    }

    /// Kind of the next contribution.
    #[must_use]
    pub fn next_kind(&self) -> ContributionKind {
        ContributionKind::at(self.contributions.len())
    }

    #[must_use]
    pub fn is_complete(&self, target: usize) -> bool {
        self.contributions.len() >= target
    }
}

/// Relay snapshot data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayState {
    /// Live papers in id order.
    pub papers: Vector<Paper>,
    /// Contributions each paper needs.
    pub target: usize,
    /// Paper ids handed out so far; the next paper gets this id.
    pub issued: usize,
}

impl RelayState {
    /// Look up a live paper by id.
    #[must_use]
    pub fn paper(&self, id: usize) -> Option<&Paper> {
        self.papers.iter().find(|p| p.id == id)
    }

    fn paper_mut(&mut self, id: usize) -> Option<&mut Paper> {
        self.papers.iter_mut().find(|p| p.id == id)
    }

    fn add_paper(&mut self, owner: PlayerId) -> usize {
        let id = self.issued;
        self.issued += 1;
        self.papers.push_back(Paper::new(id, owner));
        id
    }

    /// Contributions made across all papers.
    #[must_use]
    pub fn total_contributions(&self) -> usize {
        self.papers.iter().map(|p| p.contributions.len()).sum()
    }

    /// Ids of the papers waiting on `player`.
    pub fn papers_for<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = usize> + 'a {
        self.papers
            .iter()
            .filter(move |paper| paper.current.as_ref() == Some(player))
            .map(|paper| paper.id)
    }

    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.papers.iter().all(|p| p.is_complete(self.target))
    }
}

/// Actions a relay player can take.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload", rename_all = "camelCase")]
pub enum RelayAction {
    #[serde(rename_all = "camelCase")]
    SubmitContribution { paper_id: usize, content: String },
}

impl GameAction for RelayAction {
    const NAMES: &'static [&'static str] = &["submitContribution"];

    fn name(&self) -> &'static str {
        match self {
            RelayAction::SubmitContribution { .. } => "submitContribution",
        }
    }
}

/// Cooperative relay: every paper passes around the table, alternating
/// captions and drawings, until each holds its target.
#[derive(Clone, Debug)]
pub struct RelayGame {
    config: GameConfig,
    per_player: usize,
}

impl RelayGame {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config: GameConfig::new("Relay", config.limits),
            per_player: config.contributions_per_player,
        }
    }

    /// Target length for a table of `players`.
    #[must_use]
    pub fn target_for(&self, players: usize) -> usize {
        self.per_player * players
    }

    /// Who picks up a paper after its latest contribution.
    fn successor<'a>(registry: &'a PlayerRegistry, paper: &Paper) -> Option<&'a PlayerId> {
        paper
            .contributions
            .last()
            .and_then(|c| registry.next_player(&c.author))
            .or_else(|| registry.next_player(&paper.owner))
    }
}

impl Default for RelayGame {
    fn default() -> Self {
        Self::new(RelayConfig::default())
    }
}

impl Rules for RelayGame {
    type State = RelayState;
    type Action = RelayAction;

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn setup(&self, registry: &PlayerRegistry) -> RelayState {
        let mut state = RelayState {
            papers: Vector::new(),
            target: self.target_for(registry.len()),
            issued: 0,
        };
        for player in registry.iter() {
            state.add_paper(player.clone());
        }
        state
    }

    fn turn_number(&self, state: &RelayState) -> u32 {
        state.total_contributions() as u32
    }

    fn validate(
        &self,
        _registry: &PlayerRegistry,
        state: &RelayState,
        player: &PlayerId,
        action: &RelayAction,
    ) -> Result<(), InvalidAction> {
        let RelayAction::SubmitContribution { paper_id, .. } = action;

        check_index("paper", *paper_id, state.issued)?;
        let Some(paper) = state.paper(*paper_id) else {
            return Err(InvalidAction::PaperDiscarded { paper: *paper_id });
        };
        match &paper.current {
            None => Err(InvalidAction::PaperComplete { paper: *paper_id }),
            Some(current) if current != player => Err(InvalidAction::NotYourTurn {
                player: player.clone(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn resolve(
        &self,
        registry: &PlayerRegistry,
        state: &mut RelayState,
        player: &PlayerId,
        action: &RelayAction,
        _rng: &mut dyn RandomSource,
    ) -> EffectLog {
        let RelayAction::SubmitContribution { paper_id, content } = action;
        let mut log = EffectLog::new();
        let target = state.target;
        let paper = state
            .paper_mut(*paper_id)
            .expect("validated paper is live");

        let position = paper.contributions.len();
        paper.contributions.push_back(Contribution {
            kind: ContributionKind::at(position),
            content: content.clone(),
            author: player.clone(),
        });
        log.push(Effect::AppendContribution {
            paper: *paper_id,
            position,
            author: player.clone(),
        });

        paper.current = if paper.is_complete(target) {
            None
        } else {
            registry.next_player(player).cloned()
        };
        log.push(Effect::PassPaper {
            paper: *paper_id,
            to: paper.current.clone(),
        });

        log
    }

    fn admits_joiner(&self, registry: &PlayerRegistry, state: &RelayState) -> bool {
        state.total_contributions() <= registry.len()
    }

    fn on_joined(
        &self,
        registry: &PlayerRegistry,
        state: &mut RelayState,
        player: &PlayerId,
    ) -> EffectLog {
        let mut log = EffectLog::new();
        state.target = self.target_for(registry.len());

        let target = state.target;
        for paper in state.papers.iter_mut() {
            if paper.current.is_none() && !paper.is_complete(target) {
                paper.current = Self::successor(registry, paper).cloned();
                debug!(paper = paper.id, to = ?paper.current, "paper reopened");
                log.push(Effect::PassPaper {
                    paper: paper.id,
                    to: paper.current.clone(),
                });
            }
        }

        let paper = state.add_paper(player.clone());
        log.push(Effect::PassPaper {
            paper,
            to: Some(player.clone()),
        });
        log
    }

    fn on_left(
        &self,
        registry: &PlayerRegistry,
        state: &mut RelayState,
        player: &PlayerId,
        _seat: usize,
    ) -> EffectLog {
        let mut log = EffectLog::new();

        if let Some(paper) = state.papers.iter().find(|p| &p.owner == player).map(|p| p.id) {
            state.papers.retain(|p| p.id != paper);
            log.push(Effect::DiscardPaper {
                paper,
                owner: player.clone(),
            });
        }
        state.target = self.target_for(registry.len());

        let target = state.target;
        for paper in state.papers.iter_mut() {
            let next = if paper.is_complete(target) {
                None
            } else if paper.current.as_ref() == Some(player) {
                registry.next_player(&paper.owner).cloned()
            } else {
                continue;
            };
            if paper.current != next {
                paper.current = next;
                log.push(Effect::PassPaper {
                    paper: paper.id,
                    to: paper.current.clone(),
                });
            }
        }
        log
    }

    fn outcome(&self, registry: &PlayerRegistry, state: &RelayState) -> Option<Outcome> {
        state.all_complete().then(|| {
            Outcome::uniform(
                registry.iter(),
                PlayerOutcome::Won,
                TerminationReason::PapersComplete,
            )
        })
    }

    fn legal_actions(
        &self,
        _registry: &PlayerRegistry,
        state: &RelayState,
        player: &PlayerId,
    ) -> Vec<RelayAction> {
        state
            .papers_for(player)
            .map(|paper_id| RelayAction::SubmitContribution {
                paper_id,
                content: String::new(),
            })
            .collect()
    }
}
