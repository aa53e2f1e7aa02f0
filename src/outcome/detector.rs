//! Terminal detection run after every accepted mutation.

use crate::core::PlayerRegistry;
use crate::rules::Rules;

use super::{Outcome, PlayerOutcome, TerminationReason};

/// Forced ending when the registry has dropped below the game's minimum.
///
/// Every remaining player loses.
#[must_use]
pub fn underpopulation(registry: &PlayerRegistry) -> Option<Outcome> {
    registry.is_underpopulated().then(|| {
        Outcome::uniform(
            registry.iter(),
            PlayerOutcome::Lost,
            TerminationReason::Underpopulated,
        )
    })
}

/// Evaluate termination for a snapshot.
///
/// Under-population takes precedence over the game's own rules. Pure: the
/// same snapshot always yields the same answer.
pub fn detect<G: Rules>(rules: &G, registry: &PlayerRegistry, state: &G::State) -> Option<Outcome> {
    underpopulation(registry).or_else(|| rules.outcome(registry, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, PlayerLimits};

    #[test]
    fn test_underpopulation() {
        let mut registry = PlayerRegistry::new(
            ["a", "b", "c"].into_iter().map(PlayerId::new),
            PlayerLimits::new(3, 6),
        )
        .unwrap();
        assert_eq!(underpopulation(&registry), None);

        registry.leave(&PlayerId::new("b"));
        let outcome = underpopulation(&registry).unwrap();
        assert_eq!(outcome.reason, TerminationReason::Underpopulated);
        assert_eq!(outcome.players.len(), 2);
        assert_eq!(outcome.winners().count(), 0);
    }
}
