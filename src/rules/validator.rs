//! Checks shared by every game, run before `Rules::validate`.

use crate::core::{InvalidAction, PlayerId, PlayerRegistry, SharedState};
use crate::outcome::GameStatus;

use super::Rules;

/// Reject actions after the game ended or from players who are not seated.
pub fn check_actor(
    status: &GameStatus,
    registry: &PlayerRegistry,
    player: &PlayerId,
) -> Result<(), InvalidAction> {
    if status.is_terminal() {
        return Err(InvalidAction::GameOver);
    }
    if !registry.contains(player) {
        return Err(InvalidAction::NotSeated {
            player: player.clone(),
        });
    }
    Ok(())
}

/// Reject an index outside `0..len`.
pub fn check_index(target: &'static str, index: usize, len: usize) -> Result<(), InvalidAction> {
    if index < len {
        Ok(())
    } else {
        Err(InvalidAction::OutOfRange { target, index, len })
    }
}

/// Full validation of an action against a snapshot.
///
/// Read-only: validating the same action against the same snapshot always
/// gives the same answer.
pub fn validate<G: Rules>(
    rules: &G,
    snapshot: &SharedState<G::State, G::Action>,
    player: &PlayerId,
    action: &G::Action,
) -> Result<(), InvalidAction> {
    check_actor(snapshot.status(), snapshot.registry(), player)?;
    rules.validate(snapshot.registry(), snapshot.game(), player, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerLimits;
    use crate::outcome::{Outcome, PlayerOutcome, TerminationReason};

    fn registry() -> PlayerRegistry {
        PlayerRegistry::new(["a", "b"].into_iter().map(PlayerId::new), PlayerLimits::new(2, 2))
            .unwrap()
    }

    #[test]
    fn test_check_actor() {
        let reg = registry();
        assert_eq!(check_actor(&GameStatus::InProgress, &reg, &PlayerId::new("a")), Ok(()));
        assert_eq!(
            check_actor(&GameStatus::InProgress, &reg, &PlayerId::new("x")),
            Err(InvalidAction::NotSeated { player: PlayerId::new("x") })
        );
    }

    #[test]
    fn test_check_actor_after_game_over() {
        let reg = registry();
        let status = GameStatus::Terminal(Outcome::uniform(
            reg.iter(),
            PlayerOutcome::Lost,
            TerminationReason::BoardFull,
        ));
        assert_eq!(
            check_actor(&status, &reg, &PlayerId::new("a")),
            Err(InvalidAction::GameOver)
        );
    }

    #[test]
    fn test_check_index() {
        assert_eq!(check_index("cell", 8, 9), Ok(()));
        assert_eq!(
            check_index("cell", 9, 9),
            Err(InvalidAction::OutOfRange { target: "cell", index: 9, len: 9 })
        );
    }
}
