//! Property tests for turn order, dice conservation and rejection.

use parlor::core::{GameRng, LeaveOutcome, PlayerId, PlayerLimits, PlayerRegistry};
use parlor::effects::Effect;
use parlor::games::dice::{DiceAction, DiceGame};
use parlor::session::GameSession;
use parlor::turn::TurnCursor;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Step {
    Advance,
    Leave(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => Just(Step::Advance),
        1 => (0usize..8).prop_map(Step::Leave),
    ]
}

fn names(count: usize) -> Vec<PlayerId> {
    (0..count).map(|i| PlayerId::new(format!("p{i}"))).collect()
}

proptest! {
    /// The cursor always matches a model that re-reads the live seat count.
    #[test]
    fn cursor_tracks_live_registry(
        players in 2usize..8,
        start in 0usize..8,
        steps in prop::collection::vec(step(), 0..40),
    ) {
        let mut registry = PlayerRegistry::new(names(players), PlayerLimits::new(1, 8)).unwrap();
        let mut model: Vec<PlayerId> = names(players);
        let mut model_seat = start % players;
        let mut cursor = TurnCursor::starting_at(start);

        for step in steps {
            match step {
                Step::Advance => {
                    model_seat = (model_seat + 1) % model.len();
                    cursor.advance(&registry);
                }
                Step::Leave(seat) => {
                    if model.len() == 1 {
                        continue;
                    }
                    let seat = seat % model.len();
                    let leaving = model.remove(seat);
                    if seat < model_seat {
                        model_seat -= 1;
                    } else if seat == model_seat {
                        model_seat %= model.len();
                    }
                    let LeaveOutcome::Left { seat: removed } = registry.leave(&leaving) else {
                        panic!("seated player could not leave");
                    };
                    cursor.on_seat_removed(removed, registry.len());
                }
            }
            prop_assert_eq!(cursor.current(&registry), Some(&model[model_seat]));
        }
    }

    /// Transfers keep the total; each elimination lowers it by exactly one.
    #[test]
    fn dice_total_is_conserved(seed in any::<u64>(), players in 2usize..=5, choices in prop::collection::vec(any::<usize>(), 1..120)) {
        let mut game = GameSession::setup(DiceGame::default(), names(players), GameRng::new(seed)).unwrap();

        for choice in choices {
            if game.outcome().is_some() {
                break;
            }
            let snapshot = game.snapshot();
            let player = snapshot.game().current_player(snapshot.registry()).cloned().unwrap();
            let legal = game.legal_actions(&player);
            let action = legal[choice % legal.len()].clone();
            let before = game.snapshot().game().pool.total();

            let transition = game.apply(&player, action).unwrap();

            let pool = &game.snapshot().game().pool;
            let eliminated = transition
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::EliminateDie { .. }))
                .count() as u32;
            prop_assert_eq!(pool.total(), before - eliminated);
            prop_assert_eq!(pool.total(), pool.counts().values().sum::<u32>());
        }
    }

    /// A non-current player's action never changes the snapshot.
    #[test]
    fn off_turn_actions_change_nothing(seed in any::<u64>(), turns in 0usize..10, offset in 1usize..3) {
        let players = names(3);
        let mut game = GameSession::setup(DiceGame::default(), players.clone(), GameRng::new(seed)).unwrap();

        for _ in 0..turns {
            if game.outcome().is_some() {
                break;
            }
            let snapshot = game.snapshot();
            let player = snapshot.game().current_player(snapshot.registry()).cloned().unwrap();
            game.apply(&player, DiceAction::RollDice).unwrap();
            game.apply(&player, DiceAction::EndTurn).unwrap();
        }

        let snapshot = game.snapshot();
        let current = snapshot.game().current_player(snapshot.registry()).cloned().unwrap();
        let seat = snapshot.registry().seat_of(&current).unwrap();
        let intruder = snapshot.registry().at(seat + offset).cloned().unwrap();
        let before = snapshot.clone();

        for action in [DiceAction::RollDice, DiceAction::EndTurn, DiceAction::ResolveDie { index: 0 }] {
            prop_assert!(game.apply(&intruder, action).is_err());
            prop_assert_eq!(game.snapshot(), &before);
        }
    }
}
