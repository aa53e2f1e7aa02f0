//! Relay game scenarios driven through the session.

use parlor::core::{GameRng, InvalidAction, PlayerId, SetupError, SpectatorReason};
use parlor::effects::Effect;
use parlor::games::relay::{ContributionKind, RelayAction, RelayConfig, RelayGame};
use parlor::outcome::{PlayerOutcome, TerminationReason};
use parlor::session::GameSession;
use serde_json::json;

fn id(name: &str) -> PlayerId {
    PlayerId::new(name)
}

fn session(names: &[&str]) -> GameSession<RelayGame> {
    session_with(RelayGame::default(), names)
}

fn session_with(game: RelayGame, names: &[&str]) -> GameSession<RelayGame> {
    GameSession::setup(game, names.iter().map(|n| id(n)), GameRng::new(1)).unwrap()
}

fn submit(paper_id: usize, content: &str) -> RelayAction {
    RelayAction::SubmitContribution {
        paper_id,
        content: content.to_string(),
    }
}

/// Let whoever holds each open paper contribute once.
fn round(game: &mut GameSession<RelayGame>) {
    let papers: Vec<usize> = game.snapshot().game().papers.iter().map(|p| p.id).collect();
    for paper in papers {
        let holder = game.snapshot().game().paper(paper).and_then(|p| p.current.clone());
        if let Some(holder) = holder {
            game.apply(&holder, submit(paper, "x")).unwrap();
        }
    }
}

#[test]
fn test_player_limits() {
    let result = GameSession::setup(RelayGame::default(), [id("a"), id("b")], GameRng::new(1));
    assert!(matches!(
        result,
        Err(SetupError::PlayerCount { min: 3, max: 6, got: 2 })
    ));
}

#[test]
fn test_full_game_alternates_and_completes() {
    let mut game = session(&["a", "b", "c"]);
    assert_eq!(game.snapshot().game().target, 6);

    for _ in 0..5 {
        round(&mut game);
        assert!(game.outcome().is_none());
    }
    round(&mut game);

    let outcome = game.outcome().expect("all papers complete");
    assert_eq!(outcome.reason, TerminationReason::PapersComplete);
    for name in ["a", "b", "c"] {
        assert_eq!(outcome.result_for(&id(name)), Some(PlayerOutcome::Won));
    }

    for paper in game.snapshot().game().papers.iter() {
        assert_eq!(paper.contributions.len(), 6);
        assert_eq!(paper.current, None);
        for (position, contribution) in paper.contributions.iter().enumerate() {
            let expected = if position % 2 == 0 {
                ContributionKind::Caption
            } else {
                ContributionKind::Drawing
            };
            assert_eq!(contribution.kind, expected);
        }
    }
}

#[test]
fn test_paper_travels_around_table() {
    let mut game = session(&["a", "b", "c"]);

    game.apply_action("submitContribution", &json!({ "paperId": 0, "content": "a fox" }), &id("a"))
        .unwrap();
    assert_eq!(game.snapshot().game().papers[0].current, Some(id("b")));

    // a no longer holds paper 0
    assert_eq!(
        game.apply(&id("a"), submit(0, "again")),
        Err(InvalidAction::NotYourTurn { player: id("a") })
    );

    game.apply(&id("b"), submit(0, "<svg/>")).unwrap();
    let paper = &game.snapshot().game().papers[0];
    assert_eq!(paper.contributions[1].kind, ContributionKind::Drawing);
    assert_eq!(paper.contributions[1].author, id("b"));
    assert_eq!(paper.current, Some(id("c")));
}

#[test]
fn test_malformed_submissions() {
    let mut game = session(&["a", "b", "c"]);
    let before = game.snapshot().clone();

    assert!(matches!(
        game.apply_action("submitContribution", &json!({ "content": "x" }), &id("a")),
        Err(InvalidAction::MalformedPayload { .. })
    ));
    assert_eq!(
        game.apply_action("submitContribution", &json!({ "paperId": 7, "content": "x" }), &id("a")),
        Err(InvalidAction::OutOfRange { target: "paper", index: 7, len: 3 })
    );
    assert!(matches!(
        game.apply_action("rollDice", &json!(null), &id("a")),
        Err(InvalidAction::UnknownAction { .. })
    ));
    assert_eq!(game.snapshot(), &before);
}

#[test]
fn test_early_join_extends_game() {
    let mut game = session(&["a", "b", "c"]);
    round(&mut game);

    let transition = game.on_player_joined(id("d"));
    assert!(transition
        .effects
        .iter()
        .any(|e| *e == Effect::Seated { player: id("d") }));

    let state = game.snapshot().game();
    assert_eq!(state.target, 8);
    assert_eq!(state.papers.len(), 4);
    assert_eq!(state.papers[3].owner, id("d"));
    assert_eq!(state.papers[3].current, Some(id("d")));
}

#[test]
fn test_late_join_spectates() {
    let mut game = session(&["a", "b", "c"]);
    round(&mut game);
    round(&mut game);

    let transition = game.on_player_joined(id("d"));
    assert_eq!(
        transition.effects.as_slice(),
        &[Effect::Spectating {
            player: id("d"),
            reason: SpectatorReason::TooLate
        }]
    );
    assert_eq!(game.snapshot().registry().len(), 3);
}

#[test]
fn test_leave_shrinks_game() {
    let mut game = session(&["a", "b", "c", "d"]);
    round(&mut game);

    let transition = game.on_player_left(&id("c"));
    assert!(transition.game_over.is_none());
    assert!(transition
        .effects
        .iter()
        .any(|e| *e == Effect::DiscardPaper { paper: 2, owner: id("c") }));

    let state = game.snapshot().game();
    assert_eq!(state.target, 6);
    assert_eq!(state.papers.len(), 3);
    for paper in state.papers.iter() {
        assert_ne!(paper.current, Some(id("c")));
        assert!(paper.current.is_some());
    }

    // the departed identifier cannot rejoin
    let transition = game.on_player_joined(id("c"));
    assert_eq!(
        transition.effects.as_slice(),
        &[Effect::Spectating {
            player: id("c"),
            reason: SpectatorReason::Departed
        }]
    );
}

#[test]
fn test_leave_below_minimum_ends_game() {
    let mut game = session(&["a", "b", "c"]);
    let transition = game.on_player_left(&id("b"));

    let outcome = transition.game_over.expect("too few players");
    assert_eq!(outcome.reason, TerminationReason::Underpopulated);
    assert_eq!(outcome.result_for(&id("a")), Some(PlayerOutcome::Lost));
    assert_eq!(outcome.result_for(&id("c")), Some(PlayerOutcome::Lost));
    assert_eq!(outcome.result_for(&id("b")), None);

    assert_eq!(
        game.apply(&id("a"), submit(0, "x")),
        Err(InvalidAction::GameOver)
    );
}

#[test]
fn test_submission_follows_paper_after_departure() {
    let mut game = session(&["a", "b", "c", "d"]);
    game.apply(&id("c"), submit(2, "c's caption")).unwrap();
    game.on_player_left(&id("a"));

    game.apply_action(
        "submitContribution",
        &json!({ "paperId": 2, "content": "<svg>drawing for c</svg>" }),
        &id("d"),
    )
    .unwrap();

    let state = game.snapshot().game();
    let theirs = state.paper(2).unwrap();
    assert_eq!(theirs.owner, id("c"));
    assert_eq!(theirs.contributions.len(), 2);
    assert_eq!(theirs.contributions[1].kind, ContributionKind::Drawing);
    let own = state.paper(3).unwrap();
    assert_eq!(own.owner, id("d"));
    assert!(own.contributions.is_empty());

    // a's paper is gone for good
    assert_eq!(
        game.apply(&id("b"), submit(0, "x")),
        Err(InvalidAction::PaperDiscarded { paper: 0 })
    );
}

#[test]
fn test_leave_closes_papers_at_shrunk_target() {
    let mut game = session(&["a", "b", "c", "d"]);
    for _ in 0..6 {
        round(&mut game);
    }
    assert!(game.outcome().is_none());

    let transition = game.on_player_left(&id("d"));

    let state = game.snapshot().game();
    assert_eq!(state.target, 6);
    assert_eq!(state.papers.len(), 3);
    for paper in state.papers.iter() {
        assert_eq!(paper.contributions.len(), 6);
        assert_eq!(paper.current, None);
    }

    let outcome = transition.game_over.expect("remaining papers are complete");
    assert_eq!(outcome.reason, TerminationReason::PapersComplete);
    for name in ["a", "b", "c"] {
        assert_eq!(outcome.result_for(&id(name)), Some(PlayerOutcome::Won));
    }
    assert_eq!(outcome.result_for(&id("d")), None);
}

#[test]
fn test_join_reopens_completed_paper() {
    let short = RelayConfig::new().contributions_per_player(1).build();
    let mut game = session_with(short, &["a", "b", "c"]);
    for author in ["a", "b", "c"] {
        game.apply(&id(author), submit(0, "x")).unwrap();
    }
    assert_eq!(game.snapshot().game().paper(0).unwrap().current, None);
    assert_eq!(
        game.apply(&id("a"), submit(0, "x")),
        Err(InvalidAction::PaperComplete { paper: 0 })
    );

    let transition = game.on_player_joined(id("d"));
    assert!(transition
        .effects
        .iter()
        .any(|e| *e == Effect::PassPaper { paper: 0, to: Some(id("d")) }));
    assert_eq!(game.snapshot().game().target, 4);

    game.apply(&id("d"), submit(0, "<svg/>")).unwrap();
    let paper = game.snapshot().game().paper(0).unwrap();
    assert_eq!(paper.contributions[3].kind, ContributionKind::Drawing);
    assert_eq!(paper.current, None);
    assert!(game.outcome().is_none());
}
