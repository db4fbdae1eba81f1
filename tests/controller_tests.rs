//! Game controller integration tests.
//!
//! Time is driven by a `ManualClock`, so every delay in these tests is exact.

use std::time::Duration;

use memory_match::cards::{Deck, Position, SymbolId};
use memory_match::core::{GameError, ManualClock, MatchConfig, Rejection};
use memory_match::engine::{
    Epoch, FlipOutcome, GameController, GameEvent, Phase, RevertStatus,
};

fn p(i: usize) -> Position {
    Position::new(i)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn deck(ids: &[u16]) -> Deck {
    Deck::from_identities(ids.iter().copied().map(SymbolId::new)).unwrap()
}

fn setup() -> (GameController<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let game = GameController::with_clock(MatchConfig::default().with_seed(42), clock.clone());
    (game, clock)
}

fn rejected(result: memory_match::Result<FlipOutcome>) -> Rejection {
    result
        .unwrap_err()
        .rejection()
        .expect("expected a rejected action")
}

/// Match every pair on the board, in board order.
fn solve(game: &mut GameController<ManualClock>) {
    let ids: Vec<SymbolId> = game.state().unwrap().deck().identities().collect();
    let mut done = vec![false; ids.len()];
    for i in 0..ids.len() {
        if done[i] {
            continue;
        }
        let j = (i + 1..ids.len()).find(|&j| ids[j] == ids[i]).unwrap();
        game.flip(p(i)).unwrap();
        game.flip(p(j)).unwrap();
        done[i] = true;
        done[j] = true;
    }
}

// =============================================================================
// Walkthrough
// =============================================================================

/// Four pairs: match (0,1), miss on (2,3), flip(4) refused while they show.
#[test]
fn test_four_pair_walkthrough() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 0, 1, 2, 3, 1, 2, 3])).unwrap();

    let snap = game.snapshot();
    assert_eq!(snap.cards.len(), 8);
    assert!(snap.cards.iter().all(|c| c.identity.is_none()));
    assert_eq!(game.state().unwrap().deck().identity_counts().len(), 4);
    assert_eq!(snap.total_pairs, 4);

    // Match
    game.flip(p(0)).unwrap();
    let outcome = game.flip(p(1)).unwrap();
    assert!(matches!(outcome, FlipOutcome::Matched { matched_pairs: 1, .. }));
    let state = game.state().unwrap();
    assert!(state.deck().get(p(0)).unwrap().matched);
    assert!(state.deck().get(p(1)).unwrap().matched);
    assert_eq!(state.matched_pairs(), 1);

    // Mismatch
    game.flip(p(2)).unwrap();
    let outcome = game.flip(p(3)).unwrap();
    assert_eq!(outcome, FlipOutcome::Mismatched { first: p(2), second: p(3) });
    assert_eq!(game.phase(), Phase::ResolvingMismatch);
    assert!(!game.accepts_input());

    // During the delay
    clock.advance(ms(500));
    game.tick();
    assert_eq!(rejected(game.flip(p(4))), Rejection::ResolvingMismatch);
    assert!(!game.state().unwrap().deck().get(p(4)).unwrap().face_up);
    let state = game.state().unwrap();
    assert!(state.deck().get(p(2)).unwrap().face_up);
    assert!(state.deck().get(p(3)).unwrap().face_up);

    // After the delay
    clock.advance(ms(500));
    game.tick();
    let state = game.state().unwrap();
    assert_eq!(game.phase(), Phase::Active);
    assert!(!state.deck().get(p(2)).unwrap().face_up);
    assert!(!state.deck().get(p(3)).unwrap().face_up);
    assert_eq!(state.matched_pairs(), 1);

    // Input accepted again
    assert!(game.flip(p(4)).is_ok());
}

// =============================================================================
// Flip Rules
// =============================================================================

#[test]
fn test_matched_cards_stay_matched() {
    let (mut game, _) = setup();
    game.start_with_deck("Ada", deck(&[0, 0, 1, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();

    for _ in 0..3 {
        assert_eq!(rejected(game.flip(p(0))), Rejection::AlreadyMatched(p(0)));
    }
    let state = game.state().unwrap();
    assert_eq!(state.matched_pairs(), 1);
    assert!(state.deck().get(p(0)).unwrap().face_up);
}

#[test]
fn test_same_card_twice_in_a_turn() {
    let (mut game, _) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();

    let before = game.snapshot();
    assert_eq!(rejected(game.flip(p(0))), Rejection::SamePosition(p(0)));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_out_of_bounds() {
    let (mut game, _) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    assert_eq!(
        rejected(game.flip(p(4))),
        Rejection::OutOfBounds { position: p(4), len: 4 }
    );
}

// =============================================================================
// End of Game
// =============================================================================

#[test]
fn test_game_ends_exactly_once() {
    let (mut game, clock) = setup();
    game.start_game("Grace", 6).unwrap();
    game.drain_events();

    clock.advance(ms(83_000));
    solve(&mut game);

    assert_eq!(game.phase(), Phase::Ended);
    let summary = game.summary().unwrap();
    assert_eq!(summary.player_name, "Grace");
    assert_eq!(summary.pairs, 6);
    assert_eq!(summary.elapsed, ms(83_000));
    assert_eq!(
        summary.to_string(),
        "Congratulations, Grace!\nYou finished the game in 01:23"
    );

    let ended = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameEnded(_)))
        .count();
    assert_eq!(ended, 1);

    // No more flips, pauses, or clock movement.
    for i in 0..12 {
        assert_eq!(rejected(game.flip(p(i))), Rejection::Ended);
    }
    assert_eq!(game.pause(), Err(GameError::Rejected(Rejection::Ended)));
    clock.advance(ms(10_000));
    assert_eq!(game.elapsed(), ms(83_000));
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_win_uses_normalized_pair_count() {
    let (mut game, _) = setup();
    game.start_game("Ada", 5).unwrap();

    assert_eq!(game.state().unwrap().total_pairs(), 4);
    solve(&mut game);

    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.summary().unwrap().pairs, 4);
}

// =============================================================================
// Pause / Resume
// =============================================================================

#[test]
fn test_pause_freezes_clock() {
    let (mut game, clock) = setup();
    game.start_game("Ada", 4).unwrap();

    clock.advance(ms(1_234));
    game.pause().unwrap();
    let at_pause = game.elapsed();
    assert_eq!(at_pause, ms(1_234));

    clock.advance(ms(60_000));
    assert_eq!(game.elapsed(), at_pause);

    game.resume().unwrap();
    assert_eq!(game.elapsed() - at_pause, Duration::ZERO);

    clock.advance(ms(766));
    assert_eq!(game.elapsed(), ms(2_000));
}

#[test]
fn test_paused_game_rejects_flips() {
    let (mut game, _) = setup();
    game.start_game("Ada", 4).unwrap();
    game.pause().unwrap();

    let before = game.snapshot();
    assert_eq!(rejected(game.flip(p(0))), Rejection::Paused);
    assert_eq!(game.snapshot(), before);

    assert_eq!(game.pause(), Err(GameError::Rejected(Rejection::Paused)));
    game.resume().unwrap();
    assert_eq!(game.resume(), Err(GameError::Rejected(Rejection::NotPaused)));
    assert!(game.flip(p(0)).is_ok());
}

#[test]
fn test_pause_mid_mismatch_freezes_revert() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();
    let ticket = game.pending_revert().unwrap();

    clock.advance(ms(250));
    game.pause().unwrap();
    clock.advance(ms(5_000));

    // A host timer firing during the pause is deferred, not applied.
    assert_eq!(
        game.complete_revert(ticket),
        RevertStatus::Pending { remaining: ms(750) }
    );
    assert_eq!(game.phase(), Phase::Paused);

    game.resume().unwrap();
    assert_eq!(game.phase(), Phase::ResolvingMismatch);
    assert_eq!(rejected(game.flip(p(2))), Rejection::ResolvingMismatch);

    clock.advance(ms(750));
    assert_eq!(game.complete_revert(ticket), RevertStatus::Applied);
    assert_eq!(game.phase(), Phase::Active);
}

// =============================================================================
// Reset and Epochs
// =============================================================================

#[test]
fn test_reset_returns_to_not_started() {
    let (mut game, clock) = setup();
    game.start_game("Ada", 4).unwrap();
    clock.advance(ms(3_000));

    game.reset();

    assert_eq!(game.phase(), Phase::NotStarted);
    assert!(game.state().is_none());
    assert_eq!(game.elapsed(), Duration::ZERO);
    assert_eq!(rejected(game.flip(p(0))), Rejection::NotStarted);
}

#[test]
fn test_reset_then_start_is_independent() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 0, 1, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();
    clock.advance(ms(4_000));

    game.reset();
    game.start_with_deck("Bo", deck(&[0, 0, 1, 1])).unwrap();

    let state = game.state().unwrap();
    assert_eq!(state.matched_pairs(), 0);
    assert_eq!(state.player_name(), "Bo");
    assert!(state.deck().iter().all(|c| !c.matched && !c.face_up));
    assert_eq!(game.elapsed(), Duration::ZERO);
    assert!(game.summary().is_none());
}

#[test]
fn test_stale_revert_after_reset_is_noop() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();
    let old_ticket = game.pending_revert().unwrap();
    assert_eq!(old_ticket.epoch, Epoch(1));

    game.reset();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();
    let before = game.snapshot();

    clock.advance(ms(2_000));
    assert_eq!(game.complete_revert(old_ticket), RevertStatus::Stale);
    assert_eq!(game.snapshot(), before);
    assert!(game.state().unwrap().deck().get(p(0)).unwrap().face_up);
}

#[test]
fn test_start_game_replaces_pending_revert() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();

    game.start_game("Ada", 2).unwrap();
    assert!(game.pending_revert().is_none());
    assert_eq!(game.phase(), Phase::Active);

    clock.advance(ms(2_000));
    game.tick();
    assert_eq!(game.phase(), Phase::Active);
}

#[test]
fn test_completed_ticket_is_stale() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();
    let ticket = game.pending_revert().unwrap();

    assert_eq!(
        game.complete_revert(ticket),
        RevertStatus::Pending { remaining: ms(1_000) }
    );

    clock.advance(ms(1_000));
    assert_eq!(game.complete_revert(ticket), RevertStatus::Applied);
    assert_eq!(game.complete_revert(ticket), RevertStatus::Stale);
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn test_invalid_pair_counts_prevent_start() {
    let (mut game, _) = setup();

    for n in [0, -3, 1] {
        let err = game.start_game("Ada", n).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfiguration { .. }), "n = {n}");
        assert_eq!(game.phase(), Phase::NotStarted);
    }
}

#[test]
fn test_start_with_unpaired_deck_fails() {
    let (mut game, _) = setup();
    let bad: Deck = serde_json::from_str(
        r#"{"cards":[{"identity":0,"face_up":false,"matched":false}]}"#,
    )
    .unwrap();

    assert!(game.start_with_deck("Ada", bad).is_err());
    assert_eq!(game.phase(), Phase::NotStarted);
}

#[test]
fn test_start_with_deck_requires_dealable_pair_count() {
    let (mut game, _) = setup();
    let pairs_of = |n: u16| deck(&(0..n).flat_map(|i| [i, i]).collect::<Vec<_>>());

    for pairs in [1, 3, 31] {
        let err = game.start_with_deck("Ada", pairs_of(pairs)).unwrap_err();
        assert!(
            matches!(err, GameError::InvalidConfiguration { .. }),
            "{pairs} pairs: {err:?}"
        );
        assert_eq!(game.phase(), Phase::NotStarted);
        assert!(game.state().is_none());
    }

    // A refused deck leaves the running game alone.
    game.start_with_deck("Ada", pairs_of(2)).unwrap();
    assert!(game.start_with_deck("Bo", pairs_of(3)).is_err());
    assert_eq!(game.state().unwrap().player_name(), "Ada");

    game.start_with_deck("Ada", pairs_of(30)).unwrap();
    assert_eq!(game.state().unwrap().total_pairs(), 30);
}

#[test]
fn test_custom_mismatch_delay() {
    let clock = ManualClock::new();
    let config = MatchConfig::default().with_seed(1).with_mismatch_delay(ms(200));
    let mut game = GameController::with_clock(config, clock.clone());
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();

    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();
    assert_eq!(game.pending_revert().unwrap().delay, ms(200));

    clock.advance(ms(200));
    game.tick();
    assert_eq!(game.phase(), Phase::Active);
}

// =============================================================================
// Events and Snapshots
// =============================================================================

#[test]
fn test_event_stream_for_a_missed_turn() {
    let (mut game, clock) = setup();
    game.start_with_deck("Ada", deck(&[0, 1, 0, 1])).unwrap();
    game.flip(p(0)).unwrap();
    game.flip(p(1)).unwrap();
    let ticket = game.pending_revert().unwrap();
    clock.advance(ms(1_000));
    game.complete_revert(ticket);

    let events = game.drain_events();
    assert_eq!(
        events,
        vec![
            GameEvent::GameStarted {
                epoch: Epoch(1),
                player_name: "Ada".to_string(),
                pairs: 2,
                cards: 4,
            },
            GameEvent::CardRevealed { position: p(0), identity: SymbolId::new(0) },
            GameEvent::CardRevealed { position: p(1), identity: SymbolId::new(1) },
            GameEvent::MismatchScheduled { first: p(0), second: p(1), ticket },
            GameEvent::CardsReverted { first: p(0), second: p(1) },
        ]
    );
    assert!(game.drain_events().is_empty());
}

#[test]
fn test_snapshot_diff_tracks_flips() {
    let (mut game, _) = setup();
    game.start_with_deck("Ada", deck(&[0, 0, 1, 1])).unwrap();
    let before = game.snapshot();

    game.flip(p(2)).unwrap();
    let after = game.snapshot();

    assert_eq!(after.changed_positions(&before), vec![p(2)]);
    assert_eq!(after.visible_identity(p(2)), Some(SymbolId::new(1)));
    assert_eq!(after.visible_identity(p(3)), None);
    assert_eq!(after.turn, vec![p(2)]);
}

#[test]
fn test_snapshot_serializes() {
    let (mut game, _) = setup();
    game.start_game("Ada", 4).unwrap();
    game.flip(p(0)).unwrap();

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    let restored: memory_match::engine::GameSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(snap, restored);
}

#[test]
fn test_asset_paths() {
    let (game, _) = setup();
    assert_eq!(
        game.asset_path(SymbolId::new(5)),
        "resources/gameCards/img5.jpeg"
    );
}
