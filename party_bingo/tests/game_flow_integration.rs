//! Integration tests for game flow scenarios.
//!
//! These drive the session end-to-end through the public API: joins,
//! name registration, the call stream, and claim arbitration.

use party_bingo::{
    ClaimOutcome, DisplayName, GameError, GamePhase, GameSession, GameSettings, PlayerId,
};

fn two_player_settings() -> GameSettings {
    GameSettings {
        min_players: 2,
        replenish_cards: true,
        autoplay: false,
    }
}

#[test]
fn test_two_players_join_and_start() {
    let mut session = GameSession::new(two_player_settings());

    let alice = PlayerId::new_v4();
    let bob = PlayerId::new_v4();

    let card_a = session.join(alice).unwrap();
    let card_b = session.join(bob).unwrap();
    assert_ne!(card_a, card_b);
    assert_eq!(session.phase(), GamePhase::Waiting);

    session.set_name(alice, DisplayName::new("alice")).unwrap();
    assert_eq!(session.phase(), GamePhase::Waiting);

    session.set_name(bob, DisplayName::new("bob")).unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);

    // The first call is a valid bingo number.
    let first = session.next_call().unwrap();
    assert!((1..=74).contains(&first.number));
}

#[test]
fn test_claim_while_waiting_is_a_noop() {
    let mut session = GameSession::new(two_player_settings());
    let alice = PlayerId::new_v4();
    session.join(alice).unwrap();

    assert_eq!(session.claim_bingo(alice), Ok(ClaimOutcome::Ignored));
    assert_eq!(session.phase(), GamePhase::Waiting);
    assert_eq!(session.winner(), None);
}

#[test]
fn test_late_join_is_allowed_while_playing_but_not_after() {
    let mut session = GameSession::new(two_player_settings());
    let alice = PlayerId::new_v4();
    let bob = PlayerId::new_v4();
    session.join(alice).unwrap();
    session.join(bob).unwrap();
    session.set_name(alice, DisplayName::new("alice")).unwrap();
    session.set_name(bob, DisplayName::new("bob")).unwrap();

    // Mid-game joins still receive a card.
    let carol = PlayerId::new_v4();
    assert!(session.join(carol).is_ok());

    // End the game, then joining fails.
    while session.next_call().is_some() {}
    session.claim_bingo(alice).unwrap();
    assert_eq!(
        session.join(PlayerId::new_v4()),
        Err(GameError::GameAlreadyOver)
    );
}

#[test]
fn test_first_valid_claim_freezes_the_game() {
    let mut session = GameSession::new(two_player_settings());
    let alice = PlayerId::new_v4();
    let bob = PlayerId::new_v4();
    session.join(alice).unwrap();
    session.join(bob).unwrap();
    session.set_name(alice, DisplayName::new("alice")).unwrap();
    session.set_name(bob, DisplayName::new("bob")).unwrap();

    // Exhaust the call sequence so every card supports a claim.
    let mut calls = 0;
    while session.next_call().is_some() {
        calls += 1;
    }
    assert_eq!(calls, 74);

    let outcome = session.claim_bingo(bob).unwrap();
    assert_eq!(
        outcome,
        ClaimOutcome::Won {
            winner_label: "bob".to_string()
        }
    );
    assert_eq!(session.phase(), GamePhase::Over);

    // A racing second claim changes nothing.
    assert_eq!(session.claim_bingo(alice), Ok(ClaimOutcome::Ignored));
    assert_eq!(session.winner(), Some(bob));

    // And the sequencer is dead.
    assert_eq!(session.next_call(), None);
}

#[test]
fn test_premature_claim_is_rejected_without_ending_the_game() {
    let mut session = GameSession::new(two_player_settings());
    let alice = PlayerId::new_v4();
    let bob = PlayerId::new_v4();
    session.join(alice).unwrap();
    session.join(bob).unwrap();
    session.set_name(alice, DisplayName::new("alice")).unwrap();
    session.set_name(bob, DisplayName::new("bob")).unwrap();

    // Two calls support at most two marks besides the free center; no
    // five-cell line can exist yet.
    session.next_call();
    session.next_call();
    assert_eq!(session.claim_bingo(alice), Err(GameError::ClaimRejected));
    assert_eq!(session.phase(), GamePhase::Playing);

    // The game carries on normally afterwards.
    assert!(session.next_call().is_some());
}

#[test]
fn test_claim_history_backs_every_honest_controller_line() {
    // A controller marking from its window can only use called numbers,
    // so replaying the full history over the claimant's card must accept
    // any line the controller completed.
    use party_bingo::{Controller, Message};

    let mut session = GameSession::new(two_player_settings());
    let alice = PlayerId::new_v4();
    let bob = PlayerId::new_v4();
    let card = session.join(alice).unwrap();
    session.join(bob).unwrap();
    session.set_name(alice, DisplayName::new("alice")).unwrap();
    session.set_name(bob, DisplayName::new("bob")).unwrap();

    let mut controller = Controller::new();
    controller.handle_message(&Message::CardAssignment {
        numbers: *card.numbers(),
    });
    controller.set_autoplay(true);

    // Mirror the host's call stream into the controller until its
    // optimistic check arms, then submit the claim.
    while !controller.claim_ready() {
        let call = session
            .next_call()
            .expect("sequence exhausted before the card completed a line");
        controller.handle_message(&Message::NumberCall {
            number: call.number,
        });
    }

    assert!(controller.claim().is_some());
    let outcome = session.claim_bingo(alice).unwrap();
    assert!(matches!(outcome, ClaimOutcome::Won { .. }));
}

#[test]
fn test_roster_capacity_without_replenishment() {
    let mut session = GameSession::new(GameSettings {
        min_players: 2,
        replenish_cards: false,
        autoplay: false,
    });

    for _ in 0..15 {
        session.join(PlayerId::new_v4()).unwrap();
    }
    assert_eq!(
        session.join(PlayerId::new_v4()),
        Err(GameError::CardPoolExhausted)
    );
    assert_eq!(session.roster_len(), 15);
}
