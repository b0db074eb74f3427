mod common;

use common::{c, quiet_hand, start, stacked_deck};
use whot::card::{DECK_SIZE, full_deck};
use whot::{
    Action, COMPUTER, Card, GameBuilder, GameError, GameEvent, GameStatus, HUMAN, IllegalPlay,
    Penalty, Shape, TurnPhase,
};

fn opening_hand() -> Vec<Card> {
    vec![
        c(Shape::Circle, 3),
        c(Shape::Square, 7),
        c(Shape::Square, 12),
        c(Shape::Circle, 1),
        Card::Whot(1),
    ]
}

#[test]
fn fresh_game_deals_five_each_and_flips_one() -> Result<(), GameError> {
    let mut game = GameBuilder::new().with_seed(11).build()?;
    assert_eq!(game.status(), GameStatus::Waiting);
    assert_eq!(game.card_count(), DECK_SIZE);

    let snapshot = game.start_new_game();
    assert_eq!(snapshot.status, GameStatus::Playing);
    assert_eq!(snapshot.players[HUMAN].hand.len(), 5);
    assert_eq!(snapshot.players[COMPUTER].hand.len(), 5);
    assert!(snapshot.players[COMPUTER].is_computer);
    assert_eq!(snapshot.discard_pile_count, 1);
    assert_eq!(snapshot.draw_pile_count, 65 - 10 - 1);
    assert_eq!(snapshot.current_player, HUMAN);
    assert_eq!(snapshot.card_count(), DECK_SIZE);
    assert_eq!(snapshot.pending_penalty, None);
    assert_eq!(snapshot.shape_demand, None);
    Ok(())
}

#[test]
fn same_seed_deals_same_game() -> Result<(), GameError> {
    let a = GameBuilder::new().with_seed(99).start()?;
    let b = GameBuilder::new().with_seed(99).start()?;
    assert_eq!(a.snapshot(), b.snapshot());
    Ok(())
}

#[test]
fn reset_returns_every_card_to_the_market() -> Result<(), GameError> {
    let mut game = GameBuilder::new().with_seed(5).start()?;
    game.draw_card(HUMAN)?;
    let snapshot = game.reset_game();
    assert_eq!(snapshot.status, GameStatus::Waiting);
    assert_eq!(snapshot.draw_pile_count, DECK_SIZE);
    assert!(snapshot.players.iter().all(|p| p.hand.is_empty()));
    assert_eq!(game.draw_card(HUMAN), Err(GameError::GameNotActive));
    Ok(())
}

#[test]
fn builder_rejects_bad_configuration() {
    let mut short = full_deck();
    short.pop();
    assert!(matches!(
        GameBuilder::new().with_deck(short).build(),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameBuilder::new().with_hand_size(0).build(),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameBuilder::new().with_hand_size(33).build(),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameBuilder::new().with_starting_player(2).build(),
        Err(GameError::InvalidConfiguration(_))
    ));
}

#[test]
fn rank_match_is_legal_and_mismatch_is_rejected() -> Result<(), GameError> {
    let mut game = start(&opening_hand(), &quiet_hand(), c(Shape::Triangle, 7), &[]);
    let before = game.snapshot();

    let err = game.play_card(HUMAN, "square-12").unwrap_err();
    assert_eq!(
        err,
        GameError::IllegalPlay(IllegalPlay::Mismatch {
            shape: Some(Shape::Triangle),
            rank: 7
        })
    );
    assert!(err.to_string().contains("SHAPE (TRIANGLE)"));
    assert!(matches!(
        game.play_card(HUMAN, "square-9"),
        Err(GameError::UnknownCard(_))
    ));
    assert_eq!(game.snapshot(), before);

    let snapshot = game.play_card(HUMAN, "square-7")?;
    assert_eq!(snapshot.top_card, Some(c(Shape::Square, 7)));
    assert_eq!(snapshot.current_player, COMPUTER);
    assert_eq!(snapshot.players[HUMAN].hand.len(), 4);
    Ok(())
}

#[test]
fn commands_check_turn_and_hand() -> Result<(), GameError> {
    let mut game = start(&opening_hand(), &quiet_hand(), c(Shape::Circle, 7), &[]);
    assert_eq!(
        game.play_card(COMPUTER, "square-10"),
        Err(GameError::NotPlayersTurn)
    );
    assert_eq!(game.draw_card(COMPUTER), Err(GameError::NotPlayersTurn));
    assert_eq!(
        game.play_card(HUMAN, "circle-13"),
        Err(GameError::CardNotInHand(c(Shape::Circle, 13)))
    );
    assert_eq!(game.draw_card(7), Err(GameError::InvalidPlayer(7)));
    assert_eq!(game.card_count(), DECK_SIZE);
    Ok(())
}

#[test]
fn pick_two_cannot_be_defended_and_costs_two_cards() -> Result<(), GameError> {
    let p0 = vec![
        c(Shape::Circle, 2),
        c(Shape::Star, 3),
        c(Shape::Star, 4),
        c(Shape::Star, 7),
        c(Shape::Star, 10),
    ];
    let p1 = vec![
        c(Shape::Square, 2),
        Card::Whot(1),
        c(Shape::Circle, 5),
        c(Shape::Cross, 3),
        c(Shape::Cross, 4),
    ];
    let draws = [c(Shape::Triangle, 3), c(Shape::Triangle, 4)];
    let mut game = start(&p0, &p1, c(Shape::Circle, 11), &draws);

    let snapshot = game.play_card(HUMAN, "circle-2")?;
    assert_eq!(snapshot.pending_penalty, Some(Penalty::PickTwo));
    assert_eq!(snapshot.current_player, COMPUTER);

    for card_id in ["whot-1", "square-2", "circle-5"] {
        assert_eq!(
            game.play_card(COMPUTER, card_id),
            Err(GameError::IllegalPlay(IllegalPlay::PickTwoActive))
        );
    }
    assert_eq!(game.legal_actions(COMPUTER)?, vec![Action::Draw]);

    let snapshot = game.draw_card(COMPUTER)?;
    assert_eq!(snapshot.players[COMPUTER].hand.len(), 7);
    assert!(snapshot.players[COMPUTER].hand.ends_with(&draws));
    assert_eq!(snapshot.pending_penalty, None);
    assert_eq!(snapshot.current_player, HUMAN);
    Ok(())
}

#[test]
fn pick_three_defense_passes_the_same_three() -> Result<(), GameError> {
    let p0 = vec![
        c(Shape::Star, 5),
        c(Shape::Star, 3),
        c(Shape::Star, 4),
        c(Shape::Star, 7),
        c(Shape::Star, 10),
    ];
    let p1 = vec![
        c(Shape::Cross, 5),
        Card::Whot(1),
        c(Shape::Star, 11),
        c(Shape::Cross, 3),
        c(Shape::Cross, 4),
    ];
    let draws = [
        c(Shape::Triangle, 3),
        c(Shape::Triangle, 4),
        c(Shape::Triangle, 7),
    ];
    let mut game = start(&p0, &p1, c(Shape::Star, 12), &draws);

    game.play_card(HUMAN, "star-5")?;
    assert_eq!(
        game.play_card(COMPUTER, "star-11"),
        Err(GameError::IllegalPlay(IllegalPlay::PickThreeActive))
    );
    assert_eq!(
        game.play_card(COMPUTER, "whot-1"),
        Err(GameError::IllegalPlay(IllegalPlay::PickThreeActive))
    );
    let snapshot = game.play_card(COMPUTER, "cross-5")?;
    assert_eq!(snapshot.pending_penalty, Some(Penalty::PickThree));
    assert_eq!(snapshot.current_player, HUMAN);

    let snapshot = game.draw_card(HUMAN)?;
    assert_eq!(snapshot.players[HUMAN].hand.len(), 4 + 3);
    assert_eq!(snapshot.pending_penalty, None);
    assert_eq!(snapshot.current_player, COMPUTER);
    Ok(())
}

#[test]
fn hold_on_lets_the_same_player_play_anything() -> Result<(), GameError> {
    let mut game = start(&opening_hand(), &quiet_hand(), c(Shape::Circle, 7), &[]);
    let snapshot = game.play_card(HUMAN, "circle-1")?;
    assert_eq!(snapshot.phase, TurnPhase::HoldOn);
    assert_eq!(snapshot.current_player, HUMAN);

    // Square 12 matches neither circle nor 1.
    let snapshot = game.play_card(HUMAN, "square-12")?;
    assert_eq!(snapshot.phase, TurnPhase::Normal);
    assert_eq!(snapshot.current_player, COMPUTER);
    Ok(())
}

#[test]
fn drawing_releases_a_hold_on() -> Result<(), GameError> {
    let mut game = start(
        &opening_hand(),
        &quiet_hand(),
        c(Shape::Circle, 7),
        &[c(Shape::Cross, 11)],
    );
    game.play_card(HUMAN, "circle-1")?;
    let snapshot = game.draw_card(HUMAN)?;
    assert_eq!(snapshot.phase, TurnPhase::Normal);
    assert_eq!(snapshot.current_player, COMPUTER);
    assert!(snapshot.players[HUMAN].hand.contains(&c(Shape::Cross, 11)));
    Ok(())
}

#[test]
fn suspension_chains_under_normal_matching() -> Result<(), GameError> {
    let p0 = vec![
        c(Shape::Circle, 8),
        c(Shape::Square, 8),
        c(Shape::Square, 3),
        c(Shape::Cross, 11),
        c(Shape::Star, 4),
    ];
    let mut game = start(&p0, &quiet_hand(), c(Shape::Circle, 7), &[]);

    let snapshot = game.play_card(HUMAN, "circle-8")?;
    assert_eq!(snapshot.phase, TurnPhase::SuspensionChain);
    assert_eq!(snapshot.current_player, HUMAN);
    assert!(game.legal_actions(HUMAN)?.contains(&Action::EndTurn));

    assert!(matches!(
        game.play_card(HUMAN, "cross-11"),
        Err(GameError::IllegalPlay(IllegalPlay::Mismatch { .. }))
    ));
    let snapshot = game.play_card(HUMAN, "square-8")?;
    assert_eq!(snapshot.phase, TurnPhase::SuspensionChain);
    assert_eq!(snapshot.current_player, HUMAN);

    let snapshot = game.play_card(HUMAN, "square-3")?;
    assert_eq!(snapshot.phase, TurnPhase::Normal);
    assert_eq!(snapshot.current_player, COMPUTER);
    Ok(())
}

#[test]
fn end_turn_only_inside_a_suspension_chain() -> Result<(), GameError> {
    let p0 = vec![
        c(Shape::Circle, 8),
        c(Shape::Square, 3),
        c(Shape::Square, 13),
        c(Shape::Cross, 11),
        c(Shape::Star, 4),
    ];
    let mut game = start(&p0, &quiet_hand(), c(Shape::Circle, 7), &[]);
    assert_eq!(game.end_turn(), Err(GameError::TurnNotComplete));

    game.play_card(HUMAN, "circle-8")?;
    let snapshot = game.end_turn()?;
    assert_eq!(snapshot.current_player, COMPUTER);
    assert_eq!(snapshot.phase, TurnPhase::Normal);
    assert_eq!(game.end_turn(), Err(GameError::TurnNotComplete));
    Ok(())
}

#[test]
fn general_market_feeds_only_the_opponent() -> Result<(), GameError> {
    let p0 = vec![
        c(Shape::Circle, 14),
        c(Shape::Star, 3),
        c(Shape::Star, 4),
        c(Shape::Star, 7),
        c(Shape::Star, 10),
    ];
    let draws = [c(Shape::Triangle, 3)];
    let mut game = start(&p0, &quiet_hand(), c(Shape::Circle, 7), &draws);

    let snapshot = game.play_card(HUMAN, "circle-14")?;
    assert_eq!(snapshot.players[HUMAN].hand.len(), 4);
    assert_eq!(snapshot.players[COMPUTER].hand.len(), 6);
    assert!(snapshot.players[COMPUTER].hand.contains(&c(Shape::Triangle, 3)));
    assert_eq!(snapshot.current_player, COMPUTER);
    assert_eq!(snapshot.card_count(), DECK_SIZE);
    Ok(())
}

#[test]
fn whot_waits_for_a_shape_then_constrains_the_next_play() -> Result<(), GameError> {
    let p1 = vec![
        c(Shape::Circle, 10),
        c(Shape::Star, 11),
        c(Shape::Star, 3),
        c(Shape::Cross, 13),
        c(Shape::Square, 4),
    ];
    let mut game = start(&opening_hand(), &p1, c(Shape::Circle, 7), &[]);

    let snapshot = game.play_card(HUMAN, "whot-1")?;
    assert_eq!(snapshot.phase, TurnPhase::AwaitingShape);
    assert_eq!(snapshot.current_player, HUMAN);
    assert_eq!(game.draw_card(HUMAN), Err(GameError::ShapeChoicePending));
    assert_eq!(
        game.play_card(HUMAN, "circle-3"),
        Err(GameError::ShapeChoicePending)
    );
    assert_eq!(
        game.legal_actions(HUMAN)?,
        Shape::ALL.map(Action::ChooseShape).to_vec()
    );

    let snapshot = game.choose_wild_shape(Shape::Star)?;
    assert_eq!(snapshot.shape_demand, Some(Shape::Star));
    assert_eq!(snapshot.current_player, COMPUTER);
    assert_eq!(
        game.choose_wild_shape(Shape::Cross),
        Err(GameError::NoShapePending)
    );

    assert_eq!(
        game.play_card(COMPUTER, "circle-10"),
        Err(GameError::IllegalPlay(IllegalPlay::ShapeDemanded(
            Shape::Star
        )))
    );
    let snapshot = game.play_card(COMPUTER, "star-11")?;
    assert_eq!(snapshot.shape_demand, None);
    Ok(())
}

#[test]
fn whot_shape_can_ride_along_with_the_play() -> Result<(), GameError> {
    let mut game = start(&opening_hand(), &quiet_hand(), c(Shape::Circle, 7), &[]);
    game.apply_action(
        HUMAN,
        Action::Play {
            card: Card::Whot(1),
            shape: Some(Shape::Cross),
        },
    )?;
    assert_eq!(game.shape_demand(), Some(Shape::Cross));
    assert_eq!(game.current_player(), COMPUTER);
    Ok(())
}

#[test]
fn shape_on_a_plain_card_is_rejected() {
    let mut game = start(&opening_hand(), &quiet_hand(), c(Shape::Circle, 7), &[]);
    let result = game.apply_action(
        HUMAN,
        Action::Play {
            card: c(Shape::Circle, 3),
            shape: Some(Shape::Star),
        },
    );
    assert_eq!(result, Err(GameError::UnexpectedShape));
    assert_eq!(game.hand(HUMAN).map(<[Card]>::len), Ok(5));
}

#[test]
fn emptying_the_hand_wins_without_effects() -> Result<(), GameError> {
    let mut game = start(
        &[c(Shape::Circle, 14)],
        &[c(Shape::Square, 10)],
        c(Shape::Circle, 7),
        &[],
    );
    let snapshot = game.play_card(HUMAN, "circle-14")?;
    assert_eq!(snapshot.status, GameStatus::Finished { winner: HUMAN });
    assert_eq!(snapshot.winner(), Some(HUMAN));
    assert_eq!(snapshot.players[COMPUTER].hand.len(), 1);
    assert_eq!(game.draw_card(COMPUTER), Err(GameError::GameNotActive));
    assert_eq!(game.end_turn(), Err(GameError::GameNotActive));
    assert!(game.legal_actions(COMPUTER)?.is_empty());
    Ok(())
}

#[test]
fn empty_market_reshuffles_discards_but_keeps_the_top() -> Result<(), GameError> {
    let top = c(Shape::Circle, 7);
    let opener = c(Shape::Circle, 3);
    let (p0, p1) = dry_market(top, opener);
    let mut game = start(&p0, &p1, top, &[]);
    assert_eq!(game.draw_pile_count(), 0);

    assert!(!game.legal_actions(HUMAN)?.contains(&Action::Draw));
    assert_eq!(game.draw_card(HUMAN), Err(GameError::DeckExhausted));

    game.play_card(HUMAN, "circle-3")?;
    game.drain_events();
    let snapshot = game.draw_card(COMPUTER)?;
    assert!(snapshot.players[COMPUTER].hand.contains(&top));
    assert_eq!(snapshot.top_card, Some(opener));
    assert_eq!(snapshot.discard_pile_count, 1);
    assert_eq!(snapshot.card_count(), DECK_SIZE);
    assert!(
        game.drain_events()
            .contains(&GameEvent::Reshuffled { cards: 1 })
    );
    Ok(())
}

/// Deals 32 cards each so the market is empty right after the deal. The human
/// holds `opener` first.
fn dry_market(top: Card, opener: Card) -> (Vec<Card>, Vec<Card>) {
    let rest: Vec<Card> = full_deck()
        .into_iter()
        .filter(|card| *card != top && *card != opener)
        .collect();
    let mut p0 = vec![opener];
    p0.extend_from_slice(&rest[..31]);
    (p0, rest[31..].to_vec())
}

#[test]
fn penalty_draw_takes_what_the_market_can_give() -> Result<(), GameError> {
    let top = c(Shape::Circle, 7);
    let (p0, p1) = dry_market(top, c(Shape::Circle, 2));
    let mut game = start(&p0, &p1, top, &[]);

    game.play_card(HUMAN, "circle-2")?;
    assert_eq!(game.pending_penalty(), Some(Penalty::PickTwo));
    game.drain_events();

    let snapshot = game.draw_card(COMPUTER)?;
    assert_eq!(snapshot.players[COMPUTER].hand.len(), 33);
    assert!(snapshot.players[COMPUTER].hand.contains(&top));
    assert_eq!(snapshot.pending_penalty, None);
    assert_eq!(snapshot.current_player, HUMAN);
    assert_eq!(snapshot.draw_pile_count, 0);
    assert_eq!(snapshot.card_count(), DECK_SIZE);
    assert!(game.drain_events().contains(&GameEvent::CardsDrawn {
        player: COMPUTER,
        count: 1,
        penalty: Some(Penalty::PickTwo),
    }));
    assert_eq!(game.draw_card(HUMAN), Err(GameError::DeckExhausted));
    Ok(())
}

#[test]
fn general_market_on_an_empty_market_recycles_the_discard() -> Result<(), GameError> {
    let top = c(Shape::Circle, 7);
    let (p0, p1) = dry_market(top, c(Shape::Circle, 14));
    let mut game = start(&p0, &p1, top, &[]);
    game.drain_events();

    let snapshot = game.play_card(HUMAN, "circle-14")?;
    assert_eq!(snapshot.players[COMPUTER].hand.len(), 33);
    assert_eq!(snapshot.top_card, Some(c(Shape::Circle, 14)));
    assert_eq!(snapshot.discard_pile_count, 1);
    assert_eq!(snapshot.current_player, COMPUTER);
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::Reshuffled { cards: 1 }));
    assert!(events.contains(&GameEvent::GeneralMarket {
        player: HUMAN,
        handed_out: 1,
    }));
    Ok(())
}

#[test]
fn events_follow_each_transition() -> Result<(), GameError> {
    let p0 = vec![c(Shape::Circle, 3), c(Shape::Circle, 4)];
    let p1 = vec![c(Shape::Square, 10), c(Shape::Square, 11)];
    let deck = stacked_deck(&p0, &p1, c(Shape::Circle, 7), &[]);
    let mut game = GameBuilder::new()
        .with_hand_size(2)
        .with_deck(deck)
        .start()?;
    game.play_card(HUMAN, "circle-3")?;
    let events = game.drain_events();
    assert!(matches!(events[0], GameEvent::GameStarted { .. }));
    assert_eq!(
        events[1..],
        [
            GameEvent::CardPlayed {
                player: HUMAN,
                card: c(Shape::Circle, 3)
            },
            GameEvent::LastCard { player: HUMAN },
            GameEvent::TurnPassed { to: COMPUTER },
        ]
    );
    Ok(())
}
