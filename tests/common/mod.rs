#![allow(dead_code)]

use whot::card::full_deck;
use whot::{Card, Game, GameBuilder, Shape};

pub fn c(shape: Shape, rank: u8) -> Card {
    Card::Number { shape, rank }
}

/// Deck that deals `p0` to player 0 and `p1` to player 1 (in order), flips `top`,
/// then serves `draws` in order. Every other card sits underneath in catalog order.
pub fn stacked_deck(p0: &[Card], p1: &[Card], top: Card, draws: &[Card]) -> Vec<Card> {
    let mut used: Vec<Card> = p0.iter().chain(p1).chain(draws).copied().collect();
    used.push(top);
    let mut deck: Vec<Card> = full_deck()
        .into_iter()
        .filter(|card| !used.contains(card))
        .collect();
    deck.extend(draws.iter().rev());
    deck.push(top);
    deck.extend(p1.iter().rev());
    deck.extend(p0.iter().rev());
    deck
}

pub fn start(p0: &[Card], p1: &[Card], top: Card, draws: &[Card]) -> Game {
    assert_eq!(p0.len(), p1.len(), "hands must have the same size");
    GameBuilder::new()
        .with_hand_size(p0.len())
        .with_deck(stacked_deck(p0, p1, top, draws))
        .start()
        .expect("stacked deck is a valid Whot deck")
}

/// Computer hand without any card that matches circles or low ranks.
pub fn quiet_hand() -> Vec<Card> {
    vec![
        c(Shape::Square, 10),
        c(Shape::Triangle, 11),
        c(Shape::Star, 12),
        c(Shape::Cross, 13),
        c(Shape::Square, 4),
    ]
}
