use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, PICK_THREE, Shape};
use crate::rules::{Penalty, PlayContext, TurnPhase, playable_cards};
use crate::state::GameStateView;

/// Decision of the opponent policy for one step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Move {
    Play { card: Card, shape: Option<Shape> },
    Draw,
}

/// Scripted computer opponent.
///
/// In plain English:
/// - With nothing playable, draw.
/// - Under Hold On anything goes, so shed a non-Whot special card if there is one.
/// - Pick 2 cannot be answered; Pick 3 is answered with a 5 when possible.
/// - Otherwise get rid of specials first, then high cards (10 and up), then a random
///   card, keeping Whot cards for when nothing else fits.
/// - A Whot card demands the shape the hand holds most of.
pub fn choose_move<R: Rng + ?Sized>(hand: &[Card], ctx: &PlayContext, rng: &mut R) -> Move {
    let legal = playable_cards(hand, ctx);
    if legal.is_empty() {
        return Move::Draw;
    }

    let pick = if ctx.phase == TurnPhase::HoldOn {
        legal
            .iter()
            .find(|card| card.is_special() && !card.is_whot())
            .or_else(|| legal.first())
            .copied()
    } else {
        match ctx.pending_penalty {
            Some(Penalty::PickTwo) => None,
            Some(Penalty::PickThree) => legal.iter().find(|c| c.rank() == PICK_THREE).copied(),
            None => pick_by_priority(&legal, rng),
        }
    };
    let Some(card) = pick else {
        return Move::Draw;
    };

    let shape = card.is_whot().then(|| {
        let rest: Vec<Card> = hand.iter().copied().filter(|held| *held != card).collect();
        preferred_shape(&rest)
    });
    Move::Play { card, shape }
}

fn pick_by_priority<R: Rng + ?Sized>(legal: &[Card], rng: &mut R) -> Option<Card> {
    let shaped: Vec<Card> = legal.iter().copied().filter(|c| !c.is_whot()).collect();
    if let Some(special) = shaped.iter().find(|c| c.is_special()) {
        return Some(*special);
    }
    if let Some(high) = shaped.iter().find(|c| c.rank() >= 10) {
        return Some(*high);
    }
    shaped
        .choose(rng)
        .or_else(|| legal.choose(rng))
        .copied()
}

/// Shape held most often among the shaped cards of `hand`. Ties go to the shape
/// listed first in [`Shape::ALL`], as does a hand without shaped cards.
pub fn preferred_shape(hand: &[Card]) -> Shape {
    let mut best = Shape::ALL[0];
    let mut best_count = 0;
    for shape in Shape::ALL {
        let count = hand.iter().filter(|c| c.shape() == Some(shape)).count();
        if count > best_count {
            best = shape;
            best_count = count;
        }
    }
    best
}

/// Bot wrapper around [`choose_move`], used for the computer seat.
pub struct OpponentBot<R: Rng> {
    rng: R,
}

impl<R: Rng> OpponentBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for OpponentBot<R> {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "opponent bot requires at least one legal action"
        );
        let action = if state.phase == TurnPhase::AwaitingShape {
            Action::ChooseShape(preferred_shape(&state.hand))
        } else {
            match choose_move(&state.hand, &state.play_context(), &mut self.rng) {
                Move::Play { card, shape } => Action::Play { card, shape },
                Move::Draw => Action::Draw,
            }
        };
        if legal_actions.iter().any(|legal| same_choice(legal, &action)) {
            return action;
        }
        // Exhausted market: fall back to whatever the engine still allows.
        legal_actions
            .iter()
            .find(|a| matches!(a, Action::EndTurn))
            .copied()
            .unwrap_or(legal_actions[0])
    }
}

/// Legal plays are listed without a shape; a Whot play with a shape is the same choice.
fn same_choice(legal: &Action, chosen: &Action) -> bool {
    match (legal, chosen) {
        (Action::Play { card: a, .. }, Action::Play { card: b, .. }) => a == b,
        _ => legal == chosen,
    }
}
