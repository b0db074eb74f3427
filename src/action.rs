use serde::{Deserialize, Serialize};

use crate::card::{Card, Shape};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to an agent during its turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the hand. A Whot card may carry its demanded shape so the
    /// play and the shape choice happen in one step.
    Play { card: Card, shape: Option<Shape> },
    /// Name the demanded shape after a Whot card was played.
    ChooseShape(Shape),
    /// Draw from the market (one card, or the pending penalty).
    Draw,
    /// Hand the turn over once the mandatory action is satisfied.
    EndTurn,
}

impl Action {
    /// Plain play of a card, without a shape.
    pub fn play(card: Card) -> Self {
        Action::Play { card, shape: None }
    }

    /// Returns the played card if the action is a play.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::Play { card, .. } => Some(*card),
            _ => None,
        }
    }
}

/// Seat of the human player.
pub const HUMAN: PlayerId = 0;
/// Seat of the computer opponent.
pub const COMPUTER: PlayerId = 1;
