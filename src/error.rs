use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{Card, Shape};

/// Errors that can occur when manipulating the game state.
///
/// Every variant is a recoverable rejection: the command that produced it left
/// the match untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not your turn")]
    NotPlayersTurn,
    #[error("card {0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("unknown card: {0}")]
    UnknownCard(#[from] ParseCardError),
    #[error("{0}")]
    IllegalPlay(#[from] IllegalPlay),
    #[error("no cards left in the deck")]
    DeckExhausted,
    #[error("game is not in progress")]
    GameNotActive,
    #[error("choose a shape for the Whot card first")]
    ShapeChoicePending,
    #[error("there is no Whot card waiting for a shape")]
    NoShapePending,
    #[error("a shape can only be chosen when playing a Whot card")]
    UnexpectedShape,
    #[error("play or draw before ending the turn")]
    TurnNotComplete,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Reasons a card cannot be played on the current discard pile.
///
/// The display text is meant to be shown to the player as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IllegalPlay {
    #[error("Pick 2 is active, you must draw 2 cards")]
    PickTwoActive,
    #[error("Pick 3 is active, play another Pick 3 or draw 3 cards")]
    PickThreeActive,
    #[error("You must play a {} card or a Whot card", .0.name().to_uppercase())]
    ShapeDemanded(Shape),
    #[error(
        "Card must match either the SHAPE ({}) or NUMBER ({rank})",
        .shape.map_or("WHOT", |s| s.name()).to_uppercase()
    )]
    Mismatch { shape: Option<Shape>, rank: u8 },
}

/// Failures while reading a card or shape id.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("malformed card id '{0}'")]
    Malformed(String),
    #[error("unknown shape '{0}'")]
    UnknownShape(String),
    #[error("card '{0}' is not part of the Whot deck")]
    NotInDeck(String),
}

/// Failures reported by a ledger sink. These never affect the local match.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("ledger encoding failed: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("ledger decoding failed: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("ledger frame truncated at byte {0}")]
    Truncated(usize),
    #[error("ledger rejected the move: {0}")]
    Rejected(String),
}
