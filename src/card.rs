use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseCardError;

/// One of the five Whot shapes. Also used as the shape demanded after a Whot card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Triangle,
    Square,
    Star,
    Cross,
}

impl Shape {
    /// Fixed enumeration order, also used for tie breaking.
    pub const ALL: [Shape; 5] = [
        Shape::Circle,
        Shape::Triangle,
        Shape::Square,
        Shape::Star,
        Shape::Cross,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Triangle => "triangle",
            Shape::Square => "square",
            Shape::Star => "star",
            Shape::Cross => "cross",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCardError::UnknownShape(s.to_string()))
    }
}

/// Representation of a Whot card.
///
/// Cards are immutable; the engine only ever moves them between hands and piles.
/// Every card in the catalog is unique, so a card value doubles as its identity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Shaped card with one of the catalog ranks.
    Number { shape: Shape, rank: u8 },
    /// Wild card, numbered 1..=WHOT_COUNT to keep the five copies distinct.
    Whot(u8),
}

pub const RANKS: [u8; 12] = [1, 2, 3, 4, 5, 7, 8, 10, 11, 12, 13, 14];
pub const SPECIAL_RANKS: [u8; 5] = [HOLD_ON, PICK_TWO, PICK_THREE, SUSPENSION, GENERAL_MARKET];
pub const HOLD_ON: u8 = 1;
pub const PICK_TWO: u8 = 2;
pub const PICK_THREE: u8 = 5;
pub const SUSPENSION: u8 = 8;
pub const GENERAL_MARKET: u8 = 14;
/// Sentinel rank carried by Whot cards.
pub const WHOT_RANK: u8 = 20;
pub const WHOT_COUNT: u8 = 5;
pub const DECK_SIZE: usize = Shape::ALL.len() * RANKS.len() + WHOT_COUNT as usize;
pub const HAND_SIZE: usize = 5;
pub const PLAYER_COUNT: usize = 2;

impl Card {
    /// Builds a shaped card, rejecting ranks that are not part of the catalog.
    pub fn number(shape: Shape, rank: u8) -> Option<Self> {
        RANKS
            .contains(&rank)
            .then_some(Card::Number { shape, rank })
    }

    #[inline]
    pub fn is_whot(&self) -> bool {
        matches!(self, Card::Whot(_))
    }

    /// Shape of the card, `None` for Whot cards.
    #[inline]
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Card::Number { shape, .. } => Some(*shape),
            Card::Whot(_) => None,
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        match self {
            Card::Number { rank, .. } => *rank,
            Card::Whot(_) => WHOT_RANK,
        }
    }

    /// True for ranks with an effect and for every Whot card.
    #[inline]
    pub fn is_special(&self) -> bool {
        match self {
            Card::Number { rank, .. } => SPECIAL_RANKS.contains(rank),
            Card::Whot(_) => true,
        }
    }

    /// Stable string id, e.g. `circle-7` or `whot-3`.
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Short label used by the terminal renderer.
    pub fn label(&self) -> String {
        match self {
            Card::Number { shape, rank } => format!("{rank} {shape}"),
            Card::Whot(_) => String::from("WHOT"),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number { shape, rank } => write!(f, "{shape}-{rank}"),
            Card::Whot(n) => write!(f, "whot-{n}"),
        }
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, tail) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ParseCardError::Malformed(s.to_string()))?;
        let number: u8 = tail
            .parse()
            .map_err(|_| ParseCardError::Malformed(s.to_string()))?;
        if head.eq_ignore_ascii_case("whot") {
            return if (1..=WHOT_COUNT).contains(&number) {
                Ok(Card::Whot(number))
            } else {
                Err(ParseCardError::NotInDeck(s.to_string()))
            };
        }
        let shape: Shape = head.parse()?;
        Card::number(shape, number).ok_or_else(|| ParseCardError::NotInDeck(s.to_string()))
    }
}

/// Builds the full 65-card deck in catalog order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for shape in Shape::ALL {
        for rank in RANKS {
            deck.push(Card::Number { shape, rank });
        }
    }
    deck.extend((1..=WHOT_COUNT).map(Card::Whot));
    deck
}
