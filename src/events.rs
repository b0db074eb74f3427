use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Shape};
use crate::rules::Penalty;

/// Structured record of a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted {
        starting_player: PlayerId,
        top_card: Option<Card>,
        draw_pile: usize,
    },
    GameReset,
    CardPlayed {
        player: PlayerId,
        card: Card,
    },
    ShapeChosen {
        player: PlayerId,
        shape: Shape,
    },
    CardsDrawn {
        player: PlayerId,
        count: usize,
        penalty: Option<Penalty>,
    },
    PenaltyPassed {
        to: PlayerId,
        penalty: Penalty,
    },
    HoldOn {
        player: PlayerId,
    },
    Suspension {
        player: PlayerId,
    },
    GeneralMarket {
        player: PlayerId,
        handed_out: usize,
    },
    Reshuffled {
        cards: usize,
    },
    TurnPassed {
        to: PlayerId,
    },
    LastCard {
        player: PlayerId,
    },
    GameWon {
        winner: PlayerId,
    },
    LedgerSyncFailed {
        reason: String,
    },
}

#[derive(Debug, Default, Clone)]
pub struct EventLog {
    queue: Vec<GameEvent>,
}

impl EventLog {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.queue.drain(..)
    }
}
