use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Shape};
use crate::rules::{Penalty, PlayContext, TurnPhase};

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Waiting,
    Playing,
    Finished { winner: PlayerId },
}

/// Full information about one seat. Both hands are visible because the caller
/// owns the whole match; renderers must still show the computer's hand face down.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub is_computer: bool,
    pub hand: Vec<Card>,
    pub is_current: bool,
}

/// Snapshot returned by every command.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchSnapshot {
    pub status: GameStatus,
    pub phase: TurnPhase,
    pub current_player: PlayerId,
    pub players: Vec<PlayerSnapshot>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub top_card: Option<Card>,
    pub pending_penalty: Option<Penalty>,
    pub shape_demand: Option<Shape>,
}

impl MatchSnapshot {
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Cards held by all players plus both piles.
    pub fn card_count(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum::<usize>()
            + self.draw_pile_count
            + self.discard_pile_count
    }
}

/// Public portion of a player's state that the opponent may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub is_computer: bool,
    pub hand_size: usize,
    pub is_current: bool,
}

/// Game state snapshot tailored for bots: own hand plus public information.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub status: GameStatus,
    pub phase: TurnPhase,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub top_card: Option<Card>,
    pub pending_penalty: Option<Penalty>,
    pub shape_demand: Option<Shape>,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl GameStateView {
    /// Oracle inputs as seen from this view.
    pub fn play_context(&self) -> PlayContext {
        PlayContext {
            top_card: self.top_card,
            pending_penalty: self.pending_penalty,
            shape_demand: self.shape_demand,
            phase: self.phase,
        }
    }
}
