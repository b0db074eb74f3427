//! Whot rules engine: deck, play legality, turn and effect resolution, and a
//! scripted computer opponent.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod events;
pub mod game;
pub mod ledger;
pub mod rules;
pub mod session;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, COMPUTER, HUMAN, PlayerId};
pub use crate::bot::{Bot, HumanBot, OpponentBot, RandomBot};
pub use crate::bots::{Move, choose_move, create_bot_from_spec, label_for_spec, preferred_shape};
pub use crate::card::{Card, Shape};
pub use crate::error::{GameError, IllegalPlay, LedgerError, ParseCardError};
pub use crate::events::{EventLog, GameEvent};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::ledger::{BincodeLedger, LedgerAction, LedgerMove, LedgerSink, RecordingLedger};
pub use crate::rules::{Penalty, PlayContext, TurnPhase, check_play, is_legal_play};
pub use crate::session::Session;
pub use crate::state::{
    GameStateView, GameStatus, MatchSnapshot, PlayerPublicState, PlayerSnapshot,
};
pub use crate::visualize::{
    VisualOptions, describe_action, describe_event, render_snapshot, render_state,
};
