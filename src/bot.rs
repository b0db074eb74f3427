use crate::action::Action;
use crate::state::GameStateView;

pub use crate::bots::{HumanBot, OpponentBot, RandomBot};

/// Interface for defining Whot players driven by code or a terminal.
pub trait Bot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}
