use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::GameStateView;

/// Baseline bot that samples uniformly from the legal action set, holding Whot
/// cards back while any other action is allowed.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        let plain: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(|action| !action.card().is_some_and(|card| card.is_whot()))
            .collect();
        let pool = if plain.is_empty() {
            legal_actions
        } else {
            plain.as_slice()
        };
        *pool
            .choose(&mut self.rng)
            .expect("at least one legal action must be available")
    }
}
