//! Command surface for a presentation layer: one human against the computer.
//!
//! The session owns the match, steps the computer whenever it ends up owning the
//! turn, and mirrors the human's committed moves to an optional ledger sink.

use crate::action::{Action, PlayerId};
use crate::bot::Bot;
use crate::card::{Card, Shape};
use crate::error::GameError;
use crate::events::GameEvent;
use crate::game::Game;
use crate::ledger::{LedgerMove, LedgerSink};
use crate::state::MatchSnapshot;

pub struct Session {
    game: Game,
    opponent: Box<dyn Bot>,
    ledger: Option<Box<dyn LedgerSink>>,
    /// Hand index of a Whot card whose shape has not been chosen yet.
    unmirrored_whot: Option<usize>,
}

impl Session {
    pub fn new(game: Game, opponent: Box<dyn Bot>) -> Self {
        Self {
            game,
            opponent,
            ledger: None,
            unmirrored_whot: None,
        }
    }

    pub fn with_ledger(mut self, ledger: Box<dyn LedgerSink>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.game.snapshot()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    pub fn start_new_game(&mut self) -> Result<MatchSnapshot, GameError> {
        self.unmirrored_whot = None;
        self.game.start_new_game();
        self.run_computer()?;
        Ok(self.game.snapshot())
    }

    pub fn reset_game(&mut self) -> MatchSnapshot {
        self.unmirrored_whot = None;
        self.game.reset_game()
    }

    pub fn play_card(&mut self, card_id: &str, player: PlayerId) -> Result<MatchSnapshot, GameError> {
        let card: Card = card_id.parse()?;
        self.apply_action(player, Action::play(card))
    }

    pub fn choose_wild_shape(&mut self, shape: Shape) -> Result<MatchSnapshot, GameError> {
        let player = self.game.current_player();
        self.apply_action(player, Action::ChooseShape(shape))
    }

    pub fn draw_card(&mut self, player: PlayerId) -> Result<MatchSnapshot, GameError> {
        self.apply_action(player, Action::Draw)
    }

    pub fn end_turn(&mut self) -> Result<MatchSnapshot, GameError> {
        let player = self.game.current_player();
        self.apply_action(player, Action::EndTurn)
    }

    /// Applies a human command, mirrors it, then lets the computer move until the
    /// human is to act again or the game is over.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<MatchSnapshot, GameError> {
        if self.game.is_computer_turn() {
            return Err(GameError::NotPlayersTurn);
        }
        let card_index = match action {
            Action::Play { card, .. } => self
                .game
                .hand(player)?
                .iter()
                .position(|held| *held == card),
            _ => None,
        };
        self.game.apply_action(player, action)?;
        self.mirror(action, card_index);
        self.run_computer()?;
        Ok(self.game.snapshot())
    }

    /// Steps the computer while it owns the turn. Returns the number of actions taken.
    pub fn run_computer(&mut self) -> Result<usize, GameError> {
        let mut steps = 0;
        while self.game.is_computer_turn() {
            let player = self.game.current_player();
            let legal = self.game.legal_actions(player)?;
            if legal.is_empty() {
                // Nothing playable and nothing left to draw.
                break;
            }
            let view = self.game.state_view(player)?;
            let action = self.opponent.select_action(&view, &legal);
            self.game.apply_action(player, action)?;
            steps += 1;
        }
        Ok(steps)
    }

    fn mirror(&mut self, action: Action, card_index: Option<usize>) {
        let entry = match (action, card_index) {
            (Action::Play { card, shape: None }, Some(index)) if card.is_whot() => {
                if self.game.is_finished() {
                    Some(LedgerMove::play(index, None))
                } else {
                    self.unmirrored_whot = Some(index);
                    None
                }
            }
            (Action::Play { shape, .. }, Some(index)) => Some(LedgerMove::play(index, shape)),
            (Action::ChooseShape(shape), _) => self
                .unmirrored_whot
                .take()
                .map(|index| LedgerMove::play(index, Some(shape))),
            (Action::Draw, _) => Some(LedgerMove::draw()),
            _ => None,
        };
        let (Some(entry), Some(ledger)) = (entry, self.ledger.as_mut()) else {
            return;
        };
        if let Err(err) = ledger.submit(&entry) {
            self.game.record(GameEvent::LedgerSyncFailed {
                reason: err.to_string(),
            });
        }
    }
}
