use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Action, COMPUTER, HUMAN, PlayerId};
use crate::card::{
    Card, DECK_SIZE, GENERAL_MARKET, HAND_SIZE, HOLD_ON, PICK_THREE, PICK_TWO, PLAYER_COUNT,
    SUSPENSION, Shape, full_deck,
};
use crate::deck;
use crate::error::GameError;
use crate::events::{EventLog, GameEvent};
use crate::rules::{Penalty, PlayContext, TurnPhase, check_play, playable_cards};
use crate::state::{
    GameStateView, GameStatus, MatchSnapshot, PlayerPublicState, PlayerSnapshot,
};

const DEFAULT_SEED: u64 = 0x5EED_0F_3A7E_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub seed: u64,
    pub hand_size: usize,
    pub starting_player: PlayerId,
    pub player_names: [String; PLAYER_COUNT],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            hand_size: HAND_SIZE,
            starting_player: HUMAN,
            player_names: [String::from("You"), String::from("Computer")],
        }
    }
}

impl GameConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        // Every hand plus the opening discard must come out of the deck.
        if self.hand_size * PLAYER_COUNT + 1 > DECK_SIZE {
            return Err(GameError::InvalidConfiguration(
                "hand size leaves no card for the discard pile",
            ));
        }
        if self.starting_player >= PLAYER_COUNT {
            return Err(GameError::InvalidConfiguration(
                "starting player is out of range",
            ));
        }
        Ok(())
    }
}

/// Builder that enables deterministic deck injection for testing and replays.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            deck: None,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    pub fn with_starting_player(mut self, player: PlayerId) -> Self {
        self.config.starting_player = player;
        self
    }

    pub fn with_names(mut self, human: impl Into<String>, computer: impl Into<String>) -> Self {
        self.config.player_names = [human.into(), computer.into()];
        self
    }

    /// Use this exact deck (top of the deck is the last element) for the first
    /// game instead of a shuffled one.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Builds a game in the `Waiting` status.
    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }

    /// Builds a game and deals it straight away.
    pub fn start(self) -> Result<Game, GameError> {
        let mut game = self.build()?;
        game.start_new_game();
        Ok(game)
    }
}

/// Core Whot rules engine: the turn and effect state machine.
///
/// Every command validates first and mutates second, so a rejected command
/// leaves the match exactly as it was.
pub struct Game {
    config: GameConfig,
    status: GameStatus,
    current_player: PlayerId,
    players: Vec<PlayerState>,
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    pending_penalty: Option<Penalty>,
    shape_demand: Option<Shape>,
    phase: TurnPhase,
    preset_deck: Option<Vec<Card>>,
    events: EventLog,
    rng: StdRng,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    pub fn pending_penalty(&self) -> Option<Penalty> {
        self.pending_penalty
    }

    pub fn shape_demand(&self) -> Option<Shape> {
        self.shape_demand
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.players
            .get(player)
            .map(|p| p.hand.as_slice())
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// True when the game is running and the computer owns the turn.
    pub fn is_computer_turn(&self) -> bool {
        self.status == GameStatus::Playing && self.players[self.current_player].is_computer
    }

    /// Total number of cards across hands and piles. Always equals the deck size.
    pub fn card_count(&self) -> usize {
        self.players.iter().map(|p| p.hand.len()).sum::<usize>()
            + self.draw_pile.len()
            + self.discard_pile.len()
    }

    pub fn play_context(&self) -> PlayContext {
        PlayContext {
            top_card: self.top_card(),
            pending_penalty: self.pending_penalty,
            shape_demand: self.shape_demand,
            phase: self.phase,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerSnapshot {
                id: idx,
                name: player.name.clone(),
                is_computer: player.is_computer,
                hand: player.hand.clone(),
                is_current: idx == self.current_player,
            })
            .collect();
        MatchSnapshot {
            status: self.status,
            phase: self.phase,
            current_player: self.current_player,
            players,
            draw_pile_count: self.draw_pile.len(),
            discard_pile_count: self.discard_pile.len(),
            top_card: self.top_card(),
            pending_penalty: self.pending_penalty,
            shape_demand: self.shape_demand,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        if perspective >= self.players.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name.clone(),
                is_computer: player.is_computer,
                hand_size: player.hand.len(),
                is_current: idx == self.current_player,
            })
            .collect();

        Ok(GameStateView {
            status: self.status,
            phase: self.phase,
            self_player: perspective,
            current_player: self.current_player,
            draw_pile_count: self.draw_pile.len(),
            discard_pile_count: self.discard_pile.len(),
            top_card: self.top_card(),
            pending_penalty: self.pending_penalty,
            shape_demand: self.shape_demand,
            players,
            hand: self.players[perspective].hand.clone(),
        })
    }

    /// Shuffles a fresh deck, deals every hand and flips the opening discard.
    pub fn start_new_game(&mut self) -> MatchSnapshot {
        let mut cards = match self.preset_deck.take() {
            Some(cards) => cards,
            None => {
                let mut cards = full_deck();
                deck::shuffle(&mut cards, &mut self.rng);
                cards
            }
        };
        let mut hands: Vec<Vec<Card>> = vec![Vec::new(); self.players.len()];
        deck::deal(&mut cards, &mut hands, self.config.hand_size);
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        self.discard_pile = cards.pop().into_iter().collect();
        self.draw_pile = cards;
        self.status = GameStatus::Playing;
        self.current_player = self.config.starting_player;
        self.pending_penalty = None;
        self.shape_demand = None;
        self.phase = TurnPhase::Normal;
        self.record(GameEvent::GameStarted {
            starting_player: self.current_player,
            top_card: self.top_card(),
            draw_pile: self.draw_pile.len(),
        });
        self.snapshot()
    }

    /// Abandons the current match and returns to `Waiting`, with the whole deck
    /// back in the draw pile.
    pub fn reset_game(&mut self) -> MatchSnapshot {
        for player in &mut self.players {
            player.hand.clear();
        }
        self.draw_pile = full_deck();
        self.discard_pile.clear();
        self.status = GameStatus::Waiting;
        self.current_player = self.config.starting_player;
        self.pending_penalty = None;
        self.shape_demand = None;
        self.phase = TurnPhase::Normal;
        self.record(GameEvent::GameReset);
        self.snapshot()
    }

    /// Plays the card with the given id from `player`'s hand.
    pub fn play_card(&mut self, player: PlayerId, card_id: &str) -> Result<MatchSnapshot, GameError> {
        let card: Card = card_id.parse()?;
        self.play(player, card, None)?;
        Ok(self.snapshot())
    }

    /// Names the shape demanded by the Whot card just played by the current player.
    pub fn choose_wild_shape(&mut self, shape: Shape) -> Result<MatchSnapshot, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotActive);
        }
        self.choose_shape(shape)?;
        Ok(self.snapshot())
    }

    pub fn draw_card(&mut self, player: PlayerId) -> Result<MatchSnapshot, GameError> {
        self.draw(player)?;
        Ok(self.snapshot())
    }

    /// Passes the turn once the mandatory action is satisfied, which is only the
    /// case in the middle of a suspension chain.
    pub fn end_turn(&mut self) -> Result<MatchSnapshot, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotActive);
        }
        self.finish_turn()?;
        Ok(self.snapshot())
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.status != GameStatus::Playing {
            return Ok(Vec::new());
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        if self.phase == TurnPhase::AwaitingShape {
            return Ok(Shape::ALL.into_iter().map(Action::ChooseShape).collect());
        }
        let mut actions: Vec<Action> = playable_cards(&self.players[player].hand, &self.play_context())
            .into_iter()
            .map(Action::play)
            .collect();
        if deck::available(&self.draw_pile, &self.discard_pile) > 0 {
            actions.push(Action::Draw);
        }
        if self.phase == TurnPhase::SuspensionChain {
            actions.push(Action::EndTurn);
        }
        Ok(actions)
    }

    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        match action {
            Action::Play { card, shape } => self.play(player, card, shape),
            Action::ChooseShape(shape) => self.choose_shape(shape),
            Action::Draw => self.draw(player),
            Action::EndTurn => self.finish_turn(),
        }
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        config.validate()?;
        if let Some(cards) = &deck {
            let mut sorted = cards.clone();
            sorted.sort();
            let mut expected = full_deck();
            expected.sort();
            if sorted != expected {
                return Err(GameError::InvalidConfiguration(
                    "deck must be a permutation of the 65-card Whot deck",
                ));
            }
        }
        let players = config
            .player_names
            .iter()
            .enumerate()
            .map(|(idx, name)| PlayerState::new(name.clone(), idx == COMPUTER))
            .collect();

        Ok(Game {
            status: GameStatus::Waiting,
            current_player: config.starting_player,
            players,
            draw_pile: full_deck(),
            discard_pile: Vec::new(),
            pending_penalty: None,
            shape_demand: None,
            phase: TurnPhase::Normal,
            preset_deck: deck,
            events: EventLog::default(),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotActive);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        Ok(())
    }

    fn play(&mut self, player: PlayerId, card: Card, shape: Option<Shape>) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        if self.phase == TurnPhase::AwaitingShape {
            return Err(GameError::ShapeChoicePending);
        }
        if shape.is_some() && !card.is_whot() {
            return Err(GameError::UnexpectedShape);
        }
        let index = self.players[player]
            .hand
            .iter()
            .position(|held| *held == card)
            .ok_or(GameError::CardNotInHand(card))?;
        check_play(card, &self.play_context())?;

        let hand = &mut self.players[player].hand;
        hand.remove(index);
        let remaining = hand.len();
        self.discard_pile.push(card);
        self.record(GameEvent::CardPlayed { player, card });

        if remaining == 0 {
            self.status = GameStatus::Finished { winner: player };
            self.pending_penalty = None;
            self.shape_demand = None;
            self.phase = TurnPhase::Normal;
            self.record(GameEvent::GameWon { winner: player });
            return Ok(());
        }
        if remaining == 1 {
            self.record(GameEvent::LastCard { player });
        }

        self.resolve_effect(player, card);
        if let Some(shape) = shape {
            self.choose_shape(shape)?;
        }
        Ok(())
    }

    fn resolve_effect(&mut self, player: PlayerId, card: Card) {
        self.pending_penalty = None;
        self.shape_demand = None;
        if card.is_whot() {
            self.phase = TurnPhase::AwaitingShape;
            return;
        }
        self.phase = TurnPhase::Normal;
        match card.rank() {
            HOLD_ON => {
                self.phase = TurnPhase::HoldOn;
                self.record(GameEvent::HoldOn { player });
            }
            SUSPENSION => {
                self.phase = TurnPhase::SuspensionChain;
                self.record(GameEvent::Suspension { player });
            }
            PICK_TWO | PICK_THREE => {
                let penalty = if card.rank() == PICK_TWO {
                    Penalty::PickTwo
                } else {
                    Penalty::PickThree
                };
                self.pending_penalty = Some(penalty);
                self.advance_turn();
                self.record(GameEvent::PenaltyPassed {
                    to: self.current_player,
                    penalty,
                });
            }
            GENERAL_MARKET => {
                let mut handed_out = 0;
                for other in 0..self.players.len() {
                    if other != player {
                        handed_out += self.take_cards(other, 1);
                    }
                }
                self.record(GameEvent::GeneralMarket { player, handed_out });
                self.advance_turn();
            }
            _ => self.advance_turn(),
        }
    }

    fn choose_shape(&mut self, shape: Shape) -> Result<(), GameError> {
        if self.phase != TurnPhase::AwaitingShape {
            return Err(GameError::NoShapePending);
        }
        self.shape_demand = Some(shape);
        self.phase = TurnPhase::Normal;
        self.record(GameEvent::ShapeChosen {
            player: self.current_player,
            shape,
        });
        self.advance_turn();
        Ok(())
    }

    fn draw(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        if self.phase == TurnPhase::AwaitingShape {
            return Err(GameError::ShapeChoicePending);
        }
        if deck::available(&self.draw_pile, &self.discard_pile) == 0 {
            return Err(GameError::DeckExhausted);
        }
        let penalty = self.pending_penalty;
        let wanted = penalty.map_or(1, Penalty::cards);
        let count = self.take_cards(player, wanted);
        self.record(GameEvent::CardsDrawn {
            player,
            count,
            penalty,
        });
        self.pending_penalty = None;
        self.phase = TurnPhase::Normal;
        self.advance_turn();
        Ok(())
    }

    fn finish_turn(&mut self) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::SuspensionChain => {
                self.phase = TurnPhase::Normal;
                self.advance_turn();
                Ok(())
            }
            TurnPhase::AwaitingShape => Err(GameError::ShapeChoicePending),
            TurnPhase::Normal | TurnPhase::HoldOn => Err(GameError::TurnNotComplete),
        }
    }

    /// Moves up to `count` cards into `player`'s hand, recycling the discard pile
    /// whenever the draw pile runs dry. Returns how many cards were taken.
    fn take_cards(&mut self, player: PlayerId, count: usize) -> usize {
        let mut taken = 0;
        while taken < count {
            let recycled =
                deck::reshuffle_if_empty(&mut self.draw_pile, &mut self.discard_pile, &mut self.rng);
            if recycled > 0 {
                self.record(GameEvent::Reshuffled { cards: recycled });
            }
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            self.players[player].hand.push(card);
            taken += 1;
        }
        taken
    }

    fn advance_turn(&mut self) {
        self.current_player = (self.current_player + 1) % self.players.len();
        self.record(GameEvent::TurnPassed {
            to: self.current_player,
        });
    }
}

#[derive(Clone)]
struct PlayerState {
    name: String,
    is_computer: bool,
    hand: Vec<Card>,
}

impl PlayerState {
    fn new(name: String, is_computer: bool) -> Self {
        Self {
            name,
            is_computer,
            hand: Vec::with_capacity(HAND_SIZE),
        }
    }
}
