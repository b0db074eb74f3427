use std::fmt::Write;

use crate::action::Action;
use crate::card::Card;
use crate::events::GameEvent;
use crate::rules::{Penalty, TurnPhase};
use crate::state::{GameStateView, GameStatus, MatchSnapshot};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    /// Print hand positions next to each card.
    pub show_hand_indices: bool,
    /// Reveal the computer's hand when rendering a full snapshot.
    pub reveal_computer_hand: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_hand_indices: true,
            reveal_computer_hand: false,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    let mut out = String::new();
    write_header(
        &mut out,
        state.status,
        state.phase,
        state.top_card,
        state.pending_penalty,
        state.shape_demand.map(|s| s.name()),
    );
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Discard pile: {}",
        state.draw_pile_count, state.discard_pile_count
    );
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(
            out,
            "  Player {} {}{}{}",
            player.id, player.name, label_you, current_tag
        );
        if player.id == state.self_player {
            let _ = writeln!(out, "    Hand: {}", format_hand(&state.hand, true));
        } else {
            let _ = writeln!(out, "    Hand size: {}", player.hand_size);
        }
    }
    out
}

/// Renders a full snapshot; the computer's hand stays face down unless asked otherwise.
pub fn render_snapshot(snapshot: &MatchSnapshot, options: VisualOptions) -> String {
    let mut out = String::new();
    write_header(
        &mut out,
        snapshot.status,
        snapshot.phase,
        snapshot.top_card,
        snapshot.pending_penalty,
        snapshot.shape_demand.map(|s| s.name()),
    );
    let _ = writeln!(
        out,
        "Draw pile: {}  |  Discard pile: {}",
        snapshot.draw_pile_count, snapshot.discard_pile_count
    );
    for player in &snapshot.players {
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(out, "  Player {} {}{}", player.id, player.name, current_tag);
        if player.is_computer && !options.reveal_computer_hand {
            let _ = writeln!(out, "    Hand: {} face-down cards", player.hand.len());
        } else {
            let _ = writeln!(
                out,
                "    Hand: {}",
                format_hand(&player.hand, options.show_hand_indices)
            );
        }
    }
    out
}

fn write_header(
    out: &mut String,
    status: GameStatus,
    phase: TurnPhase,
    top_card: Option<Card>,
    penalty: Option<Penalty>,
    demand: Option<&str>,
) {
    let status = match status {
        GameStatus::Waiting => String::from("Waiting"),
        GameStatus::Playing => String::from("Playing"),
        GameStatus::Finished { winner } => format!("Finished (winner: Player {winner})"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(out, "Phase: {phase:?}");
    let top = top_card.map_or_else(|| String::from("--"), |card| card.label());
    let _ = writeln!(out, "Top card: {top}");
    if let Some(penalty) = penalty {
        let _ = writeln!(out, "Pending: Pick {}", penalty.cards());
    }
    if let Some(shape) = demand {
        let _ = writeln!(out, "Whot demands: {}", shape.to_uppercase());
    }
}

fn format_hand(hand: &[Card], with_indices: bool) -> String {
    if hand.is_empty() {
        return String::from("(empty)");
    }
    hand.iter()
        .enumerate()
        .map(|(idx, card)| {
            if with_indices {
                format!("{idx}:{}", card.label())
            } else {
                card.label()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::Play { card, shape } => match shape {
            Some(shape) => format!("Play {} ({}) demanding {shape}", card.label(), card.id()),
            None => format!("Play {} ({})", card.label(), card.id()),
        },
        Action::ChooseShape(shape) => format!("Demand {shape}"),
        Action::Draw => String::from("Draw from the market"),
        Action::EndTurn => String::from("End turn"),
    }
}

pub fn describe_event(event: &GameEvent) -> String {
    match event {
        GameEvent::GameStarted {
            starting_player,
            top_card,
            draw_pile,
        } => {
            let top = top_card.map_or_else(|| String::from("--"), |card| card.label());
            format!(
                "New game: Player {starting_player} starts on {top}, {draw_pile} cards in the market"
            )
        }
        GameEvent::GameReset => String::from("Game reset"),
        GameEvent::CardPlayed { player, card } => {
            format!("Player {player} plays {}", card.label())
        }
        GameEvent::ShapeChosen { player, shape } => {
            format!("Player {player} demands {shape}")
        }
        GameEvent::CardsDrawn {
            player,
            count,
            penalty: Some(penalty),
        } => format!(
            "Player {player} picks {count} card(s) for Pick {}",
            penalty.cards()
        ),
        GameEvent::CardsDrawn {
            player,
            count,
            penalty: None,
        } => format!("Player {player} draws {count} card(s)"),
        GameEvent::PenaltyPassed { to, penalty } => {
            format!("Pick {} on Player {to}", penalty.cards())
        }
        GameEvent::HoldOn { player } => format!("Hold on! Player {player} plays again"),
        GameEvent::Suspension { player } => {
            format!("Suspension! Player {player} plays again")
        }
        GameEvent::GeneralMarket { player, handed_out } => {
            format!("General market from Player {player}: {handed_out} card(s) handed out")
        }
        GameEvent::Reshuffled { cards } => {
            format!("Market reshuffled from {cards} discarded card(s)")
        }
        GameEvent::TurnPassed { to } => format!("Turn passes to Player {to}"),
        GameEvent::LastCard { player } => format!("Player {player}: last card!"),
        GameEvent::GameWon { winner } => format!("Player {winner} wins!"),
        GameEvent::LedgerSyncFailed { reason } => format!("Ledger sync failed: {reason}"),
    }
}
