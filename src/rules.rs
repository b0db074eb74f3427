//! Play legality and the turn sub-states it depends on.
//!
//! Everything in here is pure: the oracle looks at a [`PlayContext`] and a
//! candidate card and never touches the match.

use serde::{Deserialize, Serialize};

use crate::card::{Card, PICK_THREE, Shape};
use crate::error::IllegalPlay;

/// Outstanding forced draw owed by the player to act.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Penalty {
    /// Rank 2. Cannot be defended or stacked.
    PickTwo,
    /// Rank 5. Only another rank 5 defends, which passes the same 3 on.
    PickThree,
}

impl Penalty {
    /// Number of cards the penalty costs.
    pub fn cards(self) -> usize {
        match self {
            Penalty::PickTwo => 2,
            Penalty::PickThree => 3,
        }
    }
}

/// Sub-state of the turn owner.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Normal,
    /// A rank 1 was played; the same player plays again and anything goes.
    HoldOn,
    /// A rank 8 was played; the same player plays again under normal matching.
    SuspensionChain,
    /// A Whot card was played; the turn waits for the demanded shape.
    AwaitingShape,
}

/// Inputs the oracle needs to judge a play.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayContext {
    pub top_card: Option<Card>,
    pub pending_penalty: Option<Penalty>,
    pub shape_demand: Option<Shape>,
    pub phase: TurnPhase,
}

/// Decides whether `card` may be played. First matching rule wins.
pub fn check_play(card: Card, ctx: &PlayContext) -> Result<(), IllegalPlay> {
    if ctx.phase == TurnPhase::HoldOn {
        return Ok(());
    }
    match ctx.pending_penalty {
        Some(Penalty::PickTwo) => return Err(IllegalPlay::PickTwoActive),
        Some(Penalty::PickThree) => {
            return if card.rank() == PICK_THREE {
                Ok(())
            } else {
                Err(IllegalPlay::PickThreeActive)
            };
        }
        None => {}
    }
    if card.is_whot() {
        return Ok(());
    }
    if let Some(demand) = ctx.shape_demand {
        return if card.shape() == Some(demand) {
            Ok(())
        } else {
            Err(IllegalPlay::ShapeDemanded(demand))
        };
    }
    // An opening Whot with no nominated shape constrains nothing.
    let Some(top) = ctx.top_card.filter(|top| !top.is_whot()) else {
        return Ok(());
    };
    if card.shape() == top.shape() || card.rank() == top.rank() {
        Ok(())
    } else {
        Err(IllegalPlay::Mismatch {
            shape: top.shape(),
            rank: top.rank(),
        })
    }
}

#[inline]
pub fn is_legal_play(card: Card, ctx: &PlayContext) -> bool {
    check_play(card, ctx).is_ok()
}

/// Legal subset of a hand, in hand order.
pub fn playable_cards(hand: &[Card], ctx: &PlayContext) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|card| is_legal_play(*card, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(shape: Shape, rank: u8) -> Card {
        Card::Number { shape, rank }
    }

    fn on(top: Card) -> PlayContext {
        PlayContext {
            top_card: Some(top),
            ..PlayContext::default()
        }
    }

    #[test]
    fn matches_shape_or_rank() {
        let ctx = on(card(Shape::Triangle, 7));
        assert!(is_legal_play(card(Shape::Square, 7), &ctx));
        assert!(is_legal_play(card(Shape::Triangle, 12), &ctx));
        assert!(!is_legal_play(card(Shape::Square, 12), &ctx));
    }

    #[test]
    fn mismatch_reason_names_shape_and_number() {
        let ctx = on(card(Shape::Triangle, 7));
        let err = check_play(card(Shape::Square, 9), &ctx).unwrap_err();
        assert_eq!(
            err,
            IllegalPlay::Mismatch {
                shape: Some(Shape::Triangle),
                rank: 7
            }
        );
        let text = err.to_string();
        assert!(text.contains("TRIANGLE"));
        assert!(text.contains('7'));
    }

    #[test]
    fn first_play_accepts_anything() {
        let ctx = PlayContext::default();
        assert!(is_legal_play(card(Shape::Cross, 3), &ctx));
    }

    #[test]
    fn pick_two_blocks_everything_including_whot() {
        let ctx = PlayContext {
            pending_penalty: Some(Penalty::PickTwo),
            ..on(card(Shape::Circle, 2))
        };
        assert_eq!(
            check_play(card(Shape::Circle, 2), &ctx),
            Err(IllegalPlay::PickTwoActive)
        );
        assert_eq!(
            check_play(Card::Whot(1), &ctx),
            Err(IllegalPlay::PickTwoActive)
        );
    }

    #[test]
    fn pick_three_only_defended_by_rank_five() {
        let ctx = PlayContext {
            pending_penalty: Some(Penalty::PickThree),
            ..on(card(Shape::Star, 5))
        };
        assert!(is_legal_play(card(Shape::Cross, 5), &ctx));
        assert_eq!(
            check_play(card(Shape::Star, 7), &ctx),
            Err(IllegalPlay::PickThreeActive)
        );
        assert_eq!(
            check_play(Card::Whot(2), &ctx),
            Err(IllegalPlay::PickThreeActive)
        );
    }

    #[test]
    fn opening_whot_without_demand_accepts_anything() {
        let ctx = on(Card::Whot(4));
        assert!(is_legal_play(card(Shape::Cross, 3), &ctx));
    }

    #[test]
    fn whot_is_playable_without_penalty() {
        let ctx = PlayContext {
            shape_demand: Some(Shape::Star),
            ..on(Card::Whot(1))
        };
        assert!(is_legal_play(Card::Whot(3), &ctx));
    }

    #[test]
    fn shape_demand_overrides_top_card() {
        let ctx = PlayContext {
            shape_demand: Some(Shape::Star),
            ..on(Card::Whot(1))
        };
        assert!(is_legal_play(card(Shape::Star, 11), &ctx));
        assert_eq!(
            check_play(card(Shape::Circle, 11), &ctx),
            Err(IllegalPlay::ShapeDemanded(Shape::Star))
        );
    }

    #[test]
    fn hold_on_allows_any_card() {
        let ctx = PlayContext {
            phase: TurnPhase::HoldOn,
            ..on(card(Shape::Circle, 1))
        };
        assert!(is_legal_play(card(Shape::Square, 13), &ctx));
    }

    #[test]
    fn suspension_chain_uses_normal_matching() {
        let ctx = PlayContext {
            phase: TurnPhase::SuspensionChain,
            ..on(card(Shape::Circle, 8))
        };
        assert!(is_legal_play(card(Shape::Square, 8), &ctx));
        assert!(!is_legal_play(card(Shape::Square, 13), &ctx));
    }

    #[test]
    fn playable_cards_keeps_hand_order() {
        let hand = vec![
            card(Shape::Circle, 3),
            card(Shape::Star, 4),
            Card::Whot(1),
            card(Shape::Cross, 4),
        ];
        let ctx = on(card(Shape::Square, 4));
        assert_eq!(
            playable_cards(&hand, &ctx),
            vec![card(Shape::Star, 4), Card::Whot(1), card(Shape::Cross, 4)]
        );
    }
}
