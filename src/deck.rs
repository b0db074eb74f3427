//! Shuffling, dealing and market recycling.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::Card;

/// Uniform in-place permutation (Fisher–Yates).
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// Deals `hand_size` cards to each hand in order, popping from the end of the deck.
///
/// Deals fewer when the deck runs out; whatever is left stays in `deck`.
pub fn deal(deck: &mut Vec<Card>, hands: &mut [Vec<Card>], hand_size: usize) {
    for hand in hands.iter_mut() {
        hand.clear();
        for _ in 0..hand_size {
            match deck.pop() {
                Some(card) => hand.push(card),
                None => return,
            }
        }
    }
}

/// Refills an empty draw pile from the discard pile, keeping the top card in place.
///
/// Returns the number of cards moved back into the draw pile.
pub fn reshuffle_if_empty<R: Rng + ?Sized>(
    draw_pile: &mut Vec<Card>,
    discard_pile: &mut Vec<Card>,
    rng: &mut R,
) -> usize {
    if !draw_pile.is_empty() {
        return 0;
    }
    let Some(top) = discard_pile.pop() else {
        return 0;
    };
    draw_pile.append(discard_pile);
    discard_pile.push(top);
    shuffle(draw_pile, rng);
    draw_pile.len()
}

/// Number of cards that could still be drawn, counting a possible reshuffle.
pub fn available(draw_pile: &[Card], discard_pile: &[Card]) -> usize {
    draw_pile.len() + discard_pile.len().saturating_sub(1)
}
