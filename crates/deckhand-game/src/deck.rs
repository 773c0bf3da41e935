//! The standard 108-card deck and unbiased shuffling.

use std::sync::atomic::{AtomicU64, Ordering};

use deckhand_protocol::{Card, CardId, CardKind, Color};
use rand::Rng;
use rand::seq::SliceRandom;

/// Total population of a standard deck.
pub const DECK_SIZE: usize = 108;

/// Counter for generating unique card IDs.
static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

fn fresh_id() -> CardId {
    CardId(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
}

/// Builds the fixed 108-card population, each card with a freshly
/// generated unique identity. No randomness here — shuffling is a
/// separate step.
///
/// Composition per concrete color: one 0, two each of 1–9, two each of
/// Skip/Reverse/DrawTwo. Plus four Wild and four WildDrawFour.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);

    for color in Color::CONCRETE {
        deck.push(Card::number(fresh_id(), color, 0));
        for number in 1..=9 {
            deck.push(Card::number(fresh_id(), color, number));
            deck.push(Card::number(fresh_id(), color, number));
        }
        for kind in [CardKind::Skip, CardKind::Reverse, CardKind::DrawTwo] {
            deck.push(Card::action(fresh_id(), color, kind));
            deck.push(Card::action(fresh_id(), color, kind));
        }
    }
    for _ in 0..4 {
        deck.push(Card::wild(fresh_id(), CardKind::Wild));
    }
    for _ in 0..4 {
        deck.push(Card::wild(fresh_id(), CardKind::WildDrawFour));
    }

    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}

/// Uniform random permutation of the whole pile.
///
/// Delegates to `rand`'s Fisher-Yates. The RNG is injected so the
/// table can own a single seedable source and tests stay deterministic.
pub fn shuffle<R: Rng + ?Sized>(pile: &mut [Card], rng: &mut R) {
    pile.shuffle(rng);
}

// =========================================================================
// Tests
// =========================================================================
