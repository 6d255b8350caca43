use rand::Rng;
use rand::seq::SliceRandom;

use super::state::{Animal, Card, Difficulty};

/// Builds a freshly shuffled deck: the first `pair_count` animals, each twice.
pub fn build_deck<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
    let pairs = difficulty.pair_count();
    let mut cards = Vec::with_capacity(pairs * 2);

    for (index, &animal) in Animal::ALL.iter().take(pairs).enumerate() {
        cards.push(Card {
            id: index * 2,
            animal,
            matched: false,
        });
        cards.push(Card {
            id: index * 2 + 1,
            animal,
            matched: false,
        });
    }

    // Fisher-Yates.
    cards.shuffle(rng);
    log::debug!("built {} deck with {} cards", difficulty.key(), cards.len());
    cards
}
