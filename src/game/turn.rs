use super::state::Card;

pub const PAIR_SIZE: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    NotPlaying,
    Locked,
    OutOfRange,
    AlreadyMatched,
    AlreadyFlipped,
    BufferFull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    Flipped,
    /// Second card is up; a resolution is pending.
    PairPending { matched: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Match(usize, usize),
    Mismatch,
}

/// Per-run turn bookkeeping: the flip buffer, the evaluation lock and the counters.
#[derive(Clone, Debug, Default)]
pub struct TurnState {
    pub flipped_indices: Vec<usize>,
    pub lock_input: bool,
    pub moves: u32,
    pub matches: usize,
}

impl TurnState {
    pub fn clear(&mut self) {
        *self = TurnState::default();
    }

    pub fn check_click(&self, cards: &[Card], index: usize) -> Result<(), IgnoreReason> {
        if self.lock_input {
            return Err(IgnoreReason::Locked);
        }
        let Some(card) = cards.get(index) else {
            return Err(IgnoreReason::OutOfRange);
        };
        if card.matched {
            return Err(IgnoreReason::AlreadyMatched);
        }
        if self.flipped_indices.contains(&index) {
            return Err(IgnoreReason::AlreadyFlipped);
        }
        if self.flipped_indices.len() >= PAIR_SIZE {
            return Err(IgnoreReason::BufferFull);
        }
        Ok(())
    }

    /// Accepts a click the caller already validated. Returns the pending
    /// resolution once the buffer holds a full pair.
    pub fn flip(&mut self, cards: &[Card], index: usize) -> Option<Resolution> {
        self.flipped_indices.push(index);
        if self.flipped_indices.len() < PAIR_SIZE {
            return None;
        }

        self.lock_input = true;
        self.moves = self.moves.saturating_add(1);

        let (first, second) = (self.flipped_indices[0], self.flipped_indices[1]);
        if cards[first].animal == cards[second].animal {
            Some(Resolution::Match(first, second))
        } else {
            Some(Resolution::Mismatch)
        }
    }

    pub fn resolve(&mut self, cards: &mut [Card], resolution: Resolution) {
        if let Resolution::Match(first, second) = resolution {
            for idx in [first, second] {
                if let Some(card) = cards.get_mut(idx) {
                    card.matched = true;
                }
            }
            self.matches += 1;
        }
        self.flipped_indices.clear();
        self.lock_input = false;
    }

    pub fn is_complete(&self, total_pairs: usize) -> bool {
        total_pairs > 0 && self.matches == total_pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Animal;

    fn cards(animals: &[Animal]) -> Vec<Card> {
        animals
            .iter()
            .enumerate()
            .map(|(id, &animal)| Card {
                id,
                animal,
                matched: false,
            })
            .collect()
    }

    #[test]
    fn test_single_flip_is_not_a_move() {
        let deck = cards(&[Animal::Fish, Animal::Cat, Animal::Fish, Animal::Cat]);
        let mut turn = TurnState::default();
        assert_eq!(turn.flip(&deck, 0), None);
        assert_eq!(turn.moves, 0);
        assert!(!turn.lock_input);
    }

    #[test]
    fn test_pair_locks_and_counts_move() {
        let deck = cards(&[Animal::Fish, Animal::Cat, Animal::Fish, Animal::Cat]);
        let mut turn = TurnState::default();
        turn.flip(&deck, 0);
        assert_eq!(turn.flip(&deck, 2), Some(Resolution::Match(0, 2)));
        assert_eq!(turn.moves, 1);
        assert!(turn.lock_input);
        assert_eq!(turn.check_click(&deck, 1), Err(IgnoreReason::Locked));
    }

    #[test]
    fn test_mismatch_resolution_clears_buffer_only() {
        let mut deck = cards(&[Animal::Fish, Animal::Cat, Animal::Fish, Animal::Cat]);
        let mut turn = TurnState::default();
        turn.flip(&deck, 0);
        let resolution = turn.flip(&deck, 1);
        assert_eq!(resolution, Some(Resolution::Mismatch));

        turn.resolve(&mut deck, Resolution::Mismatch);
        assert!(turn.flipped_indices.is_empty());
        assert!(!turn.lock_input);
        assert_eq!(turn.matches, 0);
        assert!(deck.iter().all(|c| !c.matched));
    }

    #[test]
    fn test_matched_card_cannot_reenter_buffer() {
        let mut deck = cards(&[Animal::Fish, Animal::Cat, Animal::Fish, Animal::Cat]);
        let mut turn = TurnState::default();
        turn.flip(&deck, 0);
        turn.flip(&deck, 2);
        turn.resolve(&mut deck, Resolution::Match(0, 2));

        assert_eq!(turn.matches, 1);
        assert_eq!(turn.check_click(&deck, 0), Err(IgnoreReason::AlreadyMatched));
        assert_eq!(turn.check_click(&deck, 2), Err(IgnoreReason::AlreadyMatched));
    }

    #[test]
    fn test_click_preconditions() {
        let deck = cards(&[Animal::Fish, Animal::Cat, Animal::Fish, Animal::Cat]);
        let mut turn = TurnState::default();
        assert_eq!(turn.check_click(&deck, 9), Err(IgnoreReason::OutOfRange));
        turn.flip(&deck, 1);
        assert_eq!(turn.check_click(&deck, 1), Err(IgnoreReason::AlreadyFlipped));

        turn.flipped_indices.push(3);
        assert_eq!(turn.check_click(&deck, 0), Err(IgnoreReason::BufferFull));
    }

    #[test]
    fn test_completion_needs_nonzero_pairs() {
        let turn = TurnState::default();
        assert!(!turn.is_complete(0));
        let done = TurnState {
            matches: 3,
            ..Default::default()
        };
        assert!(done.is_complete(3));
        assert!(!done.is_complete(8));
    }
}
