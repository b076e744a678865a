use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::card::{Card, Rank, Suit};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck exhausted: needed {needed}, {remaining} remaining")]
    Exhausted { needed: usize, remaining: usize },
}

/// Ordered 52-card sequence. `reset` rebuilds the canonical order; dealing and
/// burning both consume from the top.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub const SIZE: usize = 52;

    #[must_use]
    pub fn new() -> Self {
        let mut deck = Self { cards: Vec::new() };
        deck.reset();
        deck
    }

    /// Build a deck with a fixed order, first card on top. Test and replay
    /// hook; live tables always go through `reset` + `shuffle`.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn reset(&mut self) {
        self.cards.clear();
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                self.cards.push(Card::new(rank, suit));
            }
        }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            return Err(DeckError::Exhausted {
                needed: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Exhausted {
                needed: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }

    pub fn burn(&mut self) -> Result<(), DeckError> {
        self.deal_one().map(|_| ())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn reset_rebuilds_all_52_unique_cards() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), Deck::SIZE);
        let unique: HashSet<Card> = {
            let mut d = deck.clone();
            d.deal(52).expect("full deal").into_iter().collect()
        };
        assert_eq!(unique.len(), Deck::SIZE);
    }

    #[test]
    fn shuffle_preserves_the_card_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);
        let cards: HashSet<Card> = deck.deal(52).expect("full deal").into_iter().collect();
        assert_eq!(cards.len(), Deck::SIZE);
    }

    #[test]
    fn deal_and_burn_shrink_the_deck() {
        let mut deck = Deck::new();
        let dealt = deck.deal(2).expect("deal");
        assert_eq!(dealt.len(), 2);
        deck.burn().expect("burn");
        assert_eq!(deck.remaining(), Deck::SIZE - 3);
    }

    #[test]
    fn deal_fails_when_short() {
        let mut deck = Deck::new();
        deck.deal(50).expect("deal");
        let err = deck.deal(3).expect_err("should be short");
        assert_eq!(
            err,
            DeckError::Exhausted {
                needed: 3,
                remaining: 2
            }
        );
    }
}
