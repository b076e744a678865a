use holdem_domain::{Card, Rank};
use thiserror::Error;

use crate::rank::{HandCategory, HandRank};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidCardCount(usize),
}

/// Bitmask over rank values 2..=14.
type RankMask = u16;

fn rank_bit(rank: Rank) -> RankMask {
    1 << rank.value()
}

/// Highest card of a straight contained in the mask, if any. The wheel
/// (A-2-3-4-5) counts with the five as its high card.
fn detect_straight(mask: RankMask) -> Option<Rank> {
    for high in (6..=14u8).rev() {
        let run = 0b11111 << (high - 4);
        if mask & run == run {
            return Some(rank_from_value(high));
        }
    }
    let wheel = rank_bit(Rank::Ace)
        | rank_bit(Rank::Two)
        | rank_bit(Rank::Three)
        | rank_bit(Rank::Four)
        | rank_bit(Rank::Five);
    (mask & wheel == wheel).then_some(Rank::Five)
}

fn rank_from_value(value: u8) -> Rank {
    match value {
        2 => Rank::Two,
        3 => Rank::Three,
        4 => Rank::Four,
        5 => Rank::Five,
        6 => Rank::Six,
        7 => Rank::Seven,
        8 => Rank::Eight,
        9 => Rank::Nine,
        10 => Rank::Ten,
        11 => Rank::Jack,
        12 => Rank::Queen,
        13 => Rank::King,
        _ => Rank::Ace,
    }
}

/// Best 5-card hand drawable from 5 to 7 cards: the maximum key over every
/// 5-card subset.
pub fn evaluate_best(cards: &[Card]) -> Result<HandRank, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::InvalidCardCount(n));
    }
    let mut best: Option<HandRank> = None;
    for a in 0..n - 4 {
        for b in a + 1..n - 3 {
            for c in b + 1..n - 2 {
                for d in c + 1..n - 1 {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = evaluate_five(&five);
                        if best.is_none_or(|current| rank > current) {
                            best = Some(rank);
                        }
                    }
                }
            }
        }
    }
    Ok(best.expect("at least one 5-card subset"))
}

/// Classify exactly five cards.
#[must_use]
pub fn evaluate_five(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15];
    let mut mask: RankMask = 0;

    for card in cards {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        mask |= rank_bit(card.rank);
    }

    let is_flush = suit_counts.contains(&5);
    let straight_high = detect_straight(mask);

    if is_flush {
        if let Some(high) = straight_high {
            return HandRank::new(HandCategory::StraightFlush, straight_tiebreak(high));
        }
    }

    // Distinct ranks ordered by multiplicity, then rank, both descending.
    let mut groups: Vec<(u8, Rank)> = Vec::with_capacity(5);
    for value in (2..=14u8).rev() {
        let count = rank_counts[value as usize];
        if count > 0 {
            groups.push((count, rank_from_value(value)));
        }
    }
    groups.sort_by(|a, b| b.cmp(a));

    let pattern: Vec<u8> = groups.iter().map(|(count, _)| *count).collect();

    if pattern == [4, 1] {
        return HandRank::new(
            HandCategory::FourOfAKind,
            padded([groups[0].1, groups[1].1]),
        );
    }
    if pattern == [3, 2] {
        return HandRank::new(HandCategory::FullHouse, padded([groups[0].1, groups[1].1]));
    }
    if is_flush {
        return HandRank::new(HandCategory::Flush, sorted_desc(cards));
    }
    if let Some(high) = straight_high {
        return HandRank::new(HandCategory::Straight, straight_tiebreak(high));
    }
    if pattern == [3, 1, 1] {
        return HandRank::new(
            HandCategory::ThreeOfAKind,
            padded([groups[0].1, groups[1].1, groups[2].1]),
        );
    }
    if pattern == [2, 2, 1] {
        return HandRank::new(
            HandCategory::TwoPair,
            padded([groups[0].1, groups[1].1, groups[2].1]),
        );
    }
    if pattern == [2, 1, 1, 1] {
        return HandRank::new(
            HandCategory::OnePair,
            padded([groups[0].1, groups[1].1, groups[2].1, groups[3].1]),
        );
    }

    HandRank::new(HandCategory::HighCard, sorted_desc(cards))
}

/// Tiebreak ranks for a straight keyed on its high card. The wheel keys on
/// the five, with the ace demoted below the deuce.
fn straight_tiebreak(high: Rank) -> [Rank; 5] {
    if high == Rank::Five {
        return [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace];
    }
    let h = high.value();
    [
        rank_from_value(h),
        rank_from_value(h - 1),
        rank_from_value(h - 2),
        rank_from_value(h - 3),
        rank_from_value(h - 4),
    ]
}

fn sorted_desc(cards: &[Card; 5]) -> [Rank; 5] {
    let mut ranks = cards.map(|card| card.rank);
    ranks.sort_by(|a, b| b.cmp(a));
    ranks
}

fn padded<const N: usize>(defined: [Rank; N]) -> [Rank; 5] {
    let mut out = [Rank::Two; 5];
    out[..N].copy_from_slice(&defined);
    out
}
