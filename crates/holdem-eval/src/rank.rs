use holdem_domain::Rank;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hand categories in strict strength order. The derived `Ord` gives the
/// category its dominant position in `HandRank` comparisons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HighCard => "High Card",
            Self::OnePair => "One Pair",
            Self::TwoPair => "Two Pair",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::Straight => "Straight",
            Self::Flush => "Flush",
            Self::FullHouse => "Full House",
            Self::FourOfAKind => "Four of a Kind",
            Self::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Totally ordered strength key for a 5-card hand: category first, then the
/// ranks that define the category (dominant first), then kickers descending.
/// Positions a category never compares are padded with `Rank::Two`; two equal
/// keys are a genuine tie.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct HandRank {
    pub category: HandCategory,
    pub tiebreak: [Rank; 5],
}

impl HandRank {
    #[must_use]
    pub fn new(category: HandCategory, tiebreak: [Rank; 5]) -> Self {
        Self { category, tiebreak }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.tiebreak[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_strictly_ordered() {
        assert!(HandCategory::StraightFlush > HandCategory::FourOfAKind);
        assert!(HandCategory::FourOfAKind > HandCategory::FullHouse);
        assert!(HandCategory::FullHouse > HandCategory::Flush);
        assert!(HandCategory::Flush > HandCategory::Straight);
        assert!(HandCategory::Straight > HandCategory::ThreeOfAKind);
        assert!(HandCategory::ThreeOfAKind > HandCategory::TwoPair);
        assert!(HandCategory::TwoPair > HandCategory::OnePair);
        assert!(HandCategory::OnePair > HandCategory::HighCard);
    }

    #[test]
    fn category_dominates_tiebreak() {
        let pair_of_aces = HandRank::new(
            HandCategory::OnePair,
            [Rank::Ace, Rank::King, Rank::Queen, Rank::Jack, Rank::Two],
        );
        let two_pair_low = HandRank::new(
            HandCategory::TwoPair,
            [Rank::Three, Rank::Two, Rank::Four, Rank::Two, Rank::Two],
        );
        assert!(two_pair_low > pair_of_aces);
    }

    #[test]
    fn kickers_break_ties_within_a_category() {
        let ace_kicker = HandRank::new(
            HandCategory::OnePair,
            [Rank::Ten, Rank::Ace, Rank::Nine, Rank::Five, Rank::Two],
        );
        let king_kicker = HandRank::new(
            HandCategory::OnePair,
            [Rank::Ten, Rank::King, Rank::Nine, Rank::Five, Rank::Two],
        );
        assert!(ace_kicker > king_kicker);
    }
}
