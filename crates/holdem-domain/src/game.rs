use serde::{Deserialize, Serialize};

/// Phase of the table's current hand. `Waiting` means no live hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Phase {
    /// Whether a betting round can be running in this phase.
    #[must_use]
    pub fn is_betting(self) -> bool {
        matches!(self, Self::Preflop | Self::Flop | Self::Turn | Self::River)
    }

    #[must_use]
    pub fn next_street(self) -> Option<Self> {
        match self {
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::Waiting | Self::River | Self::Showdown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Seated but not part of the current hand (joined mid-hand, or no hand
    /// is running).
    Waiting,
    Active,
    Folded,
    AllIn,
    SittingOut,
}

impl SeatStatus {
    /// Still eligible to win some portion of the pot this hand.
    #[must_use]
    pub fn in_contention(self) -> bool {
        matches!(self, Self::Active | Self::AllIn)
    }
}
