use thiserror::Error;

use crate::deck::DeckError;
use crate::money::{Chips, MoneyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalActionReason {
    CannotCheckWithBet,
    NothingToCall,
    RaiseTooSmall,
    InsufficientChips,
}

impl IllegalActionReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CannotCheckWithBet => "cannot check with bet",
            Self::NothingToCall => "nothing to call",
            Self::RaiseTooSmall => "raise too small",
            Self::InsufficientChips => "insufficient chips",
        }
    }
}

impl std::fmt::Display for IllegalActionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a table operation can fail with. Validation, routing and state
/// errors leave the table untouched; the resource variants abort the hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    // Validation
    #[error("invalid player name: {0}")]
    InvalidName(String),
    #[error("buy-in {offered} outside [{min}, {max}]")]
    InvalidBuyIn {
        offered: Chips,
        min: Chips,
        max: Chips,
    },
    #[error("rebuy would lift stack above maximum buy-in {max}")]
    ExceedsMaxBuyIn { max: Chips },

    // Routing
    #[error("table is full")]
    TableFull,
    #[error("name already taken at this table: {0}")]
    DuplicateName(String),
    #[error("unknown player token")]
    UnknownPlayer,

    // State
    #[error("no active hand")]
    NoActiveHand,
    #[error("not your turn")]
    NotYourTurn,
    #[error("illegal action: {0}")]
    IllegalAction(IllegalActionReason),
    #[error("illegal state transition: {0}")]
    IllegalStateTransition(&'static str),

    // Resource (programmer error: aborts the hand)
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Money(#[from] MoneyError),
    #[error("pot total {pots} does not match contributions {contributed}")]
    PotMismatch { pots: Chips, contributed: Chips },
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}

impl TableError {
    /// Resource errors mean an internal invariant broke mid-hand; the hand
    /// must be aborted and contributions refunded.
    #[must_use]
    pub fn aborts_hand(&self) -> bool {
        matches!(
            self,
            Self::Deck(_) | Self::Money(_) | Self::PotMismatch { .. } | Self::Internal(_)
        )
    }
}
