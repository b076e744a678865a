use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Chips;

/// A client betting decision. Raise amounts are "raise to" totals for the
/// street, not increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    RaiseTo { to: Chips },
}

/// What a seat last did, as shown in views, logs and pushes. Blind posts are
/// distinct markers: they do not count as having acted for round completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTag {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
    TimeoutFold,
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SmallBlind => "small blind",
            Self::BigBlind => "big blind",
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all-in",
            Self::TimeoutFold => "timeout fold",
        };
        f.write_str(s)
    }
}

/// An action currently available to the acting seat, with the chip bounds an
/// agent needs to construct a legal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LegalAction {
    Fold,
    Check,
    Call { amount: Chips },
    RaiseTo { min: Chips, max: Chips },
}
