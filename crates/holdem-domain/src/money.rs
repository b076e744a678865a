use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Integer chip amount. All arithmetic that could wrap goes through the
/// checked helpers; a failed operation is a programmer error surfaced as
/// `MoneyError` rather than a silent wrap.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, MoneyError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, MoneyError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(MoneyError::Underflow)
    }

    /// Difference clamped at zero; used for to-call style computations where
    /// "already ahead of the bet" simply means nothing owed.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        Self(self.0.min(rhs.0))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoneyError {
    #[error("chip amount overflow")]
    Overflow,
    #[error("chip amount underflow")]
    Underflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_sub_refuses_underflow() {
        assert_eq!(Chips(3).checked_sub(Chips(5)), Err(MoneyError::Underflow));
        assert_eq!(Chips(5).checked_sub(Chips(3)), Ok(Chips(2)));
    }

    #[test]
    fn saturating_sub_clamps_to_zero() {
        assert_eq!(Chips(3).saturating_sub(Chips(5)), Chips::ZERO);
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&Chips(42)).expect("serialize");
        assert_eq!(json, "42");
    }
}
