use holdem_domain::TableError;
use platform_core::ErrorCode;
use thiserror::Error;

/// Errors surfaced to the transport layer. Everything carries a stable wire
/// code plus a human-readable message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("unknown table")]
    UnknownTable,
    #[error("unknown player token")]
    UnknownPlayer,
    #[error("table is no longer available")]
    TableUnavailable,
}

impl ServiceError {
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Table(err) => table_error_code(err),
            Self::UnknownTable => ErrorCode::UnknownTable,
            Self::UnknownPlayer => ErrorCode::UnknownPlayer,
            Self::TableUnavailable => ErrorCode::InternalError,
        }
    }
}

fn table_error_code(err: &TableError) -> ErrorCode {
    match err {
        TableError::InvalidName(_) => ErrorCode::InvalidName,
        TableError::InvalidBuyIn { .. } => ErrorCode::InvalidBuyIn,
        TableError::ExceedsMaxBuyIn { .. } => ErrorCode::ExceedsMaxBuyIn,
        TableError::TableFull => ErrorCode::TableFull,
        TableError::DuplicateName(_) => ErrorCode::DuplicateName,
        TableError::UnknownPlayer => ErrorCode::UnknownPlayer,
        TableError::NoActiveHand => ErrorCode::NoActiveHand,
        TableError::NotYourTurn => ErrorCode::NotYourTurn,
        TableError::IllegalAction(_) => ErrorCode::IllegalAction,
        TableError::IllegalStateTransition(_) => ErrorCode::IllegalState,
        TableError::Deck(_)
        | TableError::Money(_)
        | TableError::PotMismatch { .. }
        | TableError::Internal(_) => ErrorCode::InternalError,
    }
}
