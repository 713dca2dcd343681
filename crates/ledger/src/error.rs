//! The module contains the errors the ledger can raise.
//!
//! The taxonomy mirrors how failures are surfaced to callers:
//!
//! - [`Validation`] and [`InvalidAmount`] are recoverable locally and name
//!   the input at fault.
//! - [`Unauthorized`] means no owner context is present; callers redirect to
//!   authentication instead of retrying.
//! - [`NotFound`] means the entity vanished between read and write (or was
//!   never visible to this owner).
//! - [`PartialFailure`] is specific to the contribution workflow: the
//!   expense was recorded but the target update failed.
//!
//! [`Validation`]: LedgerError::Validation
//! [`InvalidAmount`]: LedgerError::InvalidAmount
//! [`Unauthorized`]: LedgerError::Unauthorized
//! [`NotFound`]: LedgerError::NotFound
//! [`PartialFailure`]: LedgerError::PartialFailure

use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("no authenticated owner")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("transaction {transaction_id} was recorded but the target update failed: {source}")]
    PartialFailure {
        transaction_id: Uuid,
        #[source]
        source: Box<LedgerError>,
    },
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl LedgerError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Validation { field: a, reason: b },
                Self::Validation { field: c, reason: d },
            ) => a == c && b == d,
            (Self::Unauthorized, Self::Unauthorized) => true,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (
                Self::PartialFailure {
                    transaction_id: a,
                    source: b,
                },
                Self::PartialFailure {
                    transaction_id: c,
                    source: d,
                },
            ) => a == c && b == d,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
