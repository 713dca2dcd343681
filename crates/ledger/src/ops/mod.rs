use sea_orm::DatabaseConnection;
use unicode_normalization::UnicodeNormalization;

use crate::{ChangeNotifier, LedgerError, ResultLedger};

mod contribution;
mod goals;
mod stats;
mod transactions;
mod wishlist;

pub use contribution::{Contribution, ContributionTarget};
pub use transactions::TransactionListFilter;

const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Session-scoped handle over one owner's collections.
///
/// A `Ledger` is built once per authenticated session and dropped at
/// sign-out; its change notifier goes with it. Every operation takes an
/// [`OwnerContext`](crate::OwnerContext) and touches only that owner's
/// rows. Writes are individual per-row statements against the store; the
/// ledger never asks the store for multi-row atomicity, so concurrent
/// writers are serialized per row with last-writer-wins semantics.
#[derive(Debug)]
pub struct Ledger {
    database: DatabaseConnection,
    notifier: ChangeNotifier,
}

impl Ledger {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// The change bus mutations publish to.
    ///
    /// Adapters for a remote change feed inject remote events through the
    /// same bus, so subscribers cannot tell local and remote writers apart.
    #[must_use]
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

fn normalize_required_text(value: &str, field: &'static str) -> ResultLedger<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(field, "must not be empty"));
    }
    Ok(trimmed.nfc().collect())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.nfc().collect())
}

/// The builder for `Ledger`
pub struct LedgerBuilder {
    database: DatabaseConnection,
    event_capacity: usize,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Buffer size of the change bus before lagging subscribers skip ahead.
    pub fn event_capacity(mut self, capacity: usize) -> LedgerBuilder {
        self.event_capacity = capacity;
        self
    }

    /// Construct `Ledger`
    pub async fn build(self) -> ResultLedger<Ledger> {
        Ok(Ledger {
            database: self.database,
            notifier: ChangeNotifier::new(self.event_capacity),
        })
    }
}
