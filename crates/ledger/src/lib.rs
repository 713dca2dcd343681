pub use categories::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, SAVINGS_CATEGORY, suggested_categories};
pub use commands::{
    ContributeCmd, NewGoalCmd, NewTransactionCmd, NewWishlistItemCmd, UpdateGoalCmd,
    UpdateTransactionCmd, UpdateWishlistItemCmd,
};
pub use error::LedgerError;
pub use events::{ChangeEvent, ChangeKind, ChangeNotifier, Collection, CollectionSubscription};
pub use money::Rupiah;
pub use ops::{Contribution, ContributionTarget, Ledger, LedgerBuilder, TransactionListFilter};
pub use owner::OwnerContext;
pub use savings_goals::SavingsGoal;
pub use stats::{DashboardStats, compute_stats, progress_percent};
pub use transactions::{Transaction, TransactionKind};
pub use wishlist_items::{Priority, WishlistItem};

mod categories;
mod commands;
mod error;
mod events;
mod money;
mod ops;
mod owner;
mod savings_goals;
mod stats;
mod transactions;
mod wishlist_items;

pub type ResultLedger<T> = Result<T, LedgerError>;
