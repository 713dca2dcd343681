//! Command structs for ledger operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. Every command carries the
//! [`OwnerContext`] the operation is scoped to.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{OwnerContext, Priority, TransactionKind, ops::ContributionTarget};

/// Create an income or expense transaction.
#[derive(Clone, Debug)]
pub struct NewTransactionCmd {
    pub owner: OwnerContext,
    pub title: String,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub category: String,
    pub occurred_at: NaiveDate,
    pub notes: Option<String>,
}

impl NewTransactionCmd {
    #[must_use]
    pub fn new(
        owner: OwnerContext,
        title: impl Into<String>,
        kind: TransactionKind,
        amount_minor: i64,
        category: impl Into<String>,
        occurred_at: NaiveDate,
    ) -> Self {
        Self {
            owner,
            title: title.into(),
            kind,
            amount_minor,
            category: category.into(),
            occurred_at,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Update an existing transaction. Unset fields keep their stored value.
#[derive(Clone, Debug)]
pub struct UpdateTransactionCmd {
    pub owner: OwnerContext,
    pub transaction_id: Uuid,
    pub title: Option<String>,
    pub kind: Option<TransactionKind>,
    pub amount_minor: Option<i64>,
    pub category: Option<String>,
    pub occurred_at: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl UpdateTransactionCmd {
    #[must_use]
    pub fn new(owner: OwnerContext, transaction_id: Uuid) -> Self {
        Self {
            owner,
            transaction_id,
            title: None,
            kind: None,
            amount_minor: None,
            category: None,
            occurred_at: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn amount_minor(mut self, amount_minor: i64) -> Self {
        self.amount_minor = Some(amount_minor);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn occurred_at(mut self, occurred_at: NaiveDate) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create a savings goal.
#[derive(Clone, Debug)]
pub struct NewGoalCmd {
    pub owner: OwnerContext,
    pub title: String,
    pub target_amount_minor: i64,
    pub deadline: Option<NaiveDate>,
}

impl NewGoalCmd {
    #[must_use]
    pub fn new(owner: OwnerContext, title: impl Into<String>, target_amount_minor: i64) -> Self {
        Self {
            owner,
            title: title.into(),
            target_amount_minor,
            deadline: None,
        }
    }

    #[must_use]
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Update an existing savings goal. Unset fields keep their stored value.
///
/// `current_amount_minor` here is the direct-edit path: it may set any
/// non-negative value, including past the target.
#[derive(Clone, Debug)]
pub struct UpdateGoalCmd {
    pub owner: OwnerContext,
    pub goal_id: Uuid,
    pub title: Option<String>,
    pub target_amount_minor: Option<i64>,
    pub current_amount_minor: Option<i64>,
    pub deadline: Option<NaiveDate>,
}

impl UpdateGoalCmd {
    #[must_use]
    pub fn new(owner: OwnerContext, goal_id: Uuid) -> Self {
        Self {
            owner,
            goal_id,
            title: None,
            target_amount_minor: None,
            current_amount_minor: None,
            deadline: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn target_amount_minor(mut self, target_amount_minor: i64) -> Self {
        self.target_amount_minor = Some(target_amount_minor);
        self
    }

    #[must_use]
    pub fn current_amount_minor(mut self, current_amount_minor: i64) -> Self {
        self.current_amount_minor = Some(current_amount_minor);
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Create a wishlist item.
#[derive(Clone, Debug)]
pub struct NewWishlistItemCmd {
    pub owner: OwnerContext,
    pub title: String,
    pub target_amount_minor: i64,
    pub priority: Priority,
}

impl NewWishlistItemCmd {
    #[must_use]
    pub fn new(
        owner: OwnerContext,
        title: impl Into<String>,
        target_amount_minor: i64,
        priority: Priority,
    ) -> Self {
        Self {
            owner,
            title: title.into(),
            target_amount_minor,
            priority,
        }
    }
}

/// Update an existing wishlist item. Unset fields keep their stored value.
#[derive(Clone, Debug)]
pub struct UpdateWishlistItemCmd {
    pub owner: OwnerContext,
    pub item_id: Uuid,
    pub title: Option<String>,
    pub target_amount_minor: Option<i64>,
    pub saved_amount_minor: Option<i64>,
    pub priority: Option<Priority>,
}

impl UpdateWishlistItemCmd {
    #[must_use]
    pub fn new(owner: OwnerContext, item_id: Uuid) -> Self {
        Self {
            owner,
            item_id,
            title: None,
            target_amount_minor: None,
            saved_amount_minor: None,
            priority: None,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn target_amount_minor(mut self, target_amount_minor: i64) -> Self {
        self.target_amount_minor = Some(target_amount_minor);
        self
    }

    #[must_use]
    pub fn saved_amount_minor(mut self, saved_amount_minor: i64) -> Self {
        self.saved_amount_minor = Some(saved_amount_minor);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Apply money toward a savings goal or wishlist item.
///
/// `amount` is the raw locale-formatted input (e.g. `"300.000"`); the
/// workflow parses it and rejects non-positive results.
#[derive(Clone, Debug)]
pub struct ContributeCmd {
    pub owner: OwnerContext,
    pub target: ContributionTarget,
    pub amount: String,
    pub occurred_at: NaiveDate,
}

impl ContributeCmd {
    #[must_use]
    pub fn new(
        owner: OwnerContext,
        target: ContributionTarget,
        amount: impl Into<String>,
        occurred_at: NaiveDate,
    ) -> Self {
        Self {
            owner,
            target,
            amount: amount.into(),
            occurred_at,
        }
    }
}
