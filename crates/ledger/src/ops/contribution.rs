//! The contribution workflow.
//!
//! Applies money toward a savings goal or wishlist item by recording an
//! expense transaction and then raising the target's accumulated amount.
//! The two writes go to the store as separate per-row statements. When the
//! second write fails the first is not rolled back: the caller receives
//! [`LedgerError::PartialFailure`] naming the recorded transaction, so the
//! user can be told their money is logged as spent while the target total
//! is stale.

use uuid::Uuid;

use sea_orm::{ActiveValue, prelude::*};

use crate::{
    ChangeEvent, ChangeKind, Collection, LedgerError, ResultLedger, Rupiah, Transaction,
    TransactionKind, categories::SAVINGS_CATEGORY, commands::ContributeCmd, savings_goals,
    transactions, wishlist_items,
};

use super::Ledger;

const CONTRIBUTION_NOTE: &str = "Tabungan goal";

/// Target of a contribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContributionTarget {
    SavingsGoal(Uuid),
    WishlistItem(Uuid),
}

/// Receipt of a successful contribution.
#[derive(Clone, Debug)]
pub struct Contribution {
    /// The recorded expense.
    pub transaction: Transaction,
    /// The target's accumulated amount after the update.
    pub new_accumulated_minor: i64,
}

impl Ledger {
    /// Applies money toward a savings goal or wishlist item.
    ///
    /// Steps, in order:
    ///
    /// 1. Parse and validate the amount, then resolve the target. Nothing
    ///    is written when this fails.
    /// 2. Record the expense transaction (category `Tabungan`, title
    ///    derived from the target). A failure here is a total failure.
    /// 3. Raise the target's accumulated amount from the value read in
    ///    step 1. A failure here surfaces as `PartialFailure`: the expense
    ///    stays recorded and the target keeps its previous amount.
    ///
    /// The workflow never caps the accumulated amount at the target;
    /// completed targets are a presentation concern.
    pub async fn contribute(&self, cmd: ContributeCmd) -> ResultLedger<Contribution> {
        // Step 1: amount and target.
        let amount: Rupiah = cmd.amount.parse()?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(
                "contribution must be positive".to_string(),
            ));
        }
        let (target_title, accumulated_minor) = match cmd.target {
            ContributionTarget::SavingsGoal(goal_id) => {
                let model = self.require_goal(&cmd.owner, goal_id).await?;
                (model.title, model.current_amount_minor)
            }
            ContributionTarget::WishlistItem(item_id) => {
                let model = self.require_wishlist_item(&cmd.owner, item_id).await?;
                (model.title, model.saved_amount_minor)
            }
        };

        // Step 2: record the expense.
        let tx = Transaction::new(
            cmd.owner.owner_id().to_string(),
            format!("Menabung untuk {target_title}"),
            TransactionKind::Expense,
            amount.minor(),
            SAVINGS_CATEGORY.to_string(),
            cmd.occurred_at,
            Some(CONTRIBUTION_NOTE.to_string()),
        )?;
        let model = transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        let transaction = Transaction::try_from(model)?;
        self.notifier().publish(ChangeEvent {
            collection: Collection::Transactions,
            kind: ChangeKind::Insert,
            affected_id: transaction.id,
        });

        // Step 3: read-modify-write of the accumulated amount. The value
        // was read at workflow start; the store serializes row writes and
        // the last writer wins.
        match self
            .apply_contribution(&cmd, amount.minor(), accumulated_minor)
            .await
        {
            Ok(new_accumulated_minor) => {
                tracing::info!(
                    transaction = %transaction.id,
                    amount_minor = amount.minor(),
                    "contribution recorded",
                );
                Ok(Contribution {
                    transaction,
                    new_accumulated_minor,
                })
            }
            Err(source) => {
                tracing::warn!(
                    transaction = %transaction.id,
                    error = %source,
                    "target update failed after the expense was recorded",
                );
                Err(LedgerError::PartialFailure {
                    transaction_id: transaction.id,
                    source: Box::new(source),
                })
            }
        }
    }

    async fn apply_contribution(
        &self,
        cmd: &ContributeCmd,
        amount_minor: i64,
        accumulated_minor: i64,
    ) -> ResultLedger<i64> {
        let new_total = accumulated_minor
            .checked_add(amount_minor)
            .ok_or_else(|| LedgerError::InvalidAmount("accumulated amount overflow".to_string()))?;

        match cmd.target {
            ContributionTarget::SavingsGoal(goal_id) => {
                let active = savings_goals::ActiveModel {
                    id: ActiveValue::Set(goal_id.to_string()),
                    current_amount_minor: ActiveValue::Set(new_total),
                    ..Default::default()
                };
                active.update(&self.database).await?;
                self.notifier().publish(ChangeEvent {
                    collection: Collection::SavingsGoals,
                    kind: ChangeKind::Update,
                    affected_id: goal_id,
                });
            }
            ContributionTarget::WishlistItem(item_id) => {
                let active = wishlist_items::ActiveModel {
                    id: ActiveValue::Set(item_id.to_string()),
                    saved_amount_minor: ActiveValue::Set(new_total),
                    ..Default::default()
                };
                active.update(&self.database).await?;
                self.notifier().publish(ChangeEvent {
                    collection: Collection::WishlistItems,
                    kind: ChangeKind::Update,
                    affected_id: item_id,
                });
            }
        }
        Ok(new_total)
    }
}
