use base64::Engine as _;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::{ActiveValue, Condition, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    ChangeEvent, ChangeKind, Collection, LedgerError, OwnerContext, ResultLedger, Transaction,
    TransactionKind, categories,
    commands::{NewTransactionCmd, UpdateTransactionCmd},
    transactions,
};

use super::{Ledger, normalize_optional_text, normalize_required_text};

/// Filters for listing transactions.
///
/// `from` is inclusive and `to` is exclusive (`[from, to)`).
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// If present, acts as an allow-list of kinds to return.
    pub kinds: Option<Vec<TransactionKind>>,
}

fn validate_list_filter(filter: &TransactionListFilter) -> ResultLedger<()> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from >= to
    {
        return Err(LedgerError::validation(
            "filter",
            "invalid range: from must be < to",
        ));
    }
    if filter.kinds.as_ref().is_some_and(|k| k.is_empty()) {
        return Err(LedgerError::validation("filter", "kinds must not be empty"));
    }
    Ok(())
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionListFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionListFilter) -> Self {
        if let Some(from) = filter.from {
            self = self.filter(transactions::Column::OccurredAt.gte(from));
        }
        if let Some(to) = filter.to {
            self = self.filter(transactions::Column::OccurredAt.lt(to));
        }
        if let Some(kinds) = &filter.kinds {
            let kinds: Vec<String> = kinds.iter().map(|k| k.as_str().to_string()).collect();
            self = self.filter(transactions::Column::Kind.is_in(kinds));
        }
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TransactionsCursor {
    occurred_at: NaiveDate,
    created_at: DateTime<Utc>,
    transaction_id: String,
}

impl TransactionsCursor {
    fn encode(&self) -> ResultLedger<String> {
        let bytes = serde_json::to_vec(self)
            .map_err(|_| LedgerError::validation("cursor", "invalid transactions cursor"))?;
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    fn decode(input: &str) -> ResultLedger<Self> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(input.as_bytes())
            .map_err(|_| LedgerError::validation("cursor", "invalid transactions cursor"))?;
        serde_json::from_slice::<Self>(&bytes)
            .map_err(|_| LedgerError::validation("cursor", "invalid transactions cursor"))
    }
}

impl Ledger {
    /// Records a new transaction and returns the stored row.
    pub async fn create_transaction(&self, cmd: NewTransactionCmd) -> ResultLedger<Transaction> {
        let title = normalize_required_text(&cmd.title, "title")?;
        let category = categories::normalize_category(&cmd.category)?;
        let tx = Transaction::new(
            cmd.owner.owner_id().to_string(),
            title,
            cmd.kind,
            cmd.amount_minor,
            category,
            cmd.occurred_at,
            normalize_optional_text(cmd.notes.as_deref()),
        )?;

        let model = transactions::ActiveModel::from(&tx)
            .insert(&self.database)
            .await?;
        let stored = Transaction::try_from(model)?;

        self.notifier().publish(ChangeEvent {
            collection: Collection::Transactions,
            kind: ChangeKind::Insert,
            affected_id: stored.id,
        });
        Ok(stored)
    }

    /// Applies the set fields of the command and returns the updated row.
    pub async fn update_transaction(&self, cmd: UpdateTransactionCmd) -> ResultLedger<Transaction> {
        let model = self.require_transaction(&cmd.owner, cmd.transaction_id).await?;

        let mut active = transactions::ActiveModel {
            id: ActiveValue::Set(model.id),
            ..Default::default()
        };
        if let Some(title) = cmd.title.as_deref() {
            active.title = ActiveValue::Set(normalize_required_text(title, "title")?);
        }
        if let Some(kind) = cmd.kind {
            active.kind = ActiveValue::Set(kind.as_str().to_string());
        }
        if let Some(amount_minor) = cmd.amount_minor {
            if amount_minor < 0 {
                return Err(LedgerError::validation("amount", "must not be negative"));
            }
            active.amount_minor = ActiveValue::Set(amount_minor);
        }
        if let Some(category) = cmd.category.as_deref() {
            active.category = ActiveValue::Set(categories::normalize_category(category)?);
        }
        if let Some(occurred_at) = cmd.occurred_at {
            active.occurred_at = ActiveValue::Set(occurred_at);
        }
        if let Some(notes) = cmd.notes.as_deref() {
            active.notes = ActiveValue::Set(normalize_optional_text(Some(notes)));
        }

        let updated = active.update(&self.database).await?;
        let stored = Transaction::try_from(updated)?;

        self.notifier().publish(ChangeEvent {
            collection: Collection::Transactions,
            kind: ChangeKind::Update,
            affected_id: stored.id,
        });
        Ok(stored)
    }

    /// Deletes one transaction.
    ///
    /// Deleting a contribution-created expense does not touch the goal it
    /// funded; the two are linked only at contribution time.
    pub async fn delete_transaction(
        &self,
        owner: &OwnerContext,
        transaction_id: Uuid,
    ) -> ResultLedger<()> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(transaction_id.to_string()))
            .filter(transactions::Column::OwnerId.eq(owner.owner_id()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound("transaction".to_string()));
        }

        self.notifier().publish(ChangeEvent {
            collection: Collection::Transactions,
            kind: ChangeKind::Delete,
            affected_id: transaction_id,
        });
        Ok(())
    }

    /// Returns one transaction.
    pub async fn transaction(
        &self,
        owner: &OwnerContext,
        transaction_id: Uuid,
    ) -> ResultLedger<Transaction> {
        let model = self.require_transaction(owner, transaction_id).await?;
        Transaction::try_from(model)
    }

    /// Lists the owner's most recent transactions.
    pub async fn list_transactions(
        &self,
        owner: &OwnerContext,
        limit: u64,
        filter: &TransactionListFilter,
    ) -> ResultLedger<Vec<Transaction>> {
        let (items, _next) = self
            .list_transactions_page(owner, limit, None, filter)
            .await?;
        Ok(items)
    }

    /// Lists the owner's transactions with cursor-based pagination.
    ///
    /// Pagination is newest → older by `(occurred_at DESC, created_at DESC,
    /// id DESC)`.
    pub async fn list_transactions_page(
        &self,
        owner: &OwnerContext,
        limit: u64,
        cursor: Option<&str>,
        filter: &TransactionListFilter,
    ) -> ResultLedger<(Vec<Transaction>, Option<String>)> {
        validate_list_filter(filter)?;

        let limit_plus_one = limit.saturating_add(1);
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner.owner_id()))
            .order_by_desc(transactions::Column::OccurredAt)
            .order_by_desc(transactions::Column::CreatedAt)
            .order_by_desc(transactions::Column::Id)
            .limit(limit_plus_one);

        if let Some(cursor) = cursor {
            let cursor = TransactionsCursor::decode(cursor)?;
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::OccurredAt.lt(cursor.occurred_at))
                    .add(
                        Condition::all()
                            .add(transactions::Column::OccurredAt.eq(cursor.occurred_at))
                            .add(transactions::Column::CreatedAt.lt(cursor.created_at)),
                    )
                    .add(
                        Condition::all()
                            .add(transactions::Column::OccurredAt.eq(cursor.occurred_at))
                            .add(transactions::Column::CreatedAt.eq(cursor.created_at))
                            .add(transactions::Column::Id.lt(cursor.transaction_id.clone())),
                    ),
            );
        }
        query = query.apply_tx_filters(filter);

        let rows: Vec<transactions::Model> = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out: Vec<Transaction> = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(Transaction::try_from(model)?);
        }

        let next_cursor = out.last().map(|tx| TransactionsCursor {
            occurred_at: tx.occurred_at,
            created_at: tx.created_at,
            transaction_id: tx.id.to_string(),
        });
        let next_cursor = if has_more {
            next_cursor.map(|c| c.encode()).transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }

    pub(super) async fn require_transaction(
        &self,
        owner: &OwnerContext,
        transaction_id: Uuid,
    ) -> ResultLedger<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id.to_string())
            .filter(transactions::Column::OwnerId.eq(owner.owner_id()))
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound("transaction".to_string()))
    }

    pub(super) async fn all_transactions(
        &self,
        owner: &OwnerContext,
    ) -> ResultLedger<Vec<Transaction>> {
        let rows: Vec<transactions::Model> = transactions::Entity::find()
            .filter(transactions::Column::OwnerId.eq(owner.owner_id()))
            .all(&self.database)
            .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }
}
