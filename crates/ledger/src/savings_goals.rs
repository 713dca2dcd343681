//! Savings goal primitives.
//!
//! A goal accumulates money through the contribution workflow or direct
//! edits. `current_amount_minor` may exceed the target; storage is never
//! clamped, only display is.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, ResultLedger, stats};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub target_amount_minor: i64,
    pub current_amount_minor: i64,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub(crate) fn new(
        owner_id: String,
        title: String,
        target_amount_minor: i64,
        deadline: Option<NaiveDate>,
    ) -> ResultLedger<Self> {
        if target_amount_minor <= 0 {
            return Err(LedgerError::validation("target_amount", "must be positive"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            target_amount_minor,
            current_amount_minor: 0,
            deadline,
            created_at: Utc::now(),
        })
    }

    /// Display progress toward the target, clamped to 0..=100.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        stats::progress_percent(self.current_amount_minor, self.target_amount_minor)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub target_amount_minor: i64,
    pub current_amount_minor: i64,
    pub deadline: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&SavingsGoal> for ActiveModel {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: ActiveValue::Set(goal.id.to_string()),
            owner_id: ActiveValue::Set(goal.owner_id.clone()),
            title: ActiveValue::Set(goal.title.clone()),
            target_amount_minor: ActiveValue::Set(goal.target_amount_minor),
            current_amount_minor: ActiveValue::Set(goal.current_amount_minor),
            deadline: ActiveValue::Set(goal.deadline),
            created_at: ActiveValue::Set(goal.created_at),
        }
    }
}

impl TryFrom<Model> for SavingsGoal {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::NotFound("savings goal".to_string()))?,
            owner_id: model.owner_id,
            title: model.title,
            target_amount_minor: model.target_amount_minor,
            current_amount_minor: model.current_amount_minor,
            deadline: model.deadline,
            created_at: model.created_at,
        })
    }
}
