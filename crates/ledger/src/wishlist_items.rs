//! Wishlist item primitives.
//!
//! Structurally a savings goal with a priority instead of a deadline; the
//! contribution workflow treats both as funding targets.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, ResultLedger, stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Sort rank, most urgent first.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(LedgerError::validation(
                "priority",
                format!("invalid priority: {other}"),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub target_amount_minor: i64,
    pub saved_amount_minor: i64,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    pub(crate) fn new(
        owner_id: String,
        title: String,
        target_amount_minor: i64,
        priority: Priority,
    ) -> ResultLedger<Self> {
        if target_amount_minor <= 0 {
            return Err(LedgerError::validation("target_amount", "must be positive"));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            target_amount_minor,
            saved_amount_minor: 0,
            priority,
            created_at: Utc::now(),
        })
    }

    /// Display progress toward the target, clamped to 0..=100.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        stats::progress_percent(self.saved_amount_minor, self.target_amount_minor)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wishlist_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub target_amount_minor: i64,
    pub saved_amount_minor: i64,
    pub priority: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&WishlistItem> for ActiveModel {
    fn from(item: &WishlistItem) -> Self {
        Self {
            id: ActiveValue::Set(item.id.to_string()),
            owner_id: ActiveValue::Set(item.owner_id.clone()),
            title: ActiveValue::Set(item.title.clone()),
            target_amount_minor: ActiveValue::Set(item.target_amount_minor),
            saved_amount_minor: ActiveValue::Set(item.saved_amount_minor),
            priority: ActiveValue::Set(item.priority.as_str().to_string()),
            created_at: ActiveValue::Set(item.created_at),
        }
    }
}

impl TryFrom<Model> for WishlistItem {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::NotFound("wishlist item".to_string()))?,
            owner_id: model.owner_id,
            title: model.title,
            target_amount_minor: model.target_amount_minor,
            saved_amount_minor: model.saved_amount_minor,
            priority: Priority::try_from(model.priority.as_str())?,
            created_at: model.created_at,
        })
    }
}
