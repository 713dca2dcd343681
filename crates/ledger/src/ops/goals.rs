use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    ChangeEvent, ChangeKind, Collection, LedgerError, OwnerContext, ResultLedger, SavingsGoal,
    commands::{NewGoalCmd, UpdateGoalCmd},
    savings_goals,
};

use super::{Ledger, normalize_required_text};

impl Ledger {
    /// Creates a savings goal starting at zero accumulated.
    pub async fn create_goal(&self, cmd: NewGoalCmd) -> ResultLedger<SavingsGoal> {
        let title = normalize_required_text(&cmd.title, "title")?;
        let goal = SavingsGoal::new(
            cmd.owner.owner_id().to_string(),
            title,
            cmd.target_amount_minor,
            cmd.deadline,
        )?;

        let model = savings_goals::ActiveModel::from(&goal)
            .insert(&self.database)
            .await?;
        let stored = SavingsGoal::try_from(model)?;

        self.notifier().publish(ChangeEvent {
            collection: Collection::SavingsGoals,
            kind: ChangeKind::Insert,
            affected_id: stored.id,
        });
        Ok(stored)
    }

    /// Applies the set fields of the command and returns the updated row.
    ///
    /// This is the direct-edit path: `current_amount_minor` may be set to
    /// any non-negative value, including past the target.
    pub async fn update_goal(&self, cmd: UpdateGoalCmd) -> ResultLedger<SavingsGoal> {
        let model = self.require_goal(&cmd.owner, cmd.goal_id).await?;

        let mut active = savings_goals::ActiveModel {
            id: ActiveValue::Set(model.id),
            ..Default::default()
        };
        if let Some(title) = cmd.title.as_deref() {
            active.title = ActiveValue::Set(normalize_required_text(title, "title")?);
        }
        if let Some(target_amount_minor) = cmd.target_amount_minor {
            if target_amount_minor <= 0 {
                return Err(LedgerError::validation("target_amount", "must be positive"));
            }
            active.target_amount_minor = ActiveValue::Set(target_amount_minor);
        }
        if let Some(current_amount_minor) = cmd.current_amount_minor {
            if current_amount_minor < 0 {
                return Err(LedgerError::validation(
                    "current_amount",
                    "must not be negative",
                ));
            }
            active.current_amount_minor = ActiveValue::Set(current_amount_minor);
        }
        if let Some(deadline) = cmd.deadline {
            active.deadline = ActiveValue::Set(Some(deadline));
        }

        let updated = active.update(&self.database).await?;
        let stored = SavingsGoal::try_from(updated)?;

        self.notifier().publish(ChangeEvent {
            collection: Collection::SavingsGoals,
            kind: ChangeKind::Update,
            affected_id: stored.id,
        });
        Ok(stored)
    }

    /// Deletes one savings goal. Transactions it was funded by stay.
    pub async fn delete_goal(&self, owner: &OwnerContext, goal_id: Uuid) -> ResultLedger<()> {
        let result = savings_goals::Entity::delete_many()
            .filter(savings_goals::Column::Id.eq(goal_id.to_string()))
            .filter(savings_goals::Column::OwnerId.eq(owner.owner_id()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound("savings goal".to_string()));
        }

        self.notifier().publish(ChangeEvent {
            collection: Collection::SavingsGoals,
            kind: ChangeKind::Delete,
            affected_id: goal_id,
        });
        Ok(())
    }

    /// Returns one savings goal.
    pub async fn goal(&self, owner: &OwnerContext, goal_id: Uuid) -> ResultLedger<SavingsGoal> {
        let model = self.require_goal(owner, goal_id).await?;
        SavingsGoal::try_from(model)
    }

    /// Lists the owner's savings goals, most recent first.
    pub async fn list_goals(&self, owner: &OwnerContext) -> ResultLedger<Vec<SavingsGoal>> {
        let rows: Vec<savings_goals::Model> = savings_goals::Entity::find()
            .filter(savings_goals::Column::OwnerId.eq(owner.owner_id()))
            .order_by_desc(savings_goals::Column::CreatedAt)
            .order_by_desc(savings_goals::Column::Id)
            .all(&self.database)
            .await?;
        rows.into_iter().map(SavingsGoal::try_from).collect()
    }

    pub(super) async fn require_goal(
        &self,
        owner: &OwnerContext,
        goal_id: Uuid,
    ) -> ResultLedger<savings_goals::Model> {
        savings_goals::Entity::find_by_id(goal_id.to_string())
            .filter(savings_goals::Column::OwnerId.eq(owner.owner_id()))
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound("savings goal".to_string()))
    }

    pub(super) async fn all_goals(&self, owner: &OwnerContext) -> ResultLedger<Vec<SavingsGoal>> {
        let rows: Vec<savings_goals::Model> = savings_goals::Entity::find()
            .filter(savings_goals::Column::OwnerId.eq(owner.owner_id()))
            .all(&self.database)
            .await?;
        rows.into_iter().map(SavingsGoal::try_from).collect()
    }
}
