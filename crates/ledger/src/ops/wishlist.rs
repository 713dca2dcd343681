use uuid::Uuid;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    ChangeEvent, ChangeKind, Collection, LedgerError, OwnerContext, ResultLedger, WishlistItem,
    commands::{NewWishlistItemCmd, UpdateWishlistItemCmd},
    wishlist_items,
};

use super::{Ledger, normalize_required_text};

impl Ledger {
    /// Creates a wishlist item starting at zero saved.
    pub async fn create_wishlist_item(
        &self,
        cmd: NewWishlistItemCmd,
    ) -> ResultLedger<WishlistItem> {
        let title = normalize_required_text(&cmd.title, "title")?;
        let item = WishlistItem::new(
            cmd.owner.owner_id().to_string(),
            title,
            cmd.target_amount_minor,
            cmd.priority,
        )?;

        let model = wishlist_items::ActiveModel::from(&item)
            .insert(&self.database)
            .await?;
        let stored = WishlistItem::try_from(model)?;

        self.notifier().publish(ChangeEvent {
            collection: Collection::WishlistItems,
            kind: ChangeKind::Insert,
            affected_id: stored.id,
        });
        Ok(stored)
    }

    /// Applies the set fields of the command and returns the updated row.
    pub async fn update_wishlist_item(
        &self,
        cmd: UpdateWishlistItemCmd,
    ) -> ResultLedger<WishlistItem> {
        let model = self.require_wishlist_item(&cmd.owner, cmd.item_id).await?;

        let mut active = wishlist_items::ActiveModel {
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
        if let Some(saved_amount_minor) = cmd.saved_amount_minor {
            if saved_amount_minor < 0 {
                return Err(LedgerError::validation(
                    "saved_amount",
                    "must not be negative",
                ));
            }
            active.saved_amount_minor = ActiveValue::Set(saved_amount_minor);
        }
        if let Some(priority) = cmd.priority {
            active.priority = ActiveValue::Set(priority.as_str().to_string());
        }

        let updated = active.update(&self.database).await?;
        let stored = WishlistItem::try_from(updated)?;

        self.notifier().publish(ChangeEvent {
            collection: Collection::WishlistItems,
            kind: ChangeKind::Update,
            affected_id: stored.id,
        });
        Ok(stored)
    }

    /// Deletes one wishlist item. Transactions it was funded by stay.
    pub async fn delete_wishlist_item(
        &self,
        owner: &OwnerContext,
        item_id: Uuid,
    ) -> ResultLedger<()> {
        let result = wishlist_items::Entity::delete_many()
            .filter(wishlist_items::Column::Id.eq(item_id.to_string()))
            .filter(wishlist_items::Column::OwnerId.eq(owner.owner_id()))
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(LedgerError::NotFound("wishlist item".to_string()));
        }

        self.notifier().publish(ChangeEvent {
            collection: Collection::WishlistItems,
            kind: ChangeKind::Delete,
            affected_id: item_id,
        });
        Ok(())
    }

    /// Returns one wishlist item.
    pub async fn wishlist_item(
        &self,
        owner: &OwnerContext,
        item_id: Uuid,
    ) -> ResultLedger<WishlistItem> {
        let model = self.require_wishlist_item(owner, item_id).await?;
        WishlistItem::try_from(model)
    }

    /// Lists the owner's wishlist, most urgent priority first, then most
    /// recent first within a priority.
    pub async fn list_wishlist_items(
        &self,
        owner: &OwnerContext,
    ) -> ResultLedger<Vec<WishlistItem>> {
        let rows: Vec<wishlist_items::Model> = wishlist_items::Entity::find()
            .filter(wishlist_items::Column::OwnerId.eq(owner.owner_id()))
            .order_by_desc(wishlist_items::Column::CreatedAt)
            .order_by_desc(wishlist_items::Column::Id)
            .all(&self.database)
            .await?;
        let mut items: Vec<WishlistItem> = rows
            .into_iter()
            .map(WishlistItem::try_from)
            .collect::<ResultLedger<_>>()?;
        // Priority ranks do not sort lexicographically, so order in memory.
        items.sort_by_key(|item| item.priority.rank());
        Ok(items)
    }

    pub(super) async fn require_wishlist_item(
        &self,
        owner: &OwnerContext,
        item_id: Uuid,
    ) -> ResultLedger<wishlist_items::Model> {
        wishlist_items::Entity::find_by_id(item_id.to_string())
            .filter(wishlist_items::Column::OwnerId.eq(owner.owner_id()))
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound("wishlist item".to_string()))
    }
}
