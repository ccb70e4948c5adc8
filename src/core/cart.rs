//! Cart business logic - the Cart Reader and cart maintenance operations.
//!
//! Cart lines are owned by the requesting user for their whole lifetime: they
//! are created on first add, incremented on repeat adds (upsert-on-add keeps
//! one row per `(user, product)` pair), removed individually by their owner,
//! and cleared in bulk when an order commits. All reads and writes go against
//! the order store.

use crate::{
    entities::{CartItem, cart_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Returns all cart lines for the given owner, in insertion order.
///
/// An empty vec signals "nothing to check out", not a fault. Insertion order
/// (ascending row id) is for line-item display only; nothing downstream may
/// depend on it for correctness.
pub async fn list_cart_items(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<cart_item::Model>> {
    CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Adds a product to the owner's cart, incrementing quantity if it is already
/// present.
///
/// This upsert enforces the one-row-per-`(user, product)` invariant: adding a
/// product that is already in the cart updates the existing line instead of
/// inserting a duplicate. The lookup and the write run inside one order-store
/// transaction.
pub async fn add_to_cart(
    db: &DatabaseConnection,
    user_id: i64,
    product_id: String,
    quantity: i32,
) -> Result<cart_item::Model> {
    if quantity <= 0 {
        return Err(Error::InvalidQuantity { quantity });
    }

    let txn = db.begin().await?;

    let existing = CartItem::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::ProductId.eq(&product_id))
        .one(&txn)
        .await?;

    let item = match existing {
        Some(line) => {
            let new_quantity = line.quantity + quantity;
            let mut active: cart_item::ActiveModel = line.into();
            active.quantity = Set(new_quantity);
            active.update(&txn).await?
        }
        None => {
            cart_item::ActiveModel {
                user_id: Set(user_id),
                product_id: Set(product_id),
                quantity: Set(quantity),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;
    Ok(item)
}

/// Removes a single cart line, scoped to its owner.
///
/// The owner filter means one user cannot delete another user's cart line by
/// guessing ids; a non-matching id reports `CartItemNotFound`.
pub async fn remove_from_cart(db: &DatabaseConnection, user_id: i64, item_id: i64) -> Result<()> {
    let result = CartItem::delete_many()
        .filter(cart_item::Column::Id.eq(item_id))
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::CartItemNotFound {
            id: item_id,
            user_id,
        });
    }

    Ok(())
}

/// Deletes all of the owner's cart lines, returning how many were removed.
///
/// Used by checkout after the order is persisted and by the reconciliation
/// sweep. Zero is a valid result (the cart was already empty).
pub async fn clear_cart(db: &DatabaseConnection, user_id: i64) -> Result<u64> {
    let result = CartItem::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
