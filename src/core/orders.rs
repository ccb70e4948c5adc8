//! Order history queries.
//!
//! Orders and their lines are write-once: created by checkout, then read-only
//! for both the owning user and the system. History is served newest first.

use crate::{
    entities::{Order, OrderItem, order, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// An order header together with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithItems {
    /// The order header
    pub order: order::Model,
    /// Its lines, in insertion order
    pub items: Vec<order_item::Model>,
}

/// Returns all of a user's orders, newest first, each with its lines.
pub async fn list_orders_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<OrderWithItems>> {
    let orders = Order::find()
        .filter(order::Column::UserId.eq(user_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await?;

    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = orders.iter().map(|o| o.id).collect();
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.is_in(order_ids))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;

    let mut by_order: HashMap<i64, Vec<order_item::Model>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            OrderWithItems { order, items }
        })
        .collect())
}

/// Retrieves a single order with its lines, scoped to its owner.
pub async fn get_order_for_user(
    db: &DatabaseConnection,
    user_id: i64,
    order_id: i64,
) -> Result<OrderWithItems> {
    let order = Order::find_by_id(order_id)
        .filter(order::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order.id))
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await?;

    Ok(OrderWithItems { order, items })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::checkout::CheckoutService;
    use crate::test_utils::{add_test_cart_item, create_test_product, setup_test_stores};

    #[tokio::test]
    async fn test_list_orders_newest_first_with_items() -> Result<()> {
        let stores = setup_test_stores().await?;
        let service = CheckoutService::default();

        let a = create_test_product(&stores.catalog, "SKU-A", 10.0).await?;
        let b = create_test_product(&stores.catalog, "SKU-B", 20.0).await?;

        add_test_cart_item(&stores.orders, 1, &a.id, 1).await?;
        let first = service.place_order(&stores, 1).await?;

        add_test_cart_item(&stores.orders, 1, &a.id, 2).await?;
        add_test_cart_item(&stores.orders, 1, &b.id, 1).await?;
        let second = service.place_order(&stores, 1).await?;

        let history = list_orders_for_user(&stores.orders, 1).await?;
        assert_eq!(history.len(), 2);

        // Newest first
        assert_eq!(history[0].order.id, second.order.id);
        assert_eq!(history[0].items.len(), 2);
        assert_eq!(history[0].order.total, 40.0);

        assert_eq!(history[1].order.id, first.order.id);
        assert_eq!(history[1].items.len(), 1);
        assert_eq!(history[1].order.total, 10.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_empty_history() -> Result<()> {
        let stores = setup_test_stores().await?;

        let history = list_orders_for_user(&stores.orders, 99).await?;
        assert!(history.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_for_user_is_owner_scoped() -> Result<()> {
        let stores = setup_test_stores().await?;
        let service = CheckoutService::default();

        let a = create_test_product(&stores.catalog, "SKU-A", 10.0).await?;
        add_test_cart_item(&stores.orders, 1, &a.id, 1).await?;
        let receipt = service.place_order(&stores, 1).await?;

        let fetched = get_order_for_user(&stores.orders, 1, receipt.order.id).await?;
        assert_eq!(fetched.order, receipt.order);
        assert_eq!(fetched.items, receipt.items);

        // Another user cannot read it
        let denied = get_order_for_user(&stores.orders, 2, receipt.order.id).await;
        assert!(matches!(denied.unwrap_err(), Error::OrderNotFound { .. }));

        Ok(())
    }
}
