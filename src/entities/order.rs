//! Order entity - the immutable, historical record of a completed purchase.
//!
//! Created exactly once per successful checkout. `total` is a derived,
//! persisted snapshot and is never recomputed after creation. The only
//! permitted mutation is the `pending` to `settled` status transition once the
//! owner's cart has been cleared; an order stuck in `pending` marks an
//! interrupted checkout for the reconciliation sweep.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status of an order whose cart has not yet been cleared.
pub const STATUS_PENDING: &str = "pending";
/// Status of a fully committed order.
pub const STATUS_SETTLED: &str = "settled";

/// Order database model (order store)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the order; an authenticated principal id from the auth
    /// collaborator
    pub user_id: i64,
    /// Sum over order lines of `quantity * price_at_purchase`, fixed at commit
    pub total: f64,
    /// `"pending"` until the cart is cleared, then `"settled"`
    pub status: String,
    /// Per-checkout-attempt idempotency token
    #[sea_orm(unique)]
    pub checkout_token: String,
    /// When the order was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between orders and other order-store entities.
/// The owner is referenced by plain id (auth is an external collaborator).
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order owns its order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
