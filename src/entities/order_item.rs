//! Order line entity - one priced component of a completed purchase.
//!
//! `price_at_purchase` is a point-in-time copy of the catalog price at the
//! moment the owning order was created. It must never be re-derived from the
//! catalog: catalog prices are mutable and orders must remain historically
//! accurate.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order line database model (order store)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the order line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning order
    pub order_id: i64,
    /// Catalog product id captured from the cart line
    pub product_id: String,
    /// Units purchased
    pub quantity: i32,
    /// Catalog price observed at order creation; never updated afterwards
    pub price_at_purchase: f64,
}

/// Defines relationships between order lines and other order-store entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
