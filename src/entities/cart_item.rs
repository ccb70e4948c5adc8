//! Cart line entity - a pending, mutable record of one product and quantity a
//! user intends to purchase.
//!
//! One row exists per `(user_id, product_id)` pair; `core::cart::add_to_cart`
//! enforces this with upsert-on-add semantics, incrementing `quantity` instead
//! of inserting a duplicate row. Rows are deleted individually by their owner
//! or in bulk when an order commits.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart line database model (order store)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the cart line; ascending ids give insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owner of the cart line; an authenticated principal id supplied by the
    /// auth collaborator, referenced without further validation
    pub user_id: i64,
    /// Catalog product id (string, since the catalog is a separate store)
    pub product_id: String,
    /// How many units the owner intends to purchase; always positive
    pub quantity: i32,
}

/// Cart lines reference their owner and product by plain id; the owner comes
/// from the auth collaborator and the product lives in the other store, so
/// neither is a relation here
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
