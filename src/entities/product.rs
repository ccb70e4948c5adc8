//! Product entity - the catalog store's record of a sellable item.
//!
//! Lives in the catalog store, never the order store; the checkout core treats
//! it as a read-only price projection. The string primary key mirrors the
//! document-store identifiers that cart and order lines carry.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model (catalog store)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique string identifier (uuid), referenced by cart and order lines
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Stock-keeping unit; unique within the catalog
    #[sea_orm(unique)]
    pub sku: String,
    /// Display name
    pub name: String,
    /// Current price; mutable by the admin catalog path, which is exactly why
    /// checkout copies it into `price_at_purchase`
    pub price: f64,
    /// Category used for filtering and reporting
    pub category: String,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last updated
    pub updated_at: DateTimeUtc,
}

/// Products have no relations; the catalog store holds nothing else
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
