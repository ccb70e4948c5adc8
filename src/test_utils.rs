//! Shared test utilities for `Cartwright`.
//!
//! This module provides common helper functions for setting up the two
//! in-memory test stores and creating test entities with sensible defaults.

use crate::{
    config::database::{Stores, create_all_tables},
    core::{cart, catalog},
    entities::{cart_item, product},
    errors::Result,
};

/// Creates both stores as in-memory `SQLite` databases with all tables
/// initialized. This is the standard setup for all integration tests.
pub async fn setup_test_stores() -> Result<Stores> {
    let orders = sea_orm::Database::connect("sqlite::memory:").await?;
    let catalog = sea_orm::Database::connect("sqlite::memory:").await?;
    let stores = Stores { orders, catalog };
    create_all_tables(&stores).await?;
    Ok(stores)
}

/// Creates a catalog product with sensible defaults.
///
/// # Defaults
/// * `name`: derived from the sku
/// * `category`: `"general"`
pub async fn create_test_product(
    db: &sea_orm::DatabaseConnection,
    sku: &str,
    price: f64,
) -> Result<product::Model> {
    catalog::create_product(
        db,
        sku.to_string(),
        format!("Test product {sku}"),
        price,
        "general".to_string(),
    )
    .await
}

/// Creates a catalog product with custom name and category.
pub async fn create_custom_product(
    db: &sea_orm::DatabaseConnection,
    sku: &str,
    name: &str,
    price: f64,
    category: &str,
) -> Result<product::Model> {
    catalog::create_product(
        db,
        sku.to_string(),
        name.to_string(),
        price,
        category.to_string(),
    )
    .await
}

/// Adds a cart line for the given owner via the normal upsert path.
pub async fn add_test_cart_item(
    db: &sea_orm::DatabaseConnection,
    user_id: i64,
    product_id: &str,
    quantity: i32,
) -> Result<cart_item::Model> {
    cart::add_to_cart(db, user_id, product_id.to_string(), quantity).await
}
