//! Store connection management for the two-store layout.
//!
//! The order store (users, cart lines, orders) and the catalog store (products)
//! are independent databases and never share a connection or a transaction.
//! This module connects both, bundles them in [`Stores`], and creates each
//! store's tables using `SeaORM`'s `Schema::create_table_from_entity` so the
//! schema always matches the Rust entity definitions without manual SQL.

use crate::entities::{CartItem, Order, OrderItem, Product, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// The two independent data stores the checkout core reconciles.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Relational store owning users, cart lines, orders, and order lines
    pub orders: DatabaseConnection,
    /// Catalog store owning products and their mutable prices
    pub catalog: DatabaseConnection,
}

/// Connects to both stores from their database URLs.
pub async fn connect_stores(order_url: &str, catalog_url: &str) -> Result<Stores> {
    let orders = Database::connect(order_url).await?;
    let catalog = Database::connect(catalog_url).await?;
    Ok(Stores { orders, catalog })
}

/// Creates the order-store tables from the entity definitions.
pub async fn create_order_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let cart_item_table = schema.create_table_from_entity(CartItem);
    let order_table = schema.create_table_from_entity(Order);
    let order_item_table = schema.create_table_from_entity(OrderItem);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&cart_item_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;

    Ok(())
}

/// Creates the catalog-store tables from the entity definitions.
pub async fn create_catalog_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let product_table = schema.create_table_from_entity(Product);
    db.execute(builder.build(&product_table)).await?;

    Ok(())
}

/// Creates all tables in both stores.
pub async fn create_all_tables(stores: &Stores) -> Result<()> {
    create_order_tables(&stores.orders).await?;
    create_catalog_tables(&stores.catalog).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        cart_item::Model as CartItemModel, order::Model as OrderModel,
        order_item::Model as OrderItemModel, product::Model as ProductModel,
        user::Model as UserModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_order_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_order_tables(&db).await?;

        // Tables exist if we can query them
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<CartItemModel> = CartItem::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderItemModel> = OrderItem::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_catalog_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_catalog_tables(&db).await?;

        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_connect_and_create_all() -> Result<()> {
        let stores = connect_stores("sqlite::memory:", "sqlite::memory:").await?;
        create_all_tables(&stores).await?;

        let _: Vec<UserModel> = User::find().limit(1).all(&stores.orders).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&stores.catalog).await?;

        Ok(())
    }
}
