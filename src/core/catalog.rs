//! Catalog business logic - product CRUD, search, and the Price Resolver.
//!
//! Everything here runs against the catalog store. Products carry mutable
//! prices; the checkout core only ever reads them (a projection, not copied
//! state), and copies the observed price into `price_at_purchase` at commit
//! time. Administrative mutation of prices is what makes that copy necessary.

use crate::{
    config::catalog::ProductConfig,
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{Condition, PaginatorTrait, QueryOrder, Set, prelude::*};
use std::collections::{HashMap, HashSet};
use tracing::info;
use uuid::Uuid;

/// Resolves current catalog prices for a set of product identifiers.
///
/// Identifiers are deduplicated internally, so duplicate cart references do
/// not cause duplicate lookups. Identifiers that no longer exist in the
/// catalog are simply absent from the result map - the mapping is NOT total,
/// and the Order Committer decides what a missing price means. Purely a read;
/// no side effects.
pub async fn resolve_prices(
    db: &DatabaseConnection,
    product_ids: &[String],
) -> Result<HashMap<String, f64>> {
    let unique: HashSet<&String> = product_ids.iter().collect();
    if unique.is_empty() {
        return Ok(HashMap::new());
    }

    let products = Product::find()
        .filter(product::Column::Id.is_in(unique.into_iter().cloned()))
        .all(db)
        .await?;

    Ok(products.into_iter().map(|p| (p.id, p.price)).collect())
}

/// Creates a new catalog product, performing input validation.
pub async fn create_product(
    db: &DatabaseConnection,
    sku: String,
    name: String,
    price: f64,
    category: String,
) -> Result<product::Model> {
    validate_product_fields(&sku, &name, price, &category)?;

    let exists = Product::find()
        .filter(product::Column::Sku.eq(&sku))
        .one(db)
        .await?;
    if exists.is_some() {
        return Err(Error::ProductExists { sku });
    }

    let now = chrono::Utc::now();
    let model = product::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        sku: Set(sku.trim().to_string()),
        name: Set(name.trim().to_string()),
        price: Set(price),
        category: Set(category.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a product by its string id.
pub async fn get_product(db: &DatabaseConnection, id: &str) -> Result<Option<product::Model>> {
    Product::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Updates a product's name, price, and category.
///
/// The sku is immutable once created; price changes here are exactly the
/// mutations that historical orders must be insulated from.
pub async fn update_product(
    db: &DatabaseConnection,
    id: &str,
    name: String,
    price: f64,
    category: String,
) -> Result<product::Model> {
    if name.trim().is_empty() || category.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name and category cannot be empty".to_string(),
        });
    }
    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidPrice { price });
    }

    let existing = Product::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound { id: id.to_string() })?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.price = Set(price);
    active.category = Set(category.trim().to_string());
    active.updated_at = Set(chrono::Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Deletes a product from the catalog.
///
/// Cart lines referencing the id are left in place; checkout surfaces them
/// through the missing-price policy.
pub async fn delete_product(db: &DatabaseConnection, id: &str) -> Result<()> {
    let result = Product::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: id.to_string() });
    }
    Ok(())
}

/// Price sort direction for catalog listings. Descending is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceSort {
    /// Highest price first
    #[default]
    Descending,
    /// Lowest price first
    Ascending,
}

/// Query parameters for catalog listings.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Substring match against name or sku
    pub search: Option<String>,
    /// Exact category filter
    pub category: Option<String>,
    /// 1-based page number; 0 is treated as 1
    pub page: u64,
    /// Page size; 0 falls back to 10
    pub limit: u64,
    /// Price sort direction
    pub sort: PriceSort,
}

/// One page of catalog listing results.
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// Total products matching the query, across all pages
    pub total: u64,
    /// The 1-based page that was fetched
    pub page: u64,
    /// Page size used
    pub limit: u64,
    /// Products on this page
    pub products: Vec<product::Model>,
}

/// Lists catalog products with search, category filter, price sort, and
/// pagination.
pub async fn list_products(db: &DatabaseConnection, query: &ProductQuery) -> Result<ProductPage> {
    let page = query.page.max(1);
    let limit = if query.limit == 0 { 10 } else { query.limit };

    let mut select = Product::find();

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        select = select.filter(
            Condition::any()
                .add(product::Column::Name.contains(search))
                .add(product::Column::Sku.contains(search)),
        );
    }

    if let Some(category) = query.category.as_deref().filter(|c| !c.trim().is_empty()) {
        select = select.filter(product::Column::Category.eq(category));
    }

    select = match query.sort {
        PriceSort::Ascending => select.order_by_asc(product::Column::Price),
        PriceSort::Descending => select.order_by_desc(product::Column::Price),
    };

    let paginator = select.paginate(db, limit);
    let total = paginator.num_items().await?;
    let products = paginator.fetch_page(page - 1).await?;

    Ok(ProductPage {
        total,
        page,
        limit,
        products,
    })
}

/// Seeds the catalog from configuration, skipping skus that already exist.
///
/// Returns how many products were inserted.
pub async fn seed_catalog(db: &DatabaseConnection, seeds: &[ProductConfig]) -> Result<usize> {
    let mut inserted = 0;
    for seed in seeds {
        let exists = Product::find()
            .filter(product::Column::Sku.eq(&seed.sku))
            .one(db)
            .await?;
        if exists.is_some() {
            continue;
        }

        create_product(
            db,
            seed.sku.clone(),
            seed.name.clone(),
            seed.price,
            seed.category.clone(),
        )
        .await?;
        inserted += 1;
    }

    if inserted > 0 {
        info!(inserted, "Seeded catalog products from configuration");
    }
    Ok(inserted)
}

fn validate_product_fields(sku: &str, name: &str, price: f64, category: &str) -> Result<()> {
    if sku.trim().is_empty() || name.trim().is_empty() || category.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product sku, name, and category cannot be empty".to_string(),
        });
    }
    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidPrice { price });
    }
    Ok(())
}
