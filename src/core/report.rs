//! Admin reporting - two independent read-only aggregations, one per store.
//!
//! The revenue report sums settled order totals per calendar day in the order
//! store; the category report counts products per category in the catalog
//! store. The two queries share nothing and are only combined at the end into
//! a single [`SalesReport`].

use crate::{
    config::database::Stores,
    entities::{Order, Product, order, product},
    errors::Result,
};
use sea_orm::{FromQueryResult, QueryOrder, QuerySelect, prelude::*, sea_query::Expr};

/// Revenue aggregated over one calendar day.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct DailyRevenue {
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Sum of order totals created that day
    pub total_revenue: f64,
}

/// Product count for one catalog category.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct CategoryCount {
    /// The category
    pub category: String,
    /// How many products it contains
    pub total_products: i64,
}

/// The combined admin report across both stores.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesReport {
    /// Daily revenue from the order store, newest day first
    pub revenue_by_day: Vec<DailyRevenue>,
    /// Product counts per category from the catalog store, largest first
    pub products_by_category: Vec<CategoryCount>,
}

/// Sums settled order totals per calendar day, newest day first.
///
/// Pending orders are excluded: until a checkout settles, its revenue is not
/// considered earned.
pub async fn revenue_by_day(db: &DatabaseConnection) -> Result<Vec<DailyRevenue>> {
    Order::find()
        .select_only()
        .column_as(Expr::cust("DATE(created_at)"), "date")
        .column_as(order::Column::Total.sum(), "total_revenue")
        .filter(order::Column::Status.eq(order::STATUS_SETTLED))
        .group_by(Expr::cust("DATE(created_at)"))
        .order_by_desc(Expr::cust("DATE(created_at)"))
        .into_model::<DailyRevenue>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts catalog products per category, largest category first.
pub async fn products_by_category(db: &DatabaseConnection) -> Result<Vec<CategoryCount>> {
    Product::find()
        .select_only()
        .column(product::Column::Category)
        .column_as(product::Column::Id.count(), "total_products")
        .group_by(product::Column::Category)
        .order_by_desc(Expr::cust("total_products"))
        .into_model::<CategoryCount>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Runs both aggregations and combines them into one report.
pub async fn generate_sales_report(stores: &Stores) -> Result<SalesReport> {
    let revenue = revenue_by_day(&stores.orders).await?;
    let categories = products_by_category(&stores.catalog).await?;

    Ok(SalesReport {
        revenue_by_day: revenue,
        products_by_category: categories,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::checkout::CheckoutService;
    use crate::test_utils::{
        add_test_cart_item, create_custom_product, create_test_product, setup_test_stores,
    };

    #[tokio::test]
    async fn test_revenue_by_day_sums_settled_orders() -> Result<()> {
        let stores = setup_test_stores().await?;
        let service = CheckoutService::default();

        let a = create_test_product(&stores.catalog, "SKU-A", 100.0).await?;

        // Two checkouts on the same day
        add_test_cart_item(&stores.orders, 1, &a.id, 1).await?;
        service.place_order(&stores, 1).await?;
        add_test_cart_item(&stores.orders, 2, &a.id, 2).await?;
        service.place_order(&stores, 2).await?;

        let report = revenue_by_day(&stores.orders).await?;
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total_revenue, 300.0);
        assert_eq!(
            report[0].date,
            chrono::Utc::now().format("%Y-%m-%d").to_string()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_revenue_by_day_empty() -> Result<()> {
        let stores = setup_test_stores().await?;

        let report = revenue_by_day(&stores.orders).await?;
        assert!(report.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_products_by_category_counts() -> Result<()> {
        let stores = setup_test_stores().await?;

        create_custom_product(&stores.catalog, "SKU-1", "Kettle", 45.0, "kitchen").await?;
        create_custom_product(&stores.catalog, "SKU-2", "Lamp", 27.5, "office").await?;
        create_custom_product(&stores.catalog, "SKU-3", "Chair", 120.0, "office").await?;

        let counts = products_by_category(&stores.catalog).await?;
        assert_eq!(counts.len(), 2);

        // Largest category first
        assert_eq!(counts[0].category, "office");
        assert_eq!(counts[0].total_products, 2);
        assert_eq!(counts[1].category, "kitchen");
        assert_eq!(counts[1].total_products, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_sales_report_combines_both_stores() -> Result<()> {
        let stores = setup_test_stores().await?;
        let service = CheckoutService::default();

        let a = create_custom_product(&stores.catalog, "SKU-1", "Kettle", 45.0, "kitchen").await?;
        add_test_cart_item(&stores.orders, 1, &a.id, 1).await?;
        service.place_order(&stores, 1).await?;

        let report = generate_sales_report(&stores).await?;
        assert_eq!(report.revenue_by_day.len(), 1);
        assert_eq!(report.revenue_by_day[0].total_revenue, 45.0);
        assert_eq!(report.products_by_category.len(), 1);
        assert_eq!(report.products_by_category[0].category, "kitchen");

        Ok(())
    }
}
