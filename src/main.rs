//! Service entrypoint: connects both stores, seeds the catalog, and runs the
//! reconciliation sweep that resolves orders stuck in `pending`.

use cartwright::config::{catalog as catalog_config, database, settings};
use cartwright::core::{catalog, checkout::CheckoutService};
use cartwright::errors::Result;
use dotenvy::dotenv;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = settings::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!(
        policy = ?app_config.missing_price_policy,
        "Loaded application configuration"
    );

    // 4. Connect both stores and create tables
    let stores = database::connect_stores(
        &app_config.order_database_url,
        &app_config.catalog_database_url,
    )
    .await
    .inspect(|_| info!("Connected to order and catalog stores"))
    .inspect_err(|e| error!("Failed to connect stores: {e}"))?;
    database::create_all_tables(&stores).await?;

    // 5. Seed the catalog if a config.toml is present
    if Path::new("config.toml").exists() {
        let seeds = catalog_config::load_default_config()?;
        let inserted = catalog::seed_catalog(&stores.catalog, &seeds.products).await?;
        info!(inserted, "Catalog seeding complete");
    }

    // 6. Run the reconciliation sweep until shut down
    let service = CheckoutService::new(app_config.missing_price_policy);
    let grace = chrono::Duration::seconds(app_config.reconcile_grace_secs);
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(app_config.reconcile_interval_secs));

    info!(
        interval_secs = app_config.reconcile_interval_secs,
        grace_secs = app_config.reconcile_grace_secs,
        "Reconciliation sweep running"
    );
    loop {
        interval.tick().await;
        match service.reconcile_pending_orders(&stores, grace).await {
            Ok(0) => {}
            Ok(reconciled) => info!(reconciled, "Reconciled pending orders"),
            Err(e) => error!("Reconciliation sweep failed: {e}"),
        }
    }
}
