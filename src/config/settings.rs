//! Application settings loaded from the environment.
//!
//! Store URLs default to local `SQLite` files so a fresh checkout can run
//! without any setup; everything else is optional with conservative defaults.
//! `.env` loading happens in `main.rs` before this module is consulted.

use crate::core::checkout::MissingPricePolicy;
use crate::errors::{Error, Result};

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database URL for the relational order store
    pub order_database_url: String,
    /// Database URL for the catalog store
    pub catalog_database_url: String,
    /// Key that entitles a signup to the admin role, if configured
    pub admin_signup_key: Option<String>,
    /// What checkout does when a cart product has no current catalog price
    pub missing_price_policy: MissingPricePolicy,
    /// How often the reconciliation sweep runs, in seconds
    pub reconcile_interval_secs: u64,
    /// How old a pending order must be before the sweep touches it, in seconds
    pub reconcile_grace_secs: i64,
}

/// Loads the application configuration from environment variables.
///
/// Recognized variables: `ORDER_DATABASE_URL`, `CATALOG_DATABASE_URL`,
/// `ADMIN_SIGNUP_KEY`, `MISSING_PRICE_POLICY` (`reject` or `zero`),
/// `RECONCILE_INTERVAL_SECS`, `RECONCILE_GRACE_SECS`.
pub fn load_app_configuration() -> Result<AppConfig> {
    let order_database_url = std::env::var("ORDER_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/orders.sqlite".to_string());
    let catalog_database_url = std::env::var("CATALOG_DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/catalog.sqlite".to_string());

    let admin_signup_key = std::env::var("ADMIN_SIGNUP_KEY").ok();

    let missing_price_policy = match std::env::var("MISSING_PRICE_POLICY") {
        Ok(raw) => raw.parse()?,
        Err(_) => MissingPricePolicy::default(),
    };

    let reconcile_interval_secs = parse_secs("RECONCILE_INTERVAL_SECS", 60)?;
    let reconcile_grace_secs = i64::try_from(parse_secs("RECONCILE_GRACE_SECS", 120)?)
        .map_err(|_| Error::Config {
            message: "RECONCILE_GRACE_SECS out of range".to_string(),
        })?;

    Ok(AppConfig {
        order_database_url,
        catalog_database_url,
        admin_signup_key,
        missing_price_policy,
        reconcile_interval_secs,
        reconcile_grace_secs,
    })
}

fn parse_secs(var: &str, default: u64) -> Result<u64> {
    match std::env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| Error::Config {
            message: format!("{var} must be a whole number of seconds, got '{raw}'"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_policy_is_reject() {
        assert_eq!(MissingPricePolicy::default(), MissingPricePolicy::Reject);
    }

    #[test]
    fn test_policy_parse() {
        let reject: MissingPricePolicy = "reject".parse().unwrap();
        assert_eq!(reject, MissingPricePolicy::Reject);

        let zero: MissingPricePolicy = "zero".parse().unwrap();
        assert_eq!(zero, MissingPricePolicy::SubstituteZero);

        assert!("sometimes".parse::<MissingPricePolicy>().is_err());
    }
}
