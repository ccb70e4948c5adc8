//! Catalog seeding configuration from config.toml
//!
//! This module loads an optional list of products used to seed the catalog
//! store on first run. Seeding is idempotent: products whose sku already
//! exists are left untouched.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of products to seed into the catalog
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Stock-keeping unit; must be unique in the catalog
    pub sku: String,
    /// Display name
    pub name: String,
    /// Initial price
    pub price: f64,
    /// Category used for filtering and reporting
    pub category: String,
}

/// Loads catalog seed configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads catalog seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
