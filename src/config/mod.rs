/// Store connections, table creation, and the two-store bundle
pub mod database;

/// Catalog seeding configuration from config.toml
pub mod catalog;

/// Application settings loaded from the environment
pub mod settings;
