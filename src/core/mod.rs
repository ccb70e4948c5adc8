//! Core business logic - framework-agnostic operations over the two stores.
//!
//! Each submodule takes plain `DatabaseConnection`s (or the [`crate::config::database::Stores`]
//! bundle where both stores are involved) and returns `Result` values, leaving
//! transport and presentation concerns to callers.

/// Cart Reader and cart maintenance (order store)
pub mod cart;
/// Product catalog and Price Resolver (catalog store)
pub mod catalog;
/// Order Committer: the checkout pipeline and reconciliation sweep
pub mod checkout;
/// Order history queries (order store)
pub mod orders;
/// Admin reporting across both stores
pub mod report;
/// User signup and login (order store)
pub mod users;
