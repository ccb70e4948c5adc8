//! Unified error types for the crate.
//!
//! Variants split into two classes: validation faults that the client can
//! correct (empty cart, bad quantities, duplicate skus) and dependency faults
//! from the underlying stores, which propagate unchanged and abort whatever
//! step sequence was in flight.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Checkout was attempted against an empty cart. Client-correctable, not a
    /// server fault; no order is created.
    #[error("Cart is empty for user {user_id}")]
    CartEmpty {
        /// Owner whose cart had no lines
        user_id: i64,
    },

    /// One or more cart products could not be priced against the catalog and
    /// the missing-price policy is set to reject.
    #[error("No current price for product(s): {product_ids:?}")]
    PriceResolution {
        /// Product ids absent from the catalog at checkout time
        product_ids: Vec<String>,
    },

    /// Cart quantities must be positive.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Catalog prices must be finite and non-negative.
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// A product with this sku already exists in the catalog.
    #[error("Product with sku '{sku}' already exists")]
    ProductExists {
        /// The conflicting sku
        sku: String,
    },

    /// No catalog product with the given id.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The missing product id
        id: String,
    },

    /// No cart line with the given id belonging to the requesting owner.
    #[error("Cart item {id} not found for user {user_id}")]
    CartItemNotFound {
        /// The missing cart line id
        id: i64,
        /// The requesting owner
        user_id: i64,
    },

    /// No order with the given id.
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The missing order id
        id: i64,
    },

    /// A user is already registered under this email.
    #[error("User already exists with email '{email}'")]
    UserExists {
        /// The conflicting email
        email: String,
    },

    /// Login failed. Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Signup supplied an admin key that does not match the configured one.
    #[error("Invalid admin key")]
    InvalidAdminKey,

    /// A required field was missing or empty.
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Password hashing or verification machinery failed.
    #[error("Password hashing error: {message}")]
    PasswordHash {
        /// Underlying hasher error rendered as text
        message: String,
    },

    /// Configuration loading or parsing failed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A store call failed. Not client-correctable.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config files and the like).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error during startup.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
