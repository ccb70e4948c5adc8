//! User entity - an authenticated principal in the order store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role assigned to ordinary shoppers.
pub const ROLE_CUSTOMER: &str = "customer";
/// Role assigned when signup presents the configured admin key.
pub const ROLE_ADMIN: &str = "admin";

/// User database model (order store)
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login email; unique
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 password hash; never the raw password
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// `"customer"` or `"admin"`
    pub role: String,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Users own cart lines and orders, but those reference the principal by
/// plain id only; session issuance (and therefore id validation) belongs to
/// the external auth collaborator
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
