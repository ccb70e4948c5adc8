//! User business logic - signup and login against the order store.
//!
//! Passwords are stored as argon2 hashes, never raw. Login reports a single
//! `InvalidCredentials` error for any mismatch so callers cannot probe which
//! part was wrong. Session/token issuance is deliberately not here; callers
//! take the verified user and hand it to whatever issues credentials.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Registers a new user.
///
/// The account gets the `customer` role unless `admin_key` is supplied and
/// matches the configured key, in which case it gets `admin`. Supplying a
/// wrong key is a hard rejection, not a silent downgrade.
pub async fn signup(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    password: &str,
    admin_key: Option<&str>,
    configured_admin_key: Option<&str>,
) -> Result<user::Model> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation {
            message: "Name, email, and password are required".to_string(),
        });
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::UserExists {
            email: email.to_string(),
        });
    }

    let role = match admin_key {
        Some(key) => {
            if configured_admin_key == Some(key) {
                user::ROLE_ADMIN
            } else {
                return Err(Error::InvalidAdminKey);
            }
        }
        None => user::ROLE_CUSTOMER,
    };

    let created = user::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email.trim().to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(user_id = created.id, role, "User registered");
    Ok(created)
}

/// Verifies credentials and returns the user.
///
/// Both "no such email" and "wrong password" collapse into
/// `InvalidCredentials`.
pub async fn login(db: &DatabaseConnection, email: &str, password: &str) -> Result<user::Model> {
    let user = User::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(Error::InvalidCredentials);
    }

    Ok(user)
}

fn hash_password(password: &str) -> Result<String> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_stores;

    #[tokio::test]
    async fn test_signup_and_login_roundtrip() -> Result<()> {
        let stores = setup_test_stores().await?;

        let created = signup(
            &stores.orders,
            "Ada",
            "ada@example.com",
            "hunter2",
            None,
            None,
        )
        .await?;

        assert_eq!(created.role, user::ROLE_CUSTOMER);
        // The raw password is never stored
        assert_ne!(created.password_hash, "hunter2");

        let logged_in = login(&stores.orders, "ada@example.com", "hunter2").await?;
        assert_eq!(logged_in.id, created.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() -> Result<()> {
        let stores = setup_test_stores().await?;

        signup(&stores.orders, "Ada", "ada@example.com", "pw", None, None).await?;
        let duplicate =
            signup(&stores.orders, "Eve", "ada@example.com", "pw2", None, None).await;

        assert!(matches!(duplicate.unwrap_err(), Error::UserExists { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_validation() -> Result<()> {
        let stores = setup_test_stores().await?;

        let missing = signup(&stores.orders, "", "a@b.c", "pw", None, None).await;
        assert!(matches!(missing.unwrap_err(), Error::Validation { .. }));

        let no_password = signup(&stores.orders, "Ada", "a@b.c", "", None, None).await;
        assert!(matches!(no_password.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_admin_key() -> Result<()> {
        let stores = setup_test_stores().await?;

        let admin = signup(
            &stores.orders,
            "Root",
            "root@example.com",
            "pw",
            Some("sesame"),
            Some("sesame"),
        )
        .await?;
        assert_eq!(admin.role, user::ROLE_ADMIN);

        let wrong_key = signup(
            &stores.orders,
            "Mallory",
            "mallory@example.com",
            "pw",
            Some("guess"),
            Some("sesame"),
        )
        .await;
        assert!(matches!(wrong_key.unwrap_err(), Error::InvalidAdminKey));

        // No key configured at all: presenting one can never succeed
        let unconfigured = signup(
            &stores.orders,
            "Trent",
            "trent@example.com",
            "pw",
            Some("sesame"),
            None,
        )
        .await;
        assert!(matches!(unconfigured.unwrap_err(), Error::InvalidAdminKey));

        Ok(())
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() -> Result<()> {
        let stores = setup_test_stores().await?;

        signup(&stores.orders, "Ada", "ada@example.com", "hunter2", None, None).await?;

        let wrong_password = login(&stores.orders, "ada@example.com", "hunter3").await;
        assert!(matches!(
            wrong_password.unwrap_err(),
            Error::InvalidCredentials
        ));

        let unknown_email = login(&stores.orders, "nobody@example.com", "hunter2").await;
        assert!(matches!(
            unknown_email.unwrap_err(),
            Error::InvalidCredentials
        ));

        Ok(())
    }
}
