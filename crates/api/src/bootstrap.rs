//! Startup seeding of the first admin account.

use baja_db::models::admin::CreateAdmin;
use baja_db::repositories::AdminRepo;
use baja_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminSeed;

#[derive(Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("ADMIN_PASSWORD rejected: {0}")]
    WeakPassword(String),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create the configured admin unless an account with that username exists.
///
/// An existing account is left untouched, including its password.
pub async fn ensure_admin(
    pool: &DbPool,
    seed: &AdminSeed,
) -> Result<BootstrapOutcome, BootstrapError> {
    if AdminRepo::find_by_username(pool, &seed.username)
        .await?
        .is_some()
    {
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(BootstrapError::WeakPassword)?;
    let password_hash =
        hash_password(&seed.password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            username: seed.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Bootstrap admin created");
    Ok(BootstrapOutcome::Created)
}
