//! Identity adapter backed by the `user_profiles` and `user_attributes` tables.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use driveshare_core::error::{AppError, ErrorKind};
use driveshare_core::result::AppResult;
use driveshare_core::traits::IdentityProvider;
use driveshare_core::types::UserProfile;

#[derive(Debug, FromRow)]
struct ProfileRow {
    user_id: Uuid,
    first_name: Option<String>,
    last_name: Option<String>,
    full_name: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            full_name: row.full_name,
        }
    }
}

/// Postgres-backed identity profiles and per-user attributes.
#[derive(Debug, Clone)]
pub struct IdentityRepository {
    pool: PgPool,
}

impl IdentityRepository {
    /// Create a new identity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for IdentityRepository {
    async fn profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, first_name, last_name, full_name FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user profile", e))?;
        Ok(row.map(UserProfile::from))
    }

    async fn get_attribute(&self, user_id: Uuid, key: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT value FROM user_attributes WHERE user_id = $1 AND key = $2",
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read user attribute", e))
    }

    async fn set_attribute(&self, user_id: Uuid, key: &str, value: &str) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_attributes (user_id, key, value) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write user attribute", e))?;
        Ok(())
    }
}
