use sqlx::PgPool;
use uuid::Uuid;

use super::{NewUser, StoreError, UserFilter, UserPatch, UserRecord, UserStore};
use async_trait::async_trait;

const COLUMNS: &str = "id, name, account_type, password, created_at, updated_at";

/// User store backed by a postgres `users` table via sqlx.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `users` table if it does not exist yet. Run once at
    /// process start.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL,
                account_type TEXT NOT NULL,
                password TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn parse_id(id: &str) -> Result<Uuid, StoreError> {
        Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }

    fn validate_required(user: &NewUser) -> Result<(), StoreError> {
        if user.name.is_empty() {
            return Err(StoreError::Validation("Name is required.".to_string()));
        }
        if user.account_type.is_empty() {
            return Err(StoreError::Validation("Account type is required.".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        let users = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let id = Self::parse_id(id)?;
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_one(&self, filter: &UserFilter) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {COLUMNS} FROM users \
             WHERE ($1::text IS NULL OR name = $1) \
               AND ($2::text IS NULL OR account_type = $2) \
               AND ($3::text IS NULL OR password = $3) \
             LIMIT 1"
        ))
        .bind(filter.name.as_deref())
        .bind(filter.account_type.as_deref())
        .bind(filter.password.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        Self::validate_required(&user)?;
        let inserted = sqlx::query_as::<_, UserRecord>(&format!(
            "INSERT INTO users (name, account_type, password) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(&user.name)
        .bind(&user.account_type)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, StoreError> {
        let id = Self::parse_id(id)?;
        let updated = sqlx::query_as::<_, UserRecord>(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                account_type = COALESCE($3, account_type), \
                password = COALESCE($4, password), \
                updated_at = now() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.account_type.as_deref())
        .bind(patch.password.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let id = Self::parse_id(id)?;
        let removed = sqlx::query_as::<_, UserRecord>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(removed)
    }
}
