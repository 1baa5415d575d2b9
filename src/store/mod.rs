use async_trait::async_trait;

pub mod memory;
pub mod model;
pub mod postgres;

pub use memory::MemoryStore;
pub use model::{NewUser, UserFilter, UserPatch, UserRecord};
pub use postgres::PgUserStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Identifier did not parse as a store id. Distinct from "no record
    /// matched" so handlers can answer differently.
    #[error("invalid id: {0}")]
    InvalidId(String),

    /// Required-field validation at the schema boundary.
    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Document-store boundary for user records. One implementation talks to
/// postgres, one keeps records in memory for tests and local runs.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Exact-equality match on the filter's present fields.
    async fn find_one(&self, filter: &UserFilter) -> Result<Option<UserRecord>, StoreError>;

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Partial field merge; returns the post-update record, or `None` when
    /// no record matched the id.
    async fn update_by_id(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Returns the removed record, or `None` when nothing matched.
    async fn delete_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;
}
