use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored user document. The id and both timestamps are store-assigned;
/// the id never changes once assigned and `updated_at >= created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub account_type: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user. Duplicate names are allowed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub account_type: String,
    pub password: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub password: Option<String>,
}

impl UserPatch {
    /// Pulls the known user fields out of a request body; anything else in
    /// the body is ignored by the store.
    pub fn from_body(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            name: field("name"),
            account_type: field("account_type"),
            password: field("password"),
        }
    }
}

/// Equality filter over user fields; only present fields constrain the match.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub password: Option<String>,
}

impl UserFilter {
    pub fn credentials(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}
