use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use super::{NewUser, StoreError, UserFilter, UserPatch, UserRecord, UserStore};
use async_trait::async_trait;

/// In-process user store with the same contract as [`super::PgUserStore`].
/// Used by the integration tests and handy for local runs without postgres.
#[derive(Default)]
pub struct MemoryStore {
    // Vec keeps insertion order for find_all.
    users: Mutex<Vec<UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_id(id: &str) -> Result<Uuid, StoreError> {
        Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let id = Self::parse_id(id)?;
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_one(&self, filter: &UserFilter) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| {
                filter.name.as_ref().map_or(true, |v| *v == u.name)
                    && filter.account_type.as_ref().map_or(true, |v| *v == u.account_type)
                    && filter.password.as_ref().map_or(true, |v| *v == u.password)
            })
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        if user.name.is_empty() {
            return Err(StoreError::Validation("Name is required.".to_string()));
        }
        if user.account_type.is_empty() {
            return Err(StoreError::Validation("Account type is required.".to_string()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            account_type: user.account_type,
            password: user.password,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: &UserPatch,
    ) -> Result<Option<UserRecord>, StoreError> {
        let id = Self::parse_id(id)?;
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            user.name = name.clone();
        }
        if let Some(account_type) = &patch.account_type {
            user.account_type = account_type.clone();
        }
        if let Some(password) = &patch.password {
            user.password = password.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let id = Self::parse_id(id)?;
        let mut users = self.users.lock().unwrap();
        let Some(pos) = users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        Ok(Some(users.remove(pos)))
    }
}
