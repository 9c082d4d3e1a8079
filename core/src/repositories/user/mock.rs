//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// In-memory user repository for testing.
pub struct MockUserRepository {
    // id -> (record, password)
    users: Arc<RwLock<HashMap<String, (UserRecord, String)>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a user account, returning its id.
    pub async fn insert_user(&self, email: &str, password: &str) -> String {
        let id = Uuid::new_v4().to_string();
        let record = UserRecord {
            id: id.clone(),
            email: email.to_string(),
        };
        let mut users = self.users.write().await;
        users.insert(id.clone(), (record, password.to_string()));
        id
    }

    /// Current password of a user, for assertions.
    pub async fn password_of(&self, id: &str) -> Option<String> {
        let users = self.users.read().await;
        users.get(id).map(|(_, password)| password.clone())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|(record, _)| record.email == email)
            .map(|(record, _)| record.clone()))
    }

    async fn update_password(&self, id: &str, new_password: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let entry = users.get_mut(id).ok_or_else(|| DomainError::NotFound {
            resource: "UserRecord".to_string(),
        })?;
        entry.1 = new_password.to_string();
        Ok(())
    }
}
