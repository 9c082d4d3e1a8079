//! Document store implementation of the user repository.
//!
//! User documents are owned by an external identity component; this
//! repository only reads them by email and writes the `password` field
//! during a reset. Fields beyond `email` are deliberately not modeled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use vm_core::domain::entities::user::UserRecord;
use vm_core::errors::DomainError;
use vm_core::repositories::UserRepository;

use super::client::{DocStoreClient, Document};

const USER_COLLECTION: &str = "users";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDocument {
    email: String,
}

/// User repository backed by the `users` collection.
pub struct DocStoreUserRepository {
    client: DocStoreClient,
}

impl DocStoreUserRepository {
    pub fn new(client: DocStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for DocStoreUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let documents: Vec<Document<UserDocument>> = self
            .client
            .query(USER_COLLECTION, "email", email, 1)
            .await?;
        Ok(documents.into_iter().next().map(|doc| UserRecord {
            id: doc.id,
            email: doc.fields.email,
        }))
    }

    async fn update_password(&self, id: &str, new_password: &str) -> Result<(), DomainError> {
        self.client
            .update_document_fields(USER_COLLECTION, id, &json!({ "password": new_password }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_document_ignores_unmodeled_fields() {
        let raw = r#"{"id":"user-1","email":"a@b.com","password":"x","name":"Alice"}"#;
        let document: Document<UserDocument> = serde_json::from_str(raw).unwrap();
        assert_eq!(document.id, "user-1");
        assert_eq!(document.fields.email, "a@b.com");
    }
}
