//! Document store implementation of the OTP repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use vm_core::domain::entities::otp_record::{NewOtpRecord, OtpRecord};
use vm_core::errors::DomainError;
use vm_core::repositories::OtpRepository;

use super::client::{DocStoreClient, Document};

const OTP_COLLECTION: &str = "otp_codes";

/// Wire shape of an OTP document. `expires_at` travels as an ISO-8601
/// timestamp string, which is what chrono's serde emits for `DateTime<Utc>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OtpDocument {
    email: String,
    otp_hash: String,
    expires_at: DateTime<Utc>,
    verified: bool,
    attempts: i32,
}

impl From<NewOtpRecord> for OtpDocument {
    fn from(record: NewOtpRecord) -> Self {
        Self {
            email: record.email,
            otp_hash: record.otp_hash,
            expires_at: record.expires_at,
            verified: record.verified,
            attempts: record.attempts,
        }
    }
}

impl Document<OtpDocument> {
    fn into_record(self) -> OtpRecord {
        OtpRecord {
            id: self.id,
            email: self.fields.email,
            otp_hash: self.fields.otp_hash,
            expires_at: self.fields.expires_at,
            verified: self.fields.verified,
            attempts: self.fields.attempts,
        }
    }
}

/// OTP repository backed by the `otp_codes` collection.
pub struct DocStoreOtpRepository {
    client: DocStoreClient,
}

impl DocStoreOtpRepository {
    pub fn new(client: DocStoreClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OtpRepository for DocStoreOtpRepository {
    async fn create(&self, record: NewOtpRecord) -> Result<OtpRecord, DomainError> {
        let created = self
            .client
            .create_document(OTP_COLLECTION, &OtpDocument::from(record))
            .await?;
        Ok(created.into_record())
    }

    async fn find_by_email(
        &self,
        email: &str,
        limit: usize,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        let documents: Vec<Document<OtpDocument>> = self
            .client
            .query(OTP_COLLECTION, "email", email, limit)
            .await?;
        Ok(documents.into_iter().map(Document::into_record).collect())
    }

    async fn update_attempts(&self, id: &str, attempts: i32) -> Result<(), DomainError> {
        self.client
            .update_document_fields(OTP_COLLECTION, id, &json!({ "attempts": attempts }))
            .await?;
        Ok(())
    }

    async fn mark_verified(&self, id: &str) -> Result<(), DomainError> {
        self.client
            .update_document_fields(OTP_COLLECTION, id, &json!({ "verified": true }))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.client.delete_document(OTP_COLLECTION, id).await?)
    }
}
