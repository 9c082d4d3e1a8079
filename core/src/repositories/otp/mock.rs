//! Mock implementation of OtpRepository for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::{NewOtpRecord, OtpRecord};
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// In-memory OTP repository for testing.
///
/// Records are kept in insertion order so the bounded candidate scan in the
/// lifecycle service behaves like the real store's query ordering.
pub struct MockOtpRepository {
    records: Arc<RwLock<Vec<OtpRecord>>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write operation fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent query fail, as when the collection does not
    /// exist yet.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of all stored records, for assertions.
    pub async fn all(&self) -> Vec<OtpRecord> {
        self.records.read().await.clone()
    }

    /// Fetch a record by id, for assertions.
    pub async fn get(&self, id: &str) -> Option<OtpRecord> {
        self.records.read().await.iter().find(|r| r.id == id).cloned()
    }

    fn storage_error(&self) -> Option<DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Some(DomainError::Storage {
                message: "simulated store failure".to_string(),
            })
        } else {
            None
        }
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn create(&self, record: NewOtpRecord) -> Result<OtpRecord, DomainError> {
        if let Some(err) = self.storage_error() {
            return Err(err);
        }
        let created = record.into_record(Uuid::new_v4().to_string());
        let mut records = self.records.write().await;
        records.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &str,
        limit: usize,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Storage {
                message: "collection not found".to_string(),
            });
        }
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.email == email)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_attempts(&self, id: &str, attempts: i32) -> Result<(), DomainError> {
        if let Some(err) = self.storage_error() {
            return Err(err);
        }
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "OtpRecord".to_string(),
            })?;
        record.attempts = attempts;
        Ok(())
    }

    async fn mark_verified(&self, id: &str) -> Result<(), DomainError> {
        if let Some(err) = self.storage_error() {
            return Err(err);
        }
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "OtpRecord".to_string(),
            })?;
        record.verified = true;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        if let Some(err) = self.storage_error() {
            return Err(err);
        }
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }
}
