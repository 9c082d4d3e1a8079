//! OTP repository trait defining the interface for OTP record persistence.
//!
//! The backing store is a generic document store; `email` is not
//! unique-indexed there, so the lifecycle service enforces the
//! "at most one active record" rule itself on top of these primitives.

use async_trait::async_trait;

use crate::domain::entities::otp_record::{NewOtpRecord, OtpRecord};
use crate::errors::DomainError;

/// Repository contract for OTP record persistence operations.
///
/// The lifecycle service exclusively owns creation, mutation, and deletion
/// of OTP records; no other component writes to this collection.
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a new OTP record and return it with its store-assigned id.
    ///
    /// # Returns
    /// * `Ok(OtpRecord)` - The created record
    /// * `Err(DomainError)` - Persistence failed; surfaced to the caller,
    ///   never retried here
    async fn create(&self, record: NewOtpRecord) -> Result<OtpRecord, DomainError>;

    /// Fetch up to `limit` OTP records for an email address.
    ///
    /// The store offers only field-equality queries, so callers scan the
    /// bounded candidate list for the record state they need.
    async fn find_by_email(&self, email: &str, limit: usize)
        -> Result<Vec<OtpRecord>, DomainError>;

    /// Overwrite the attempt counter of an existing record.
    async fn update_attempts(&self, id: &str, attempts: i32) -> Result<(), DomainError>;

    /// Flip a record to `verified = true`.
    async fn mark_verified(&self, id: &str) -> Result<(), DomainError>;

    /// Delete a record by id.
    ///
    /// # Returns
    /// * `Ok(true)` - Record was deleted
    /// * `Ok(false)` - No record with that id
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
}
