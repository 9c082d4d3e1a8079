//! User repository trait for the password-reset sub-path.

use async_trait::async_trait;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

/// Repository contract for the externally-owned user collection.
///
/// The OTP lifecycle never creates or deletes users; it only reads a single
/// user by email and overwrites the `password` field during a reset.
/// Hashing of the stored password, if any, is the identity component's
/// responsibility; this layer transports the value as-is.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address (single match expected).
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Overwrite the `password` field of the user with the given id.
    async fn update_password(&self, id: &str, new_password: &str) -> Result<(), DomainError>;
}
