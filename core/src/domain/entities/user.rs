//! User record projection used by the password-reset sub-path.
//!
//! User accounts are owned by an external identity component. The OTP
//! lifecycle only ever reads a user by email and overwrites the `password`
//! field through the repository, so this entity carries nothing else.

use serde::{Deserialize, Serialize};

/// Minimal view of a user document in the external identity collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Opaque identifier assigned by the document store
    pub id: String,

    /// Email address, the lookup key for the reset flow
    pub email: String,
}
