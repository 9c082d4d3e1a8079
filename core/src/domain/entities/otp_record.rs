//! OTP record entity for email-based verification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 5;

/// Length of the OTP code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for OTP codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Minimum accepted length for a replacement password
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A persisted OTP record, the single source of truth for one in-progress
/// verification flow. The plaintext code is never part of this entity; only
/// its SHA-256 digest is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Opaque identifier assigned by the document store on creation
    pub id: String,

    /// Email address the code was issued for
    pub email: String,

    /// Hex-encoded SHA-256 digest of the 6-digit code
    pub otp_hash: String,

    /// Absolute expiry timestamp (creation time + 5 minutes)
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully matched
    pub verified: bool,

    /// Number of verification attempts made, counted before the outcome
    /// of each attempt is evaluated
    pub attempts: i32,
}

impl OtpRecord {
    /// Expiry is a predicate evaluated at read time; no background sweep
    /// enforces it.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the attempt budget is already spent.
    pub fn attempts_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// Attempts left before the record becomes terminal (0 if exceeded).
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempts).max(0)
    }
}

/// The unsaved shape of an OTP record. The store assigns the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOtpRecord {
    pub email: String,
    pub otp_hash: String,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
    pub attempts: i32,
}

impl NewOtpRecord {
    /// Create a fresh record in its initial state: unverified, zero attempts.
    pub fn new(email: String, otp_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            email,
            otp_hash,
            expires_at,
            verified: false,
            attempts: 0,
        }
    }

    /// Attach the store-assigned identifier, yielding the persisted entity.
    pub fn into_record(self, id: String) -> OtpRecord {
        OtpRecord {
            id,
            email: self.email,
            otp_hash: self.otp_hash,
            expires_at: self.expires_at,
            verified: self.verified,
            attempts: self.attempts,
        }
    }
}
