//! Main OTP lifecycle service implementation

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::otp_record::{NewOtpRecord, OtpRecord};
use crate::errors::{CleanupError, DomainResult, OtpError};
use crate::repositories::{OtpRepository, UserRepository};

use super::config::{OtpServiceConfig, UnknownUserPolicy};
use super::email_lock::EmailLockRegistry;
use super::email_utils::{is_valid_email, mask_email};
use super::generator;

/// A freshly issued OTP, returned to the direct caller only.
///
/// The caller is a trusted relay that performs out-of-band delivery; the
/// plaintext code must never be logged or persisted.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// The plaintext 6-digit code
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Successful terminal states of a verification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The code matched; the record remains, eligible for a follow-up
    /// password reset or cleanup by a later request.
    Verified,
    /// The code matched and the linked password update completed; the
    /// record is gone.
    PasswordReset,
}

/// OTP lifecycle service managing the per-email state machine:
/// creation, single-active-record enforcement, expiry, attempt counting,
/// verification, and the optional linked password update.
pub struct OtpService<O, U>
where
    O: OtpRepository,
    U: UserRepository,
{
    /// Repository for OTP record persistence
    otp_repository: Arc<O>,
    /// Repository for the externally-owned user collection
    user_repository: Arc<U>,
    /// Per-email serialization point for lifecycle operations
    locks: EmailLockRegistry,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<O, U> OtpService<O, U>
where
    O: OtpRepository,
    U: UserRepository,
{
    /// Create a new OTP lifecycle service
    pub fn new(otp_repository: Arc<O>, user_repository: Arc<U>, config: OtpServiceConfig) -> Self {
        Self {
            otp_repository,
            user_repository,
            locks: EmailLockRegistry::new(),
            config,
        }
    }

    /// Issue a new OTP for an email address.
    ///
    /// This method:
    /// 1. Validates the email format
    /// 2. Deletes any existing OTP records for the email (best effort)
    /// 3. Generates a fresh code and digest
    /// 4. Persists the new record with a 5-minute expiry
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedOtp)` - The plaintext code for out-of-band delivery
    /// * `Err(DomainError)` - If validation fails or persistence fails
    pub async fn request_otp(&self, email: &str) -> DomainResult<IssuedOtp> {
        if email.is_empty() {
            return Err(OtpError::MissingEmail.into());
        }
        if !is_valid_email(email) {
            return Err(OtpError::InvalidEmailFormat.into());
        }

        let _guard = self.locks.acquire(email).await;

        // Advisory cleanup: the collection may not exist yet on first-ever
        // use, and creation must still succeed, so failures are discarded.
        match self.purge_stale_records(email).await {
            Ok(purged) if purged > 0 => {
                tracing::info!(
                    email = %mask_email(email),
                    purged = purged,
                    event = "otp_superseded",
                    "Deleted prior OTP records before issuing a new code"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(
                    email = %mask_email(email),
                    error = %e,
                    event = "otp_cleanup_skipped",
                    "Cleanup before OTP creation failed; continuing"
                );
            }
        }

        let otp = generator::generate();
        let expires_at = Utc::now() + Duration::minutes(self.config.code_expiration_minutes);

        let record = self
            .otp_repository
            .create(NewOtpRecord::new(
                email.to_string(),
                otp.hash,
                expires_at,
            ))
            .await?;

        tracing::info!(
            email = %mask_email(email),
            record_id = %record.id,
            expires_at = %expires_at,
            event = "otp_generated",
            "Issued new OTP"
        );

        Ok(IssuedOtp {
            code: otp.code,
            expires_at,
        })
    }

    /// Verify a submitted code, optionally completing a password reset.
    ///
    /// With `new_password` absent this is step 1 of the flow and looks for
    /// an unverified record; with it present the caller asserts step 1
    /// already succeeded, so a record already marked verified is required.
    ///
    /// The attempt counter is incremented and persisted before expiry and
    /// digest checks, so a request that fails on either still burns an
    /// attempt.
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        new_password: Option<&str>,
    ) -> DomainResult<VerifyOutcome> {
        if email.is_empty() || otp.is_empty() {
            return Err(OtpError::MissingFields.into());
        }

        let _guard = self.locks.acquire(email).await;

        let want_verified = new_password.is_some();
        let record = self
            .otp_repository
            .find_by_email(email, self.config.lookup_limit)
            .await?
            .into_iter()
            .find(|r| r.verified == want_verified)
            .ok_or(OtpError::NotFound)?;

        if record.attempts_exhausted(self.config.max_attempts) {
            self.otp_repository.delete(&record.id).await?;
            tracing::warn!(
                email = %mask_email(email),
                record_id = %record.id,
                event = "otp_attempts_exhausted",
                "Attempt budget spent; record deleted"
            );
            return Err(OtpError::TooManyAttempts.into());
        }

        let attempts = record.attempts + 1;
        self.otp_repository
            .update_attempts(&record.id, attempts)
            .await?;

        if record.is_expired() {
            self.otp_repository.delete(&record.id).await?;
            tracing::info!(
                email = %mask_email(email),
                record_id = %record.id,
                event = "otp_expired",
                "Expired record deleted on verification attempt"
            );
            return Err(OtpError::Expired.into());
        }

        let submitted = generator::hash_code(otp);
        if !generator::digests_match(&submitted, &record.otp_hash) {
            let remaining = self.config.max_attempts - attempts;
            tracing::warn!(
                email = %mask_email(email),
                remaining = remaining,
                event = "otp_verification_failed",
                "Submitted code did not match"
            );
            return Err(OtpError::InvalidCode { remaining }.into());
        }

        self.otp_repository.mark_verified(&record.id).await?;
        tracing::info!(
            email = %mask_email(email),
            record_id = %record.id,
            event = "otp_verified",
            "Code verified"
        );

        match new_password {
            None => Ok(VerifyOutcome::Verified),
            Some(password) => self.complete_password_reset(email, &record, password).await,
        }
    }

    /// Step 2 of the reset flow: overwrite the user's password and consume
    /// the OTP record.
    async fn complete_password_reset(
        &self,
        email: &str,
        record: &OtpRecord,
        new_password: &str,
    ) -> DomainResult<VerifyOutcome> {
        if new_password.chars().count() < self.config.min_password_length {
            // The verified record stays untouched, eligible for a valid retry
            return Err(OtpError::WeakPassword {
                min_length: self.config.min_password_length,
            }
            .into());
        }

        match self.user_repository.find_by_email(email).await? {
            Some(user) => {
                self.user_repository
                    .update_password(&user.id, new_password)
                    .await?;
                tracing::info!(
                    email = %mask_email(email),
                    user_id = %user.id,
                    event = "password_reset",
                    "Password updated via OTP flow"
                );
            }
            None => match self.config.unknown_user_policy {
                UnknownUserPolicy::Ignore => {
                    tracing::warn!(
                        email = %mask_email(email),
                        event = "password_reset_no_user",
                        "No matching user; reporting success per policy"
                    );
                }
                UnknownUserPolicy::Reject => {
                    return Err(OtpError::UnknownUser.into());
                }
            },
        }

        self.otp_repository.delete(&record.id).await?;
        Ok(VerifyOutcome::PasswordReset)
    }

    /// Delete any existing OTP records for an email, up to the lookup bound.
    ///
    /// Advisory only; the caller discards the error.
    async fn purge_stale_records(&self, email: &str) -> Result<usize, CleanupError> {
        let existing = self
            .otp_repository
            .find_by_email(email, self.config.lookup_limit)
            .await?;
        let mut purged = 0;
        for record in existing {
            if self.otp_repository.delete(&record.id).await? {
                purged += 1;
            }
        }
        Ok(purged)
    }
}
