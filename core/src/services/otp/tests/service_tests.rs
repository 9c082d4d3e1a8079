//! Lifecycle tests for the OTP service against in-memory repositories.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use crate::domain::entities::otp_record::{CODE_LENGTH, MAX_ATTEMPTS};
use crate::errors::{DomainError, OtpError};
use crate::repositories::{MockOtpRepository, MockUserRepository};
use crate::services::otp::{
    OtpService, OtpServiceConfig, UnknownUserPolicy, VerifyOutcome,
};

type TestService = OtpService<MockOtpRepository, MockUserRepository>;

fn service() -> (TestService, Arc<MockOtpRepository>, Arc<MockUserRepository>) {
    service_with_config(OtpServiceConfig::default())
}

fn service_with_config(
    config: OtpServiceConfig,
) -> (TestService, Arc<MockOtpRepository>, Arc<MockUserRepository>) {
    let otp_repo = Arc::new(MockOtpRepository::new());
    let user_repo = Arc::new(MockUserRepository::new());
    let service = OtpService::new(otp_repo.clone(), user_repo.clone(), config);
    (service, otp_repo, user_repo)
}

fn unwrap_otp_error(err: DomainError) -> OtpError {
    match err {
        DomainError::Otp(e) => e,
        other => panic!("expected OtpError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_then_verify_succeeds() {
    let (service, otp_repo, _) = service();

    let issued = service.request_otp("a@b.com").await.unwrap();
    assert_eq!(issued.code.len(), CODE_LENGTH);

    let outcome = service.verify_otp("a@b.com", &issued.code, None).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);

    // The record remains, now verified, with the attempt counted
    let records = otp_repo.all().await;
    assert_eq!(records.len(), 1);
    assert!(records[0].verified);
    assert_eq!(records[0].attempts, 1);
}

#[tokio::test]
async fn test_plaintext_code_is_never_persisted() {
    let (service, otp_repo, _) = service();
    let issued = service.request_otp("a@b.com").await.unwrap();

    let records = otp_repo.all().await;
    assert_eq!(records.len(), 1);
    assert_ne!(records[0].otp_hash, issued.code);
    assert_eq!(records[0].otp_hash.len(), 64);
    assert!(records[0].otp_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn test_rejects_missing_and_malformed_emails() {
    let (service, _, _) = service();

    let err = unwrap_otp_error(service.request_otp("").await.unwrap_err());
    assert_eq!(err, OtpError::MissingEmail);

    for email in ["plainaddress", "missing@tld", "two words@x.com"] {
        let err = unwrap_otp_error(service.request_otp(email).await.unwrap_err());
        assert_eq!(err, OtpError::InvalidEmailFormat, "email: {email}");
    }
}

#[tokio::test]
async fn test_verify_requires_email_and_code() {
    let (service, _, _) = service();
    let err = unwrap_otp_error(service.verify_otp("", "123456", None).await.unwrap_err());
    assert_eq!(err, OtpError::MissingFields);

    let err = unwrap_otp_error(service.verify_otp("a@b.com", "", None).await.unwrap_err());
    assert_eq!(err, OtpError::MissingFields);
}

#[tokio::test]
async fn test_verify_without_pending_record_is_not_found() {
    let (service, _, _) = service();
    let err = unwrap_otp_error(
        service.verify_otp("a@b.com", "123456", None).await.unwrap_err(),
    );
    assert_eq!(err, OtpError::NotFound);
}

#[tokio::test]
async fn test_wrong_code_burns_attempts_until_terminal() {
    let (service, otp_repo, _) = service();
    let issued = service.request_otp("a@b.com").await.unwrap();
    let wrong = if issued.code == "000000" { "000001" } else { "000000" };

    // Attempts 1..=MAX_ATTEMPTS are counted and reported
    for expected_remaining in (0..MAX_ATTEMPTS).rev() {
        let err = unwrap_otp_error(
            service.verify_otp("a@b.com", wrong, None).await.unwrap_err(),
        );
        assert_eq!(
            err,
            OtpError::InvalidCode {
                remaining: expected_remaining
            }
        );
    }

    // Budget spent: the next attempt is terminal and removes the record
    let err = unwrap_otp_error(
        service.verify_otp("a@b.com", wrong, None).await.unwrap_err(),
    );
    assert_eq!(err, OtpError::TooManyAttempts);
    assert!(otp_repo.all().await.is_empty());

    // With the record gone even the correct code reports no pending OTP
    let err = unwrap_otp_error(
        service
            .verify_otp("a@b.com", &issued.code, None)
            .await
            .unwrap_err(),
    );
    assert_eq!(err, OtpError::NotFound);
}

#[tokio::test]
async fn test_wrong_then_right_code_still_verifies() {
    let (service, _, _) = service();
    let issued = service.request_otp("a@b.com").await.unwrap();
    let wrong = if issued.code == "000000" { "000001" } else { "000000" };

    for _ in 0..2 {
        let _ = service.verify_otp("a@b.com", wrong, None).await.unwrap_err();
    }
    let outcome = service.verify_otp("a@b.com", &issued.code, None).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_correct_code_after_expiry_is_rejected_and_record_removed() {
    let config = OtpServiceConfig {
        code_expiration_minutes: 0,
        ..OtpServiceConfig::default()
    };
    let (service, otp_repo, _) = service_with_config(config);

    let issued = service.request_otp("a@b.com").await.unwrap();
    tokio::time::sleep(StdDuration::from_millis(10)).await;

    let err = unwrap_otp_error(
        service
            .verify_otp("a@b.com", &issued.code, None)
            .await
            .unwrap_err(),
    );
    assert_eq!(err, OtpError::Expired);
    assert!(otp_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_second_request_invalidates_first_code() {
    let (service, otp_repo, _) = service();

    let first = service.request_otp("a@b.com").await.unwrap();
    let second = service.request_otp("a@b.com").await.unwrap();

    // Only one live record after the second request
    assert_eq!(otp_repo.all().await.len(), 1);

    if first.code != second.code {
        let err = unwrap_otp_error(
            service
                .verify_otp("a@b.com", &first.code, None)
                .await
                .unwrap_err(),
        );
        assert!(matches!(err, OtpError::InvalidCode { .. }));
    }

    let outcome = service
        .verify_otp("a@b.com", &second.code, None)
        .await
        .unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_requests_for_distinct_emails_do_not_interfere() {
    let (service, otp_repo, _) = service();

    let a = service.request_otp("a@b.com").await.unwrap();
    let c = service.request_otp("c@d.com").await.unwrap();
    assert_eq!(otp_repo.all().await.len(), 2);

    assert_eq!(
        service.verify_otp("a@b.com", &a.code, None).await.unwrap(),
        VerifyOutcome::Verified
    );
    assert_eq!(
        service.verify_otp("c@d.com", &c.code, None).await.unwrap(),
        VerifyOutcome::Verified
    );
}

#[tokio::test]
async fn test_full_password_reset_flow() {
    let (service, otp_repo, user_repo) = service();
    let user_id = user_repo.insert_user("a@b.com", "old-password").await;

    let issued = service.request_otp("a@b.com").await.unwrap();

    // Step 1: plain verification
    let outcome = service.verify_otp("a@b.com", &issued.code, None).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);

    // Step 2: same code again, now with the replacement password
    let outcome = service
        .verify_otp("a@b.com", &issued.code, Some("brand-new"))
        .await
        .unwrap();
    assert_eq!(outcome, VerifyOutcome::PasswordReset);
    assert_eq!(
        user_repo.password_of(&user_id).await.as_deref(),
        Some("brand-new")
    );

    // Terminal: the record is consumed
    assert!(otp_repo.all().await.is_empty());
    let err = unwrap_otp_error(
        service
            .verify_otp("a@b.com", &issued.code, Some("brand-new"))
            .await
            .unwrap_err(),
    );
    assert_eq!(err, OtpError::NotFound);
}

#[tokio::test]
async fn test_reset_step_requires_a_verified_record() {
    let (service, _, user_repo) = service();
    user_repo.insert_user("a@b.com", "old-password").await;

    let issued = service.request_otp("a@b.com").await.unwrap();

    // Jumping straight to step 2 finds no verified record
    let err = unwrap_otp_error(
        service
            .verify_otp("a@b.com", &issued.code, Some("brand-new"))
            .await
            .unwrap_err(),
    );
    assert_eq!(err, OtpError::NotFound);
}

#[tokio::test]
async fn test_weak_password_preserves_verified_record() {
    let (service, otp_repo, user_repo) = service();
    let user_id = user_repo.insert_user("a@b.com", "old-password").await;

    let issued = service.request_otp("a@b.com").await.unwrap();
    service.verify_otp("a@b.com", &issued.code, None).await.unwrap();

    let err = unwrap_otp_error(
        service
            .verify_otp("a@b.com", &issued.code, Some("abc"))
            .await
            .unwrap_err(),
    );
    assert_eq!(err, OtpError::WeakPassword { min_length: 6 });

    // No mutation on the user, record still verified and retryable
    assert_eq!(
        user_repo.password_of(&user_id).await.as_deref(),
        Some("old-password")
    );
    let records = otp_repo.all().await;
    assert_eq!(records.len(), 1);
    assert!(records[0].verified);

    let outcome = service
        .verify_otp("a@b.com", &issued.code, Some("long-enough"))
        .await
        .unwrap();
    assert_eq!(outcome, VerifyOutcome::PasswordReset);
}

#[tokio::test]
async fn test_unknown_user_policy_ignore_reports_success() {
    let (service, otp_repo, _) = service();

    let issued = service.request_otp("ghost@b.com").await.unwrap();
    service.verify_otp("ghost@b.com", &issued.code, None).await.unwrap();

    let outcome = service
        .verify_otp("ghost@b.com", &issued.code, Some("brand-new"))
        .await
        .unwrap();
    assert_eq!(outcome, VerifyOutcome::PasswordReset);
    assert!(otp_repo.all().await.is_empty());
}

#[tokio::test]
async fn test_unknown_user_policy_reject_preserves_record() {
    let config = OtpServiceConfig {
        unknown_user_policy: UnknownUserPolicy::Reject,
        ..OtpServiceConfig::default()
    };
    let (service, otp_repo, _) = service_with_config(config);

    let issued = service.request_otp("ghost@b.com").await.unwrap();
    service.verify_otp("ghost@b.com", &issued.code, None).await.unwrap();

    let err = unwrap_otp_error(
        service
            .verify_otp("ghost@b.com", &issued.code, Some("brand-new"))
            .await
            .unwrap_err(),
    );
    assert_eq!(err, OtpError::UnknownUser);
    assert_eq!(otp_repo.all().await.len(), 1);
}

#[tokio::test]
async fn test_persistence_failure_surfaces_as_storage_error() {
    let (service, otp_repo, _) = service();
    otp_repo.fail_writes(true);

    let err = service.request_otp("a@b.com").await.unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));
}

#[tokio::test]
async fn test_cleanup_failure_is_swallowed_but_verify_lookup_failure_is_not() {
    let (service, otp_repo, _) = service();
    otp_repo.fail_reads(true);

    // Creation still succeeds when the pre-create lookup fails
    let issued = service.request_otp("a@b.com").await.unwrap();
    assert_eq!(issued.code.len(), CODE_LENGTH);

    // The same lookup failure during verification propagates
    let err = service
        .verify_otp("a@b.com", &issued.code, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Storage { .. }));
}

#[tokio::test]
async fn test_concurrent_wrong_attempts_are_counted_exactly() {
    let (service, otp_repo, _) = service();
    let issued = service.request_otp("a@b.com").await.unwrap();
    let wrong = if issued.code == "000000" { "000001" } else { "000000" };

    let service = Arc::new(service);
    let mut handles = Vec::new();
    for _ in 0..3 {
        let service = service.clone();
        let wrong = wrong.to_string();
        handles.push(tokio::spawn(async move {
            service.verify_otp("a@b.com", &wrong, None).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_err());
    }

    let records = otp_repo.all().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].attempts, 3);
}
