//! Email utility functions for the OTP lifecycle service

use once_cell::sync::Lazy;
use regex::Regex;

/// Basic `local@domain.tld` shape: word characters, dots, and dashes in the
/// local part and domain, with at least one dot-separated TLD. No embedded
/// whitespace can match.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").unwrap()
});

/// Validates the basic email shape accepted by the OTP flow.
///
/// # Examples
///
/// ```
/// use vm_core::services::otp::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(is_valid_email("first.last@mail.example.org"));
/// assert!(!is_valid_email("nodomain@"));
/// assert!(!is_valid_email("no at sign"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logging.
///
/// Keeps the first character of the local part and the full domain:
/// `alice@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
