//! OTP lifecycle service module
//!
//! This module owns the OTP state machine for email-based identity
//! confirmation and password reset:
//! - Code generation and hashing
//! - Single-active-record enforcement per email
//! - Expiry and attempt counting
//! - Verification and the optional linked password update

mod config;
mod email_lock;
mod email_utils;
pub mod generator;
mod service;

#[cfg(test)]
mod tests;

pub use config::{OtpServiceConfig, UnknownUserPolicy};
pub use service::{IssuedOtp, OtpService, VerifyOutcome};

// Export selected email utilities for public use
pub use email_utils::{is_valid_email, mask_email};
