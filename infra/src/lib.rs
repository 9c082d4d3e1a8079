//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the VeriMail
//! application, following Clean Architecture principles. It provides the
//! concrete document-store implementations behind the repository traits
//! defined in `vm_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Store**: an HTTP client for the external JSON document store and
//!   repository implementations over its `otp_codes` and `users` collections

pub mod store;

pub use store::{DocStoreClient, DocStoreConfig, DocStoreOtpRepository, DocStoreUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP transport error talking to the document store
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Document store error: status {status}: {body}")]
    Store { status: u16, body: String },

    /// A document could not be decoded into the expected shape
    #[error("Malformed document: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for vm_core::errors::DomainError {
    fn from(err: InfrastructureError) -> Self {
        vm_core::errors::DomainError::Storage {
            message: err.to_string(),
        }
    }
}
