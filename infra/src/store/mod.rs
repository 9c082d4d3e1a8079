//! Document store integration.
//!
//! The record store is a generic JSON document store reachable over HTTP,
//! offering create / query-by-field / update-fields / delete-by-id per
//! collection. The client wraps that surface; the repository types adapt it
//! to the `vm_core` traits.

mod client;
mod otp_repository;
mod user_repository;

pub use client::{DocStoreClient, DocStoreConfig, Document};
pub use otp_repository::DocStoreOtpRepository;
pub use user_repository::DocStoreUserRepository;
