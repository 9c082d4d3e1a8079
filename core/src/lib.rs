//! # VeriMail Core
//!
//! Core business logic and domain layer for the VeriMail backend.
//! This crate contains the OTP lifecycle state machine, domain entities,
//! repository interfaces, and error types. Everything that talks to the
//! outside world (document store, HTTP) lives behind the repository traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
