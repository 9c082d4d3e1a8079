//! Repository traits for the document-store collaborator.
//!
//! The core treats the record store purely as an interface; concrete
//! implementations live in the infrastructure layer. In-memory mocks are
//! exported so service and API tests can run without a live store.

pub mod otp;
pub mod user;

pub use otp::{MockOtpRepository, OtpRepository};
pub use user::{MockUserRepository, UserRepository};
