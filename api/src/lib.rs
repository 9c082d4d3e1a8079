//! HTTP surface for the OTP verification service.
//!
//! Library exports so integration tests can assemble the application
//! with mock repositories.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
