//! Tests for the OTP lifecycle service

mod service_tests;
