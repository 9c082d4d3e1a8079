//! OTP code generation and hashing.
//!
//! Codes are produced digit by digit from the OS CSPRNG so every digit is
//! uniform over 0-9; a general-purpose PRNG is never used here. Only the
//! SHA-256 digest of a code is ever persisted.

use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::otp_record::CODE_LENGTH;

/// A freshly generated code together with its storable digest.
#[derive(Debug, Clone)]
pub struct GeneratedOtp {
    /// The plaintext 6-digit code, returned to the trusted relay only
    pub code: String,
    /// Hex-encoded SHA-256 digest of the code
    pub hash: String,
}

/// Generate a new OTP code and its digest. Pure over the randomness source.
pub fn generate() -> GeneratedOtp {
    let mut rng = OsRng;
    let code: String = (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    let hash = hash_code(&code);
    GeneratedOtp { code, hash }
}

/// Hex-encoded SHA-256 digest of a code.
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Constant-time equality over two encoded digests.
///
/// The digests are fixed-width, but length is still checked first so the
/// comparison never panics on malformed input.
pub fn digests_match(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
