//! Error types for key handling, signing and AEAD operations.
//!
//! Error messages are intentionally vague for security-sensitive operations
//! so that nothing derived from key material or plaintext reaches a caller
//! through an error string.

use thiserror::Error;

use crate::core::algorithm::Algorithm;

/// Errors returned by every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// A caller-supplied buffer has the wrong length.
    ///
    /// Raised before any cipher or signing primitive runs.
    #[error("Invalid {param}: expected {expected} bytes, got {actual}")]
    InvalidArgument {
        /// Which parameter was rejected (`"key"`, `"nonce"`, `"ciphertext"`).
        param: &'static str,
        /// The expected length (a minimum for `"ciphertext"`).
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// The key handle belongs to a different algorithm family.
    #[error("Unexpected key type: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The algorithm the operation requires.
        expected: Algorithm,
        /// The algorithm of the supplied handle.
        actual: Algorithm,
    },

    /// A private key was required but the handle only holds public material.
    #[error("Private key expected, got public key only")]
    CapabilityMismatch,

    /// PEM or DER input is malformed or describes an unsupported key.
    #[error("Parse failure")]
    ParseFailure,

    /// A key could not be encoded.
    #[error("Encode failure")]
    EncodeFailure,

    /// Generic cryptographic error.
    /// Intentionally vague for security.
    #[error("Cryptographic operation failed")]
    CryptoFailure,

    /// AEAD authentication failed.
    /// Intentionally vague for security.
    #[error("Verify failed")]
    VerifyFailure,
}

impl CryptoError {
    /// Returns `true` for an AEAD authentication failure.
    ///
    /// This is the tamper signal and is the only variant that says
    /// something about the ciphertext rather than about how the call was made.
    #[must_use]
    pub const fn is_verify_failure(&self) -> bool {
        matches!(self, Self::VerifyFailure)
    }
}

/// Result type alias for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CryptoError::InvalidArgument {
            param: "nonce",
            expected: 12,
            actual: 8,
        };
        assert_eq!(err.to_string(), "Invalid nonce: expected 12 bytes, got 8");

        let err = CryptoError::TypeMismatch {
            expected: Algorithm::Ed25519,
            actual: Algorithm::EcdsaP256,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected key type: expected ED25519, got id-ecPublicKey"
        );

        let err = CryptoError::CapabilityMismatch;
        assert_eq!(err.to_string(), "Private key expected, got public key only");

        let err = CryptoError::ParseFailure;
        assert_eq!(err.to_string(), "Parse failure");

        let err = CryptoError::EncodeFailure;
        assert_eq!(err.to_string(), "Encode failure");

        let err = CryptoError::CryptoFailure;
        assert_eq!(err.to_string(), "Cryptographic operation failed");

        let err = CryptoError::VerifyFailure;
        assert_eq!(err.to_string(), "Verify failed");
    }

    #[test]
    fn test_only_verify_failure_is_tamper_signal() {
        assert!(CryptoError::VerifyFailure.is_verify_failure());
        assert!(!CryptoError::CryptoFailure.is_verify_failure());
        assert!(!CryptoError::ParseFailure.is_verify_failure());
    }

    #[test]
    fn test_error_debug() {
        let err = CryptoError::CapabilityMismatch;
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("CapabilityMismatch"));
    }
}
