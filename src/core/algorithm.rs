//! Asymmetric key algorithm identifiers.

use core::fmt::{self, Display};

/// The algorithm family of a [`KeyHandle`](crate::core::key::KeyHandle).
///
/// The set is closed: a handle can only ever carry one of these, and the
/// tag never changes after the handle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Ed25519 (RFC 8032).
    Ed25519,
    /// RSA, used with either PKCS#1 v1.5 or PSS padding.
    Rsa,
    /// ECDSA over NIST P-256.
    EcdsaP256,
}

impl Algorithm {
    /// Returns the conventional short name for the key type.
    ///
    /// These match the object short names OpenSSL reports for the same keys,
    /// so hosts that compare against those strings keep working.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Ed25519 => "ED25519",
            Self::Rsa => "rsaEncryption",
            Self::EcdsaP256 => "id-ecPublicKey",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
