//! Reference-counted asymmetric key handles.
//!
//! A [`KeyHandle`] owns exactly one key and carries two pieces of metadata
//! that never change after construction: the [`Algorithm`] tag and whether
//! private material is present. Every signing path calls
//! [`KeyHandle::require`] before touching the key.
//!
//! Handles are cheap to clone and safe to share between threads. The key is
//! released, and private material zeroized, when the last clone is dropped.

pub mod pem;

use core::fmt::{self, Debug};
use std::sync::Arc;

use ed25519_dalek::{SigningKey, VerifyingKey};
use pkcs8::EncodePublicKey;
use rand_core::{OsRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::core::algorithm::Algorithm;
use crate::core::error::{CryptoError, CryptoResult};

// =============================================================================
// Key material
// =============================================================================

/// Private key material for each supported algorithm.
pub(crate) enum PrivateKey {
    Ed25519(SigningKey),
    #[cfg(feature = "rsa")]
    Rsa(Box<rsa::RsaPrivateKey>),
    EcdsaP256(p256::SecretKey),
}

/// Public key material for each supported algorithm.
#[derive(Clone)]
pub(crate) enum PublicKey {
    Ed25519(VerifyingKey),
    #[cfg(feature = "rsa")]
    Rsa(Box<rsa::RsaPublicKey>),
    EcdsaP256(p256::PublicKey),
}

/// The key a handle owns.
pub(crate) enum KeyMaterial {
    Private(PrivateKey),
    Public(PublicKey),
}

impl PrivateKey {
    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            #[cfg(feature = "rsa")]
            Self::Rsa(_) => Algorithm::Rsa,
            Self::EcdsaP256(_) => Algorithm::EcdsaP256,
        }
    }

    pub(crate) fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(key) => PublicKey::Ed25519(key.verifying_key()),
            #[cfg(feature = "rsa")]
            Self::Rsa(key) => PublicKey::Rsa(Box::new(key.to_public_key())),
            Self::EcdsaP256(key) => PublicKey::EcdsaP256(key.public_key()),
        }
    }
}

impl PublicKey {
    pub(crate) fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            #[cfg(feature = "rsa")]
            Self::Rsa(_) => Algorithm::Rsa,
            Self::EcdsaP256(_) => Algorithm::EcdsaP256,
        }
    }

    /// SubjectPublicKeyInfo DER encoding.
    pub(crate) fn to_spki_der(&self) -> CryptoResult<pkcs8::Document> {
        let encoded = match self {
            Self::Ed25519(key) => key.to_public_key_der(),
            #[cfg(feature = "rsa")]
            Self::Rsa(key) => key.to_public_key_der(),
            Self::EcdsaP256(key) => key.to_public_key_der(),
        };
        encoded.map_err(|_| CryptoError::EncodeFailure)
    }
}

impl KeyMaterial {
    pub(crate) fn public_key(&self) -> PublicKey {
        match self {
            Self::Private(key) => key.public_key(),
            Self::Public(key) => key.clone(),
        }
    }
}

// =============================================================================
// KeyHandle
// =============================================================================

struct KeyInner {
    algorithm: Algorithm,
    material: KeyMaterial,
}

impl Drop for KeyInner {
    fn drop(&mut self) {
        tracing::trace!(
            algorithm = %self.algorithm,
            private = matches!(self.material, KeyMaterial::Private(_)),
            "releasing key"
        );
    }
}

/// An opaque, shareable handle to an asymmetric key.
///
/// # Security
///
/// - Private key material is zeroized when the last clone is dropped
/// - Debug output redacts the key
/// - The algorithm tag and private/public capability are fixed at construction
///
/// # Example
///
/// ```rust
/// use pemcrypt::core::key::KeyHandle;
///
/// let key = KeyHandle::generate_ed25519()?;
/// assert_eq!(key.get_type(), "ED25519");
/// assert!(key.has_private_material());
///
/// let public = key.to_public();
/// assert!(!public.has_private_material());
/// assert!(public.same_public_key(&key));
/// # Ok::<(), pemcrypt::CryptoError>(())
/// ```
#[derive(Clone)]
pub struct KeyHandle {
    inner: Arc<KeyInner>,
}

impl KeyHandle {
    fn from_material(material: KeyMaterial) -> Self {
        let algorithm = match &material {
            KeyMaterial::Private(key) => key.algorithm(),
            KeyMaterial::Public(key) => key.algorithm(),
        };
        Self {
            inner: Arc::new(KeyInner {
                algorithm,
                material,
            }),
        }
    }

    pub(crate) fn from_private(key: PrivateKey) -> Self {
        Self::from_material(KeyMaterial::Private(key))
    }

    pub(crate) fn from_public(key: PublicKey) -> Self {
        Self::from_material(KeyMaterial::Public(key))
    }

    /// Generates a new Ed25519 key pair from the operating system RNG.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::CryptoFailure`] if the RNG cannot be read.
    pub fn generate_ed25519() -> CryptoResult<Self> {
        let mut seed = Zeroizing::new([0u8; ed25519_dalek::SECRET_KEY_LENGTH]);
        OsRng
            .try_fill_bytes(&mut seed[..])
            .map_err(|_| CryptoError::CryptoFailure)?;

        tracing::debug!(algorithm = %Algorithm::Ed25519, "generated key");
        Ok(Self::from_private(PrivateKey::Ed25519(SigningKey::from_bytes(
            &seed,
        ))))
    }

    /// Returns the algorithm this key belongs to.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.inner.algorithm
    }

    /// Returns the short name of the key type (`"ED25519"`, `"rsaEncryption"`
    /// or `"id-ecPublicKey"`).
    #[must_use]
    pub fn get_type(&self) -> &'static str {
        self.inner.algorithm.short_name()
    }

    /// Returns `true` if the handle was generated or imported with its
    /// private half.
    #[must_use]
    pub fn has_private_material(&self) -> bool {
        matches!(self.inner.material, KeyMaterial::Private(_))
    }

    /// Checks the handle against what an operation needs.
    ///
    /// The algorithm is checked first, then the private capability.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::TypeMismatch`] if `expected` is set and differs from
    ///   the handle's algorithm
    /// - [`CryptoError::CapabilityMismatch`] if `require_private` is set and
    ///   the handle is public-only
    pub fn require(&self, expected: Option<Algorithm>, require_private: bool) -> CryptoResult<()> {
        if let Some(expected) = expected {
            if expected != self.inner.algorithm {
                return Err(CryptoError::TypeMismatch {
                    expected,
                    actual: self.inner.algorithm,
                });
            }
        }
        if require_private && !self.has_private_material() {
            return Err(CryptoError::CapabilityMismatch);
        }
        Ok(())
    }

    pub(crate) fn material(&self) -> &KeyMaterial {
        &self.inner.material
    }

    /// Returns a public-only handle for the same key.
    #[must_use]
    pub fn to_public(&self) -> Self {
        match &self.inner.material {
            KeyMaterial::Public(_) => self.clone(),
            KeyMaterial::Private(key) => Self::from_public(key.public_key()),
        }
    }

    /// Returns `true` if both handles hold the same public key.
    ///
    /// The comparison is constant-time over the SubjectPublicKeyInfo
    /// encodings, and it ignores whether either side has private material.
    #[must_use]
    pub fn same_public_key(&self, other: &Self) -> bool {
        let (Ok(ours), Ok(theirs)) = (
            self.material().public_key().to_spki_der(),
            other.material().public_key().to_spki_der(),
        ) else {
            return false;
        };
        ours.as_bytes().ct_eq(theirs.as_bytes()).into()
    }

    /// Exports the public key as a SubjectPublicKeyInfo PEM document.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::EncodeFailure`] if encoding fails.
    pub fn public_pem(&self) -> CryptoResult<String> {
        pem::export_public_pem(self)
    }

    /// Exports the private key as an unencrypted PKCS#8 PEM document.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::CapabilityMismatch`] for a public-only handle
    /// - [`CryptoError::EncodeFailure`] if encoding fails
    pub fn private_pem(&self) -> CryptoResult<Zeroizing<String>> {
        pem::export_private_pem(self)
    }
}

// =============================================================================
// Debug (security: don't expose key material)
// =============================================================================

impl Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("algorithm", &self.inner.algorithm)
            .field("private", &self.has_private_material())
            .field("key", &"[REDACTED]")
            .finish()
    }
}
