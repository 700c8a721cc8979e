//! Flat operation surface for embedding in a host environment.
//!
//! Each function is a thin adapter over [`crate::core`] with a fixed name
//! and a fixed algorithm, suitable for registering one-to-one with a
//! scripting runtime. Key handles carry `private_pem`, `public_pem` and
//! `get_type` as methods on [`KeyHandle`].
//!
//! # Example
//!
//! ```rust
//! use pemcrypt::host;
//!
//! let key = host::generate_ed25519_keypair()?;
//! let public = host::import_public_pem(&key.public_pem()?)?;
//!
//! let signature = host::ed25519_sign(&key, b"payload")?;
//! assert!(host::ed25519_verify(&public, b"payload", &signature)?.is_valid());
//!
//! let ciphertext = host::aes_256_gcm_encrypt(&[7u8; 32], &[9u8; 12], b"payload")?;
//! let plaintext = host::aes_256_gcm_decrypt(&[7u8; 32], &[9u8; 12], &ciphertext)?;
//! assert_eq!(plaintext.as_slice(), b"payload");
//! # Ok::<(), pemcrypt::CryptoError>(())
//! ```

use zeroize::Zeroizing;

use crate::core::error::CryptoResult;
use crate::core::key::{pem, KeyHandle};
use crate::core::operations::aead::{self, AesGcmVariant};
use crate::core::operations::ecdsa_sig;
use crate::core::operations::sign::{self, Verification};
use crate::core::scheme;

// =============================================================================
// Keys
// =============================================================================

/// Generates a new Ed25519 key pair.
///
/// # Errors
///
/// Returns [`CryptoError::CryptoFailure`](crate::CryptoError::CryptoFailure)
/// if the system RNG fails.
pub fn generate_ed25519_keypair() -> CryptoResult<KeyHandle> {
    KeyHandle::generate_ed25519()
}

/// Imports a private key from PEM (PKCS#8, PKCS#1 RSA or SEC1 P-256).
///
/// # Errors
///
/// Returns [`CryptoError::ParseFailure`](crate::CryptoError::ParseFailure)
/// for malformed or unsupported input.
pub fn import_private_pem(text: &str) -> CryptoResult<KeyHandle> {
    pem::import_private_pem(text)
}

/// Imports a public key from SubjectPublicKeyInfo PEM.
///
/// # Errors
///
/// Returns [`CryptoError::ParseFailure`](crate::CryptoError::ParseFailure)
/// for malformed or unsupported input, including private key PEM.
pub fn import_public_pem(text: &str) -> CryptoResult<KeyHandle> {
    pem::import_public_pem(text)
}

// =============================================================================
// Signatures
// =============================================================================

macro_rules! sign_verify {
    ($(#[$attr:meta])* $scheme:ty, $sign:ident, $verify:ident, $desc:literal) => {
        #[doc = concat!("Signs `msg` with ", $desc, ".")]
        ///
        /// # Errors
        ///
        /// `TypeMismatch` or `CapabilityMismatch` if the handle does not fit,
        /// `CryptoFailure` if signing fails.
        $(#[$attr])*
        pub fn $sign(key: &KeyHandle, msg: &[u8]) -> CryptoResult<Vec<u8>> {
            sign::sign::<$scheme>(key, msg)
        }

        #[doc = concat!("Verifies a ", $desc, " signature over `msg`.")]
        ///
        /// # Errors
        ///
        /// `TypeMismatch` if the handle does not fit, `ParseFailure` for an
        /// ECDSA signature that is not DER. Any other signature that does not
        /// match, including one of the wrong length, is
        /// `Ok(Verification::Invalid)`.
        $(#[$attr])*
        pub fn $verify(key: &KeyHandle, msg: &[u8], signature: &[u8]) -> CryptoResult<Verification> {
            sign::verify::<$scheme>(key, msg, signature)
        }
    };
}

sign_verify!(scheme::Ed25519, ed25519_sign, ed25519_verify, "Ed25519");

sign_verify!(
    #[cfg(feature = "rsa")]
    scheme::RsaPkcs1Sha256,
    rsassa_pkcs1_256_sign,
    rsassa_pkcs1_256_verify,
    "RSASSA-PKCS1-v1_5 with SHA-256"
);

sign_verify!(
    #[cfg(feature = "rsa")]
    scheme::RsaPssSha256,
    rsassa_pss_256_sign,
    rsassa_pss_256_verify,
    "RSASSA-PSS with SHA-256"
);

sign_verify!(
    scheme::EcdsaP256Sha256,
    ecdsa_sha256_sign,
    ecdsa_sha256_verify,
    "ECDSA P-256 with SHA-256 (DER)"
);

// =============================================================================
// AES-GCM
// =============================================================================

/// Encrypts with AES-128-GCM. The key must be 16 bytes, the nonce 12.
///
/// # Errors
///
/// `InvalidArgument` on a bad key or nonce length, `CryptoFailure` if the
/// cipher fails.
pub fn aes_128_gcm_encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    aead::encrypt_with(AesGcmVariant::Aes128, key, nonce, plaintext)
}

/// Encrypts with AES-256-GCM. The key must be 32 bytes, the nonce 12.
///
/// # Errors
///
/// `InvalidArgument` on a bad key or nonce length, `CryptoFailure` if the
/// cipher fails.
pub fn aes_256_gcm_encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    aead::encrypt_with(AesGcmVariant::Aes256, key, nonce, plaintext)
}

/// Decrypts with AES-128-GCM.
///
/// # Errors
///
/// `InvalidArgument` on a bad key, nonce or ciphertext length,
/// `VerifyFailure` if authentication fails.
pub fn aes_128_gcm_decrypt(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    aead::decrypt_with(AesGcmVariant::Aes128, key, nonce, ciphertext)
}

/// Decrypts with AES-256-GCM.
///
/// # Errors
///
/// `InvalidArgument` on a bad key, nonce or ciphertext length,
/// `VerifyFailure` if authentication fails.
pub fn aes_256_gcm_decrypt(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    aead::decrypt_with(AesGcmVariant::Aes256, key, nonce, ciphertext)
}

// =============================================================================
// ECDSA signature encoding
// =============================================================================

/// Splits a DER ECDSA signature into minimal big-endian `(r, s)`.
///
/// # Errors
///
/// `ParseFailure` if the input is not a canonical DER signature.
pub fn parse_ecdsa_signature(der: &[u8]) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    ecdsa_sig::parse_ecdsa_signature(der)
}

/// DER-encodes big-endian `r` and `s`.
#[must_use]
pub fn build_ecdsa_signature(r: &[u8], s: &[u8]) -> Vec<u8> {
    ecdsa_sig::build_ecdsa_signature(r, s)
}
