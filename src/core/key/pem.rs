//! PEM import and export for [`KeyHandle`].
//!
//! Private keys are read from PKCS#8 (`PRIVATE KEY`), PKCS#1
//! (`RSA PRIVATE KEY`) and SEC1 (`EC PRIVATE KEY`) documents. Public keys are
//! read from SubjectPublicKeyInfo (`PUBLIC KEY`) documents only. Exports always
//! produce PKCS#8 or SubjectPublicKeyInfo with LF line endings.
//!
//! Every parse error collapses to [`CryptoError::ParseFailure`]; the reason is
//! not reported.

use const_oid::db::{rfc5912, rfc8410};
use const_oid::ObjectIdentifier;
use pkcs8::der::asn1::AnyRef;
use pkcs8::der::pem::PemLabel;
use pkcs8::spki::SubjectPublicKeyInfoRef;
use pkcs8::{
    AlgorithmIdentifierRef, Document, EncodePrivateKey, EncodePublicKey, LineEnding,
    PrivateKeyInfo, SecretDocument,
};
use zeroize::Zeroizing;

use super::{KeyHandle, KeyMaterial, PrivateKey, PublicKey};
use crate::core::algorithm::Algorithm;
use crate::core::error::{CryptoError, CryptoResult};

/// PEM label of a PKCS#1 `RSAPrivateKey`.
const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// PEM label of a SEC1 `ECPrivateKey`.
const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

/// Line ending used for every exported document.
const LINE_ENDING: LineEnding = LineEnding::LF;

// =============================================================================
// Algorithm detection
// =============================================================================

fn detect_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> CryptoResult<Algorithm> {
    let oid = algorithm.oid;

    if oid == rfc8410::ID_ED_25519 {
        return Ok(Algorithm::Ed25519);
    }

    if oid == rfc5912::RSA_ENCRYPTION {
        return Ok(Algorithm::Rsa);
    }

    if oid == rfc5912::ID_EC_PUBLIC_KEY {
        let params = algorithm.parameters.ok_or(CryptoError::ParseFailure)?;
        if parse_curve_oid(params)? == rfc5912::SECP_256_R_1 {
            return Ok(Algorithm::EcdsaP256);
        }
    }

    Err(CryptoError::ParseFailure)
}

fn parse_curve_oid(any: AnyRef<'_>) -> CryptoResult<ObjectIdentifier> {
    ObjectIdentifier::try_from(any).map_err(|_| CryptoError::ParseFailure)
}

// =============================================================================
// Import
// =============================================================================

/// Imports a private key from PEM text.
///
/// # Errors
///
/// Returns [`CryptoError::ParseFailure`] if the PEM is malformed, encrypted,
/// holds a public key, or describes an unsupported algorithm or curve.
pub fn import_private_pem(pem: &str) -> CryptoResult<KeyHandle> {
    let (label, doc) = SecretDocument::from_pem(pem).map_err(|_| CryptoError::ParseFailure)?;

    let key = match label {
        l if l == PrivateKeyInfo::PEM_LABEL => private_from_pkcs8(doc.as_bytes())?,
        RSA_PRIVATE_KEY_LABEL => private_from_pkcs1(doc.as_bytes())?,
        EC_PRIVATE_KEY_LABEL => p256::SecretKey::from_sec1_der(doc.as_bytes())
            .map(PrivateKey::EcdsaP256)
            .map_err(|_| CryptoError::ParseFailure)?,
        _ => return Err(CryptoError::ParseFailure),
    };

    tracing::debug!(algorithm = %key.algorithm(), label, "imported private key");
    Ok(KeyHandle::from_private(key))
}

fn private_from_pkcs8(der: &[u8]) -> CryptoResult<PrivateKey> {
    let info = PrivateKeyInfo::try_from(der).map_err(|_| CryptoError::ParseFailure)?;

    match detect_algorithm(&info.algorithm)? {
        Algorithm::Ed25519 => ed25519_dalek::SigningKey::try_from(info)
            .map(PrivateKey::Ed25519)
            .map_err(|_| CryptoError::ParseFailure),
        #[cfg(feature = "rsa")]
        Algorithm::Rsa => rsa::RsaPrivateKey::try_from(info)
            .map(|key| PrivateKey::Rsa(Box::new(key)))
            .map_err(|_| CryptoError::ParseFailure),
        #[cfg(not(feature = "rsa"))]
        Algorithm::Rsa => Err(CryptoError::ParseFailure),
        Algorithm::EcdsaP256 => p256::SecretKey::try_from(info)
            .map(PrivateKey::EcdsaP256)
            .map_err(|_| CryptoError::ParseFailure),
    }
}

#[cfg(feature = "rsa")]
fn private_from_pkcs1(der: &[u8]) -> CryptoResult<PrivateKey> {
    use rsa::pkcs1::DecodeRsaPrivateKey;

    rsa::RsaPrivateKey::from_pkcs1_der(der)
        .map(|key| PrivateKey::Rsa(Box::new(key)))
        .map_err(|_| CryptoError::ParseFailure)
}

#[cfg(not(feature = "rsa"))]
fn private_from_pkcs1(_der: &[u8]) -> CryptoResult<PrivateKey> {
    Err(CryptoError::ParseFailure)
}

/// Imports a public key from a SubjectPublicKeyInfo PEM document.
///
/// # Errors
///
/// Returns [`CryptoError::ParseFailure`] if the PEM is malformed, holds a
/// private key, or describes an unsupported algorithm or curve.
pub fn import_public_pem(pem: &str) -> CryptoResult<KeyHandle> {
    let (label, doc) = Document::from_pem(pem).map_err(|_| CryptoError::ParseFailure)?;
    if label != SubjectPublicKeyInfoRef::PEM_LABEL {
        return Err(CryptoError::ParseFailure);
    }

    let spki =
        SubjectPublicKeyInfoRef::try_from(doc.as_bytes()).map_err(|_| CryptoError::ParseFailure)?;

    let key = match detect_algorithm(&spki.algorithm)? {
        Algorithm::Ed25519 => ed25519_dalek::VerifyingKey::try_from(spki)
            .map(PublicKey::Ed25519)
            .map_err(|_| CryptoError::ParseFailure)?,
        #[cfg(feature = "rsa")]
        Algorithm::Rsa => rsa::RsaPublicKey::try_from(spki)
            .map(|key| PublicKey::Rsa(Box::new(key)))
            .map_err(|_| CryptoError::ParseFailure)?,
        #[cfg(not(feature = "rsa"))]
        Algorithm::Rsa => return Err(CryptoError::ParseFailure),
        Algorithm::EcdsaP256 => p256::PublicKey::try_from(spki)
            .map(PublicKey::EcdsaP256)
            .map_err(|_| CryptoError::ParseFailure)?,
    };

    tracing::debug!(algorithm = %key.algorithm(), "imported public key");
    Ok(KeyHandle::from_public(key))
}

// =============================================================================
// Export
// =============================================================================

/// Exports the public half of `handle` as a `PUBLIC KEY` PEM document.
///
/// Works for private and public handles alike.
///
/// # Errors
///
/// Returns [`CryptoError::EncodeFailure`] if encoding fails.
pub fn export_public_pem(handle: &KeyHandle) -> CryptoResult<String> {
    let pem = match handle.material().public_key() {
        PublicKey::Ed25519(key) => key.to_public_key_pem(LINE_ENDING),
        #[cfg(feature = "rsa")]
        PublicKey::Rsa(key) => key.to_public_key_pem(LINE_ENDING),
        PublicKey::EcdsaP256(key) => key.to_public_key_pem(LINE_ENDING),
    };
    pem.map_err(|_| CryptoError::EncodeFailure)
}

/// Exports the private key of `handle` as an unencrypted `PRIVATE KEY`
/// (PKCS#8) PEM document.
///
/// # Errors
///
/// - [`CryptoError::CapabilityMismatch`] if `handle` is public-only
/// - [`CryptoError::EncodeFailure`] if encoding fails
pub fn export_private_pem(handle: &KeyHandle) -> CryptoResult<Zeroizing<String>> {
    handle.require(None, true)?;

    let KeyMaterial::Private(key) = handle.material() else {
        return Err(CryptoError::CapabilityMismatch);
    };

    let pem = match key {
        PrivateKey::Ed25519(key) => key.to_pkcs8_pem(LINE_ENDING),
        #[cfg(feature = "rsa")]
        PrivateKey::Rsa(key) => key.to_pkcs8_pem(LINE_ENDING),
        PrivateKey::EcdsaP256(key) => key.to_pkcs8_pem(LINE_ENDING),
    };
    pem.map_err(|_| CryptoError::EncodeFailure)
}
