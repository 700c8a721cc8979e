//! Signature scheme markers and traits.
//!
//! This module provides zero-sized type markers for each supported signature
//! scheme and a sealed trait that fixes, per scheme, which key algorithm it
//! accepts, which digest is applied to the message, and which RSA padding mode
//! is selected.

use core::fmt::{self, Display};

use crate::core::algorithm::Algorithm;

mod private {
    pub trait Sealed {}
}

/// Message digest applied before signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageDigest {
    /// The scheme signs the message itself (Ed25519).
    None,
    /// SHA-256.
    Sha256,
}

/// RSA signature padding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaPadding {
    /// RSASSA-PKCS1-v1_5.
    Pkcs1v15,
    /// RSASSA-PSS with MGF1 over the message digest.
    Pss,
}

/// Trait for signature scheme markers.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait SignatureScheme: private::Sealed + Default + Clone + Copy + Send + Sync + 'static {
    /// The key algorithm a handle must carry to be used with this scheme.
    const KEY_ALGORITHM: Algorithm;

    /// The digest applied to the message.
    const DIGEST: MessageDigest;

    /// The RSA padding mode, `None` for non-RSA schemes.
    const PADDING: Option<RsaPadding>;

    /// A stable name used in log events.
    const NAME: &'static str;
}

// =============================================================================
// Ed25519
// =============================================================================

/// Ed25519 signature scheme marker (no pre-hash).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ed25519;

impl private::Sealed for Ed25519 {}

impl SignatureScheme for Ed25519 {
    const KEY_ALGORITHM: Algorithm = Algorithm::Ed25519;
    const DIGEST: MessageDigest = MessageDigest::None;
    const PADDING: Option<RsaPadding> = None;
    const NAME: &'static str = "ed25519";
}

// =============================================================================
// RSA
// =============================================================================

/// RSASSA-PKCS1-v1_5 with SHA-256 scheme marker.
#[cfg(feature = "rsa")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RsaPkcs1Sha256;

#[cfg(feature = "rsa")]
impl private::Sealed for RsaPkcs1Sha256 {}

#[cfg(feature = "rsa")]
impl SignatureScheme for RsaPkcs1Sha256 {
    const KEY_ALGORITHM: Algorithm = Algorithm::Rsa;
    const DIGEST: MessageDigest = MessageDigest::Sha256;
    const PADDING: Option<RsaPadding> = Some(RsaPadding::Pkcs1v15);
    const NAME: &'static str = "rsassa-pkcs1-sha256";
}

/// RSASSA-PSS with SHA-256 scheme marker.
///
/// Signatures use a salt as long as the digest. Verification also accepts
/// the maximum salt length for the modulus.
#[cfg(feature = "rsa")]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RsaPssSha256;

#[cfg(feature = "rsa")]
impl private::Sealed for RsaPssSha256 {}

#[cfg(feature = "rsa")]
impl SignatureScheme for RsaPssSha256 {
    const KEY_ALGORITHM: Algorithm = Algorithm::Rsa;
    const DIGEST: MessageDigest = MessageDigest::Sha256;
    const PADDING: Option<RsaPadding> = Some(RsaPadding::Pss);
    const NAME: &'static str = "rsassa-pss-sha256";
}

// =============================================================================
// ECDSA
// =============================================================================

/// ECDSA over P-256 with SHA-256 scheme marker.
///
/// Signatures are DER encoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcdsaP256Sha256;

impl private::Sealed for EcdsaP256Sha256 {}

impl SignatureScheme for EcdsaP256Sha256 {
    const KEY_ALGORITHM: Algorithm = Algorithm::EcdsaP256;
    const DIGEST: MessageDigest = MessageDigest::Sha256;
    const PADDING: Option<RsaPadding> = None;
    const NAME: &'static str = "ecdsa-p256-sha256";
}

macro_rules! impl_display {
    ($($scheme:ty),+ $(,)?) => {
        $(
            impl Display for $scheme {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(<Self as SignatureScheme>::NAME)
                }
            }
        )+
    };
}

impl_display!(Ed25519, EcdsaP256Sha256);
#[cfg(feature = "rsa")]
impl_display!(RsaPkcs1Sha256, RsaPssSha256);
