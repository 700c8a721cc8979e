//! Generic sign and verify dispatch.
//!
//! [`sign`] and [`verify`] are parameterized by a
//! [`SignatureScheme`](crate::core::scheme::SignatureScheme) marker. The
//! marker fixes the key algorithm the handle must carry, the digest, and the
//! RSA padding mode; the handle is checked against it before any key
//! material is touched.
//!
//! Signing sizes its output in two steps: the signing context reports the
//! largest signature it can produce, a buffer of exactly that size is
//! allocated, and the context fills it and reports how many bytes it wrote.
//!
//! Verification distinguishes three outcomes:
//!
//! - `Ok(Verification::Valid)` - the signature verifies
//! - `Ok(Verification::Invalid)` - the signature does not verify, including
//!   Ed25519 and RSA signatures of the wrong length
//! - `Err(_)` - an ECDSA signature that is not DER, or a handle of the wrong
//!   type

use ed25519_dalek::{Signer, Verifier};
#[cfg(feature = "rsa")]
use sha2::{Digest, Sha256};

use crate::core::error::{CryptoError, CryptoResult};
use crate::core::key::{KeyHandle, KeyMaterial, PrivateKey, PublicKey};
use crate::core::operations::ecdsa_sig::{parse_ecdsa_signature, P256_MAX_DER_LEN};
#[cfg(feature = "rsa")]
use crate::core::scheme::RsaPadding;
use crate::core::scheme::{MessageDigest, SignatureScheme};

/// Outcome of verifying a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Verification {
    /// The signature matches the message and key.
    Valid,
    /// The signature does not match.
    Invalid,
}

impl Verification {
    /// Returns `true` for [`Verification::Valid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    fn from_ok<E>(result: Result<(), E>) -> Self {
        if result.is_ok() {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

impl From<Verification> for bool {
    fn from(verification: Verification) -> Self {
        verification.is_valid()
    }
}

// =============================================================================
// Signing contexts
// =============================================================================

/// A one-shot signing context bound to a key, digest and padding.
trait SignContext {
    /// Largest signature this context can produce.
    fn signature_len(&self) -> usize;

    /// Signs `msg` into the front of `out` and returns the bytes written.
    fn sign_into(&self, msg: &[u8], out: &mut [u8]) -> CryptoResult<usize>;
}

fn copy_out(signature: &[u8], out: &mut [u8]) -> CryptoResult<usize> {
    let dst = out
        .get_mut(..signature.len())
        .ok_or(CryptoError::CryptoFailure)?;
    dst.copy_from_slice(signature);
    Ok(signature.len())
}

struct Ed25519Signer<'a>(&'a ed25519_dalek::SigningKey);

impl SignContext for Ed25519Signer<'_> {
    fn signature_len(&self) -> usize {
        ed25519_dalek::SIGNATURE_LENGTH
    }

    fn sign_into(&self, msg: &[u8], out: &mut [u8]) -> CryptoResult<usize> {
        let signature = self
            .0
            .try_sign(msg)
            .map_err(|_| CryptoError::CryptoFailure)?;
        copy_out(&signature.to_bytes(), out)
    }
}

#[cfg(feature = "rsa")]
struct RsaSigner<'a> {
    key: &'a rsa::RsaPrivateKey,
    padding: RsaPadding,
}

#[cfg(feature = "rsa")]
impl SignContext for RsaSigner<'_> {
    fn signature_len(&self) -> usize {
        use rsa::traits::PublicKeyParts;

        self.key.size()
    }

    fn sign_into(&self, msg: &[u8], out: &mut [u8]) -> CryptoResult<usize> {
        use rand_core::OsRng;
        use rsa::{Pkcs1v15Sign, Pss};

        let hashed = Sha256::digest(msg);
        let signature = match self.padding {
            RsaPadding::Pkcs1v15 => {
                self.key
                    .sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha256>(), &hashed)
            }
            RsaPadding::Pss => self.key.sign_with_rng(&mut OsRng, Pss::new::<Sha256>(), &hashed),
        }
        .map_err(|_| CryptoError::CryptoFailure)?;

        copy_out(&signature, out)
    }
}

struct EcdsaP256Signer(p256::ecdsa::SigningKey);

impl SignContext for EcdsaP256Signer {
    fn signature_len(&self) -> usize {
        P256_MAX_DER_LEN
    }

    fn sign_into(&self, msg: &[u8], out: &mut [u8]) -> CryptoResult<usize> {
        let signature: p256::ecdsa::Signature = self
            .0
            .try_sign(msg)
            .map_err(|_| CryptoError::CryptoFailure)?;
        copy_out(signature.to_der().as_bytes(), out)
    }
}

fn signer<S: SignatureScheme>(key: &PrivateKey) -> CryptoResult<Box<dyn SignContext + '_>> {
    match (key, S::DIGEST, S::PADDING) {
        (PrivateKey::Ed25519(key), MessageDigest::None, None) => Ok(Box::new(Ed25519Signer(key))),
        #[cfg(feature = "rsa")]
        (PrivateKey::Rsa(key), MessageDigest::Sha256, Some(padding)) => {
            Ok(Box::new(RsaSigner { key, padding }))
        }
        (PrivateKey::EcdsaP256(key), MessageDigest::Sha256, None) => Ok(Box::new(
            EcdsaP256Signer(p256::ecdsa::SigningKey::from(key)),
        )),
        _ => Err(CryptoError::CryptoFailure),
    }
}

// =============================================================================
// Sign
// =============================================================================

/// Signs `msg` with the private key in `key` using scheme `S`.
///
/// # Errors
///
/// - [`CryptoError::TypeMismatch`] if the key does not belong to the scheme's
///   algorithm
/// - [`CryptoError::CapabilityMismatch`] if the key is public-only
/// - [`CryptoError::CryptoFailure`] if the signing primitive fails
///
/// # Example
///
/// ```rust
/// use pemcrypt::core::key::KeyHandle;
/// use pemcrypt::core::operations::sign::{sign, verify, Verification};
/// use pemcrypt::core::scheme::Ed25519;
///
/// let key = KeyHandle::generate_ed25519()?;
/// let signature = sign::<Ed25519>(&key, b"message")?;
/// assert_eq!(verify::<Ed25519>(&key, b"message", &signature)?, Verification::Valid);
/// # Ok::<(), pemcrypt::CryptoError>(())
/// ```
pub fn sign<S: SignatureScheme>(key: &KeyHandle, msg: &[u8]) -> CryptoResult<Vec<u8>> {
    key.require(Some(S::KEY_ALGORITHM), true)?;
    let KeyMaterial::Private(private) = key.material() else {
        return Err(CryptoError::CapabilityMismatch);
    };

    let context = signer::<S>(private)?;
    let mut signature = vec![0u8; context.signature_len()];
    let written = context.sign_into(msg, &mut signature)?;
    signature.truncate(written);

    tracing::debug!(
        scheme = S::NAME,
        message_len = msg.len(),
        signature_len = written,
        "signed message"
    );
    Ok(signature)
}

// =============================================================================
// Verify
// =============================================================================

/// Verifies `signature` over `msg` with the public half of `key` using
/// scheme `S`.
///
/// Both private and public handles can verify.
///
/// # Errors
///
/// - [`CryptoError::TypeMismatch`] if the key does not belong to the scheme's
///   algorithm
/// - [`CryptoError::ParseFailure`] if an ECDSA `signature` is not DER
pub fn verify<S: SignatureScheme>(
    key: &KeyHandle,
    msg: &[u8],
    signature: &[u8],
) -> CryptoResult<Verification> {
    key.require(Some(S::KEY_ALGORITHM), false)?;

    let verification = match (key.material().public_key(), S::DIGEST, S::PADDING) {
        (PublicKey::Ed25519(key), MessageDigest::None, None) => {
            verify_ed25519(&key, msg, signature)?
        }
        #[cfg(feature = "rsa")]
        (PublicKey::Rsa(key), MessageDigest::Sha256, Some(padding)) => {
            verify_rsa(&key, padding, msg, signature)?
        }
        (PublicKey::EcdsaP256(key), MessageDigest::Sha256, None) => {
            verify_ecdsa_p256(&key, msg, signature)?
        }
        _ => return Err(CryptoError::CryptoFailure),
    };

    tracing::debug!(
        scheme = S::NAME,
        message_len = msg.len(),
        valid = verification.is_valid(),
        "verified signature"
    );
    Ok(verification)
}

fn verify_ed25519(
    key: &ed25519_dalek::VerifyingKey,
    msg: &[u8],
    signature: &[u8],
) -> CryptoResult<Verification> {
    let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
        return Ok(Verification::Invalid);
    };
    Ok(Verification::from_ok(key.verify(msg, &signature)))
}

#[cfg(feature = "rsa")]
fn verify_rsa(
    key: &rsa::RsaPublicKey,
    padding: RsaPadding,
    msg: &[u8],
    signature: &[u8],
) -> CryptoResult<Verification> {
    use rsa::traits::PublicKeyParts;
    use rsa::{Pkcs1v15Sign, Pss};

    if signature.len() != key.size() {
        return Ok(Verification::Invalid);
    }

    let hashed = Sha256::digest(msg);
    let verification = match padding {
        RsaPadding::Pkcs1v15 => {
            Verification::from_ok(key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature))
        }
        RsaPadding::Pss => {
            let digest_salt = <Sha256 as Digest>::output_size();
            let max_salt = pss_max_salt_len(key);
            let accepted = key
                .verify(Pss::new_with_salt::<Sha256>(digest_salt), &hashed, signature)
                .is_ok()
                || (max_salt > digest_salt
                    && key
                        .verify(Pss::new_with_salt::<Sha256>(max_salt), &hashed, signature)
                        .is_ok());
            if accepted {
                Verification::Valid
            } else {
                Verification::Invalid
            }
        }
    };
    Ok(verification)
}

/// Largest PSS salt that fits the modulus with a SHA-256 digest.
#[cfg(feature = "rsa")]
fn pss_max_salt_len(key: &rsa::RsaPublicKey) -> usize {
    use rsa::traits::PublicKeyParts;

    let em_bits = key.n().bits().saturating_sub(1);
    let em_len = em_bits.div_ceil(8);
    em_len.saturating_sub(<Sha256 as Digest>::output_size() + 2)
}

fn verify_ecdsa_p256(
    key: &p256::PublicKey,
    msg: &[u8],
    signature: &[u8],
) -> CryptoResult<Verification> {
    const SCALAR_LEN: usize = 32;

    let (r, s) = parse_ecdsa_signature(signature)?;
    if r.len() > SCALAR_LEN || s.len() > SCALAR_LEN {
        return Ok(Verification::Invalid);
    }

    let mut r_bytes = p256::FieldBytes::default();
    let mut s_bytes = p256::FieldBytes::default();
    r_bytes[SCALAR_LEN - r.len()..].copy_from_slice(&r);
    s_bytes[SCALAR_LEN - s.len()..].copy_from_slice(&s);

    // Zero or out-of-range scalars are well formed but can never verify.
    let Ok(signature) = p256::ecdsa::Signature::from_scalars(r_bytes, s_bytes) else {
        return Ok(Verification::Invalid);
    };

    let verifying_key = p256::ecdsa::VerifyingKey::from(key);
    Ok(Verification::from_ok(verifying_key.verify(msg, &signature)))
}
