//! AES-GCM authenticated encryption.
//!
//! Ciphertexts are `encrypted_plaintext || tag`, exactly [`TAG_LEN`] bytes
//! longer than the plaintext. The 12-byte nonce is not part of the output
//! and must be passed again to decrypt. No associated data is authenticated.
//!
//! # Nonce reuse
//!
//! A nonce must never be used twice with the same key. Nothing here tracks
//! nonces; that is the caller's responsibility.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::AeadInPlace;
use aes_gcm::{Aes128Gcm, Aes256Gcm, KeyInit, Nonce, Tag};
use zeroize::Zeroizing;

use crate::core::error::{CryptoError, CryptoResult};

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// AES-128-GCM key length in bytes.
pub const AES_128_KEY_LEN: usize = 16;

/// AES-256-GCM key length in bytes.
pub const AES_256_KEY_LEN: usize = 32;

/// AES-GCM key size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesGcmVariant {
    /// AES-128-GCM.
    Aes128,
    /// AES-256-GCM.
    Aes256,
}

impl AesGcmVariant {
    /// Key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => AES_128_KEY_LEN,
            Self::Aes256 => AES_256_KEY_LEN,
        }
    }

    /// Picks the variant for a key of `len` bytes.
    #[must_use]
    pub const fn from_key_len(len: usize) -> Option<Self> {
        match len {
            AES_128_KEY_LEN => Some(Self::Aes128),
            AES_256_KEY_LEN => Some(Self::Aes256),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Aes128 => "aes-128-gcm",
            Self::Aes256 => "aes-256-gcm",
        }
    }
}

enum Cipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn new(variant: AesGcmVariant, key: &[u8]) -> CryptoResult<Self> {
        let cipher = match variant {
            AesGcmVariant::Aes128 => Aes128Gcm::new_from_slice(key).map(Self::Aes128),
            AesGcmVariant::Aes256 => Aes256Gcm::new_from_slice(key).map(Self::Aes256),
        };
        cipher.map_err(|_| CryptoError::CryptoFailure)
    }

    fn encrypt_detached(&self, nonce: &Nonce<U12>, buffer: &mut [u8]) -> CryptoResult<Tag> {
        match self {
            Self::Aes128(cipher) => cipher.encrypt_in_place_detached(nonce, &[], buffer),
            Self::Aes256(cipher) => cipher.encrypt_in_place_detached(nonce, &[], buffer),
        }
        .map_err(|_| CryptoError::CryptoFailure)
    }

    fn decrypt_detached(&self, nonce: &Nonce<U12>, buffer: &mut [u8], tag: &Tag) -> CryptoResult<()> {
        match self {
            Self::Aes128(cipher) => cipher.decrypt_in_place_detached(nonce, &[], buffer, tag),
            Self::Aes256(cipher) => cipher.decrypt_in_place_detached(nonce, &[], buffer, tag),
        }
        .map_err(|_| CryptoError::VerifyFailure)
    }
}

fn check_len(param: &'static str, expected: usize, actual: usize) -> CryptoResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CryptoError::InvalidArgument {
            param,
            expected,
            actual,
        })
    }
}

fn nonce_from(nonce: &[u8]) -> CryptoResult<Nonce<U12>> {
    let bytes: [u8; NONCE_LEN] = nonce.try_into().map_err(|_| CryptoError::InvalidArgument {
        param: "nonce",
        expected: NONCE_LEN,
        actual: nonce.len(),
    })?;
    Ok(Nonce::from(bytes))
}

fn variant_for_key(key: &[u8]) -> CryptoResult<AesGcmVariant> {
    AesGcmVariant::from_key_len(key.len()).ok_or(CryptoError::InvalidArgument {
        param: "key",
        expected: AES_256_KEY_LEN,
        actual: key.len(),
    })
}

// =============================================================================
// Encrypt
// =============================================================================

/// Encrypts `plaintext` with AES-128-GCM or AES-256-GCM, chosen by the key
/// length.
///
/// # Errors
///
/// - [`CryptoError::InvalidArgument`] if the key is not 16 or 32 bytes, or
///   the nonce is not 12 bytes
/// - [`CryptoError::CryptoFailure`] if the cipher fails
pub fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    encrypt_with(variant_for_key(key)?, key, nonce, plaintext)
}

/// Encrypts `plaintext` with the given AES-GCM variant.
///
/// # Errors
///
/// - [`CryptoError::InvalidArgument`] if the key length does not match the
///   variant, or the nonce is not 12 bytes
/// - [`CryptoError::CryptoFailure`] if the cipher fails
///
/// # Example
///
/// ```rust
/// use pemcrypt::core::operations::aead::{decrypt_with, encrypt_with, AesGcmVariant, TAG_LEN};
///
/// let key = [0x42u8; 16];
/// let nonce = [0x24u8; 12];
///
/// let ciphertext = encrypt_with(AesGcmVariant::Aes128, &key, &nonce, b"attack at dawn")?;
/// assert_eq!(ciphertext.len(), 14 + TAG_LEN);
///
/// let plaintext = decrypt_with(AesGcmVariant::Aes128, &key, &nonce, &ciphertext)?;
/// assert_eq!(plaintext.as_slice(), b"attack at dawn");
/// # Ok::<(), pemcrypt::CryptoError>(())
/// ```
pub fn encrypt_with(
    variant: AesGcmVariant,
    key: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    check_len("key", variant.key_len(), key.len())?;
    let nonce = nonce_from(nonce)?;

    let cipher = Cipher::new(variant, key)?;

    // Holds plaintext until encryption succeeds.
    let mut out = Zeroizing::new(vec![0u8; plaintext.len() + TAG_LEN]);
    let (body, tag_out) = out.split_at_mut(plaintext.len());
    body.copy_from_slice(plaintext);

    let tag = cipher.encrypt_detached(&nonce, body)?;
    tag_out.copy_from_slice(&tag);

    tracing::debug!(
        cipher = variant.name(),
        plaintext_len = plaintext.len(),
        "encrypted"
    );
    Ok(core::mem::take(&mut *out))
}

// =============================================================================
// Decrypt
// =============================================================================

/// Decrypts `ciphertext` (encrypted bytes followed by the 16-byte tag) with
/// AES-128-GCM or AES-256-GCM, chosen by the key length.
///
/// # Errors
///
/// - [`CryptoError::InvalidArgument`] if the key is not 16 or 32 bytes, the
///   nonce is not 12 bytes, or the ciphertext is shorter than the tag
/// - [`CryptoError::VerifyFailure`] if authentication fails
pub fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
    decrypt_with(variant_for_key(key)?, key, nonce, ciphertext)
}

/// Decrypts `ciphertext` with the given AES-GCM variant.
///
/// On authentication failure nothing is returned and the working buffer is
/// zeroized.
///
/// # Errors
///
/// - [`CryptoError::InvalidArgument`] if the key length does not match the
///   variant, the nonce is not 12 bytes, or the ciphertext is shorter than
///   the tag
/// - [`CryptoError::VerifyFailure`] if authentication fails
pub fn decrypt_with(
    variant: AesGcmVariant,
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    check_len("key", variant.key_len(), key.len())?;
    let nonce = nonce_from(nonce)?;
    let Some((body, tag)) = ciphertext.split_last_chunk::<TAG_LEN>() else {
        return Err(CryptoError::InvalidArgument {
            param: "ciphertext",
            expected: TAG_LEN,
            actual: ciphertext.len(),
        });
    };

    let cipher = Cipher::new(variant, key)?;

    let mut plaintext = Zeroizing::new(body.to_vec());
    cipher.decrypt_detached(&nonce, &mut plaintext, &Tag::from(*tag))?;

    tracing::debug!(
        cipher = variant.name(),
        plaintext_len = plaintext.len(),
        "decrypted"
    );
    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_128: [u8; 16] = [0x11; 16];
    const KEY_256: [u8; 32] = [0x22; 32];
    const NONCE: [u8; 12] = [0x33; 12];

    #[test]
    fn test_roundtrip_all_sizes() -> CryptoResult<()> {
        for key in [&KEY_128[..], &KEY_256[..]] {
            for len in [0usize, 1, 1024] {
                let plaintext = vec![0xabu8; len];
                let ciphertext = encrypt(key, &NONCE, &plaintext)?;
                assert_eq!(ciphertext.len(), len + TAG_LEN);

                let decrypted = decrypt(key, &NONCE, &ciphertext)?;
                assert_eq!(decrypted.as_slice(), plaintext.as_slice());
            }
        }
        Ok(())
    }

    #[test]
    fn test_known_answer_empty() -> CryptoResult<()> {
        // McGrew & Viega, GCM test cases 1 and 13.
        let tag = encrypt(&[0u8; 16], &[0u8; 12], &[])?;
        assert_eq!(
            tag,
            [
                0x58, 0xe2, 0xfc, 0xce, 0xfa, 0x7e, 0x30, 0x61, 0x36, 0x7f, 0x1d, 0x57, 0xa4,
                0xe7, 0x45, 0x5a
            ]
        );
        let tag = encrypt(&[0u8; 32], &[0u8; 12], &[])?;
        assert_eq!(
            tag,
            [
                0x53, 0x0f, 0x8a, 0xfb, 0xc7, 0x45, 0x36, 0xb9, 0xa9, 0x63, 0xb4, 0xf1, 0xc4,
                0xcb, 0x73, 0x8b
            ]
        );
        Ok(())
    }

    #[test]
    fn test_every_tag_byte_is_checked() -> CryptoResult<()> {
        let ciphertext = encrypt(&KEY_128, &NONCE, b"hello")?;
        for i in ciphertext.len() - TAG_LEN..ciphertext.len() {
            let mut tampered = ciphertext.clone();
            tampered[i] ^= 0x01;
            assert_eq!(
                decrypt(&KEY_128, &NONCE, &tampered).map(|_| ()),
                Err(CryptoError::VerifyFailure)
            );
        }
        Ok(())
    }

    #[test]
    fn test_wrong_key_or_nonce_fails_verification() -> CryptoResult<()> {
        let ciphertext = encrypt(&KEY_256, &NONCE, b"hello")?;

        let mut other_key = KEY_256;
        other_key[0] ^= 0x80;
        assert!(decrypt(&other_key, &NONCE, &ciphertext)
            .err()
            .is_some_and(|e| e.is_verify_failure()));

        let mut other_nonce = NONCE;
        other_nonce[11] ^= 0x01;
        assert!(decrypt(&KEY_256, &other_nonce, &ciphertext)
            .err()
            .is_some_and(|e| e.is_verify_failure()));
        Ok(())
    }

    #[test]
    fn test_invalid_key_length() {
        assert_eq!(
            encrypt(&[0u8; 24], &NONCE, b"x"),
            Err(CryptoError::InvalidArgument {
                param: "key",
                expected: 32,
                actual: 24
            })
        );
        assert_eq!(
            encrypt_with(AesGcmVariant::Aes128, &KEY_256, &NONCE, b"x"),
            Err(CryptoError::InvalidArgument {
                param: "key",
                expected: 16,
                actual: 32
            })
        );
        assert_eq!(
            decrypt_with(AesGcmVariant::Aes256, &KEY_128, &NONCE, &[0u8; 32]).map(|_| ()),
            Err(CryptoError::InvalidArgument {
                param: "key",
                expected: 32,
                actual: 16
            })
        );
    }

    #[test]
    fn test_invalid_nonce_length() {
        for nonce in [&[0u8; 0][..], &[0u8; 11], &[0u8; 13], &[0u8; 16]] {
            assert_eq!(
                encrypt(&KEY_128, nonce, b"x"),
                Err(CryptoError::InvalidArgument {
                    param: "nonce",
                    expected: NONCE_LEN,
                    actual: nonce.len()
                })
            );
            assert_eq!(
                decrypt(&KEY_128, nonce, &[0u8; 32]).map(|_| ()),
                Err(CryptoError::InvalidArgument {
                    param: "nonce",
                    expected: NONCE_LEN,
                    actual: nonce.len()
                })
            );
        }
    }

    #[test]
    fn test_ciphertext_shorter_than_tag() {
        assert_eq!(
            decrypt(&KEY_128, &NONCE, &[0u8; 15]).map(|_| ()),
            Err(CryptoError::InvalidArgument {
                param: "ciphertext",
                expected: TAG_LEN,
                actual: 15
            })
        );
    }

    #[test]
    fn test_tag_only_ciphertext_is_accepted() -> CryptoResult<()> {
        let ciphertext = encrypt(&KEY_128, &NONCE, b"")?;
        assert_eq!(ciphertext.len(), TAG_LEN);
        assert!(decrypt(&KEY_128, &NONCE, &ciphertext)?.is_empty());
        assert_eq!(
            decrypt(&KEY_128, &NONCE, &[0u8; TAG_LEN]).map(|_| ()),
            Err(CryptoError::VerifyFailure)
        );
        Ok(())
    }

    #[test]
    fn test_variant_from_key_len() {
        assert_eq!(AesGcmVariant::from_key_len(16), Some(AesGcmVariant::Aes128));
        assert_eq!(AesGcmVariant::from_key_len(32), Some(AesGcmVariant::Aes256));
        assert_eq!(AesGcmVariant::from_key_len(24), None);
        assert_eq!(AesGcmVariant::Aes128.key_len(), 16);
        assert_eq!(AesGcmVariant::Aes256.key_len(), 32);
    }
}
