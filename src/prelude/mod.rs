//! Glob-importable names for everyday use.
//!
//! # Usage
//!
//! ```rust
//! use pemcrypt::prelude::*;
//!
//! let key = KeyHandle::generate_ed25519()?;
//! let signature = sign::<Ed25519>(&key, b"hello")?;
//! assert!(verify::<Ed25519>(&key.to_public(), b"hello", &signature)?.is_valid());
//! # Ok::<(), CryptoError>(())
//! ```

pub use crate::core::algorithm::Algorithm;
pub use crate::core::error::{CryptoError, CryptoResult};
pub use crate::core::key::pem::{import_private_pem, import_public_pem};
pub use crate::core::key::KeyHandle;
pub use crate::core::operations::aead::{decrypt, decrypt_with, encrypt, encrypt_with, AesGcmVariant};
pub use crate::core::operations::ecdsa_sig::{build_ecdsa_signature, parse_ecdsa_signature};
pub use crate::core::operations::sign::{sign, verify, Verification};
pub use crate::core::scheme::{EcdsaP256Sha256, Ed25519, SignatureScheme};

#[cfg(feature = "rsa")]
pub use crate::core::scheme::{RsaPkcs1Sha256, RsaPssSha256};
