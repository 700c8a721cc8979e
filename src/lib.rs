//! Type-checked key handles, PEM key codecs, signatures and AES-GCM.
//!
//! This crate is a small safety layer over audited primitives, shaped for
//! embedding in a scripting host. Keys are opaque, shareable handles that
//! know their algorithm and whether they carry private material; every
//! operation checks both before touching key bytes.
//!
//! # Quick Start
//!
//! ```rust
//! use pemcrypt::core::operations::sign::{sign, verify};
//! use pemcrypt::{Ed25519, KeyHandle, Verification};
//!
//! // Generate a key pair and export the public half
//! let key = KeyHandle::generate_ed25519()?;
//! let public = pemcrypt::core::key::pem::import_public_pem(&key.public_pem()?)?;
//! assert!(!public.has_private_material());
//!
//! // Sign and verify
//! let signature = sign::<Ed25519>(&key, b"hello")?;
//! assert_eq!(verify::<Ed25519>(&public, b"hello", &signature)?, Verification::Valid);
//! assert_eq!(verify::<Ed25519>(&public, b"hellp", &signature)?, Verification::Invalid);
//! # Ok::<(), pemcrypt::CryptoError>(())
//! ```
//!
//! # Algorithms
//!
//! | Operation | Algorithm | Key type |
//! |-----------|-----------|----------|
//! | Sign / verify | Ed25519 | `ED25519` |
//! | Sign / verify | RSASSA-PKCS1-v1_5, SHA-256 | `rsaEncryption` |
//! | Sign / verify | RSASSA-PSS, SHA-256 | `rsaEncryption` |
//! | Sign / verify | ECDSA P-256, SHA-256, DER | `id-ecPublicKey` |
//! | Encrypt / decrypt | AES-128-GCM, AES-256-GCM | raw key bytes |
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! pemcrypt = "0.1"                                               # with RSA (default)
//! pemcrypt = { version = "0.1", default-features = false }      # no RSA
//! pemcrypt = { version = "0.1", features = ["prelude"] }        # glob imports
//! ```
//!
//! # Security
//!
//! - Private key material is zeroized on drop
//! - Debug output redacts key material
//! - Decrypted plaintext and exported private PEM are returned in `Zeroizing`
//! - Public key comparison is constant-time
//! - No unsafe code
//!
//! Nonce uniqueness under a given AES key is the caller's responsibility.
//!
//! RSA support uses the `rsa` crate, which is affected by RUSTSEC-2023-0071
//! (Marvin Attack). Build with `default-features = false` to leave RSA out.
//!
//! # Modules
//!
//! - [`core`] - Key handles, codecs and operations
//! - [`host`] - Flat, fixed-algorithm functions for host bindings
//! - `prelude` - Ergonomic imports (requires `prelude` feature)

#![forbid(unsafe_code)]

pub mod core;
pub mod host;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use crate::core::algorithm::Algorithm;
pub use crate::core::error::{CryptoError, CryptoResult};
pub use crate::core::key::KeyHandle;
pub use crate::core::operations::aead::AesGcmVariant;
pub use crate::core::operations::sign::Verification;
pub use crate::core::scheme::{EcdsaP256Sha256, Ed25519, SignatureScheme};

#[cfg(feature = "rsa")]
pub use crate::core::scheme::{RsaPkcs1Sha256, RsaPssSha256};
