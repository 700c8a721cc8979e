//! Cryptographic operations.
//!
//! - [`sign`] - Sign and verify dispatch over key handles
//! - [`aead`] - AES-GCM encryption and decryption
//! - [`ecdsa_sig`] - DER codec for ECDSA signatures

pub mod aead;
pub mod ecdsa_sig;
pub mod sign;
