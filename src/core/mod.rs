//! Core types and operations.
//!
//! - [`algorithm`] - Key algorithm identifiers
//! - [`error`] - Error types
//! - [`key`] - Key handles and their PEM codec
//! - [`scheme`] - Signature scheme markers (algorithm, digest, padding)
//! - [`operations`] - Signing, AEAD and signature encoding

pub mod algorithm;
pub mod error;
pub mod key;
pub mod operations;
pub mod scheme;

// Re-export commonly used items
pub use algorithm::Algorithm;
pub use error::{CryptoError, CryptoResult};
pub use key::KeyHandle;
pub use operations::sign::Verification;
