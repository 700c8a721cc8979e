//! Test vector types for the JSON fixtures in this directory.
//!
//! The AES-GCM cases come from the McGrew & Viega GCM paper; the signature
//! fixtures were produced with OpenSSL, plus RFC 8032 for Ed25519.

// Some fields only document the fixture
#![allow(dead_code)]

use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

// =============================================================================
// AES-GCM
// =============================================================================

/// Test vector for AES-128-GCM and AES-256-GCM.
#[derive(Debug, Deserialize)]
pub struct AesGcmTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Hex-encoded key; its length selects the variant
    pub key: String,
    /// Hex-encoded 12-byte nonce
    pub nonce: String,
    /// Hex-encoded plaintext (null for fail tests)
    pub plaintext: Option<String>,
    /// Hex-encoded ciphertext with the trailing tag
    pub ciphertext: String,
}

// =============================================================================
// Signatures
// =============================================================================

/// Test vector for a signature scheme over PEM keys.
#[derive(Debug, Deserialize)]
pub struct SignatureTestVector {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// One of `ed25519`, `rsassa-pkcs1-sha256`, `rsassa-pss-sha256`,
    /// `ecdsa-p256-sha256`
    pub scheme: String,
    /// Expected key type name
    #[serde(rename = "key-type")]
    pub key_type: String,
    #[serde(rename = "private-pem")]
    pub private_pem: String,
    #[serde(rename = "public-pem")]
    pub public_pem: String,
    /// Hex-encoded message
    pub message: String,
    /// Hex-encoded signature
    pub signature: String,
}

/// PEM input that must be rejected.
#[derive(Debug, Deserialize)]
pub struct PemFailTestVector {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// `private` or `public`: which importer to feed
    pub kind: String,
    pub pem: String,
}

// =============================================================================
// ECDSA signature encoding
// =============================================================================

/// Test vector for the DER `Ecdsa-Sig-Value` codec.
#[derive(Debug, Deserialize)]
pub struct EcdsaDerTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Hex-encoded DER
    pub der: String,
    /// Hex-encoded minimal `r` (absent for fail tests and round-trip only cases)
    #[serde(default)]
    pub r: Option<String>,
    /// Hex-encoded minimal `s`
    #[serde(default)]
    pub s: Option<String>,
}

// =============================================================================
// Helper functions
// =============================================================================

/// Decode a hex string to bytes.
/// Returns `None` if the string is not valid hex.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load a test vector suite from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(path: &str) -> TestVectorSuite<T> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {path}: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {path}: {e}"))
}
