//! DER codec for ECDSA signatures.
//!
//! Converts between the `Ecdsa-Sig-Value` structure from RFC 3279,
//!
//! ```text
//! Ecdsa-Sig-Value ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER }
//! ```
//!
//! and the two integers as big-endian unsigned byte strings.
//!
//! Decoded integers are minimal: no leading zero bytes, and zero is the empty
//! string. Encoding accepts any big-endian input, including leading zeros and
//! the empty string. The values are not checked against a curve order.

use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};

use crate::core::error::{CryptoError, CryptoResult};

/// Largest DER encoding of a P-256 signature.
pub const P256_MAX_DER_LEN: usize = 72;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
struct EcdsaSigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

/// Strips leading zero bytes; zero becomes the empty slice.
fn minimal(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Decodes a DER signature into `(r, s)`.
///
/// # Errors
///
/// Returns [`CryptoError::ParseFailure`] for anything that is not exactly one
/// canonical `Ecdsa-Sig-Value`: wrong tags or lengths, trailing bytes,
/// non-minimal or negative integers.
pub fn parse_ecdsa_signature(der: &[u8]) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    let sig = EcdsaSigValue::from_der(der).map_err(|_| CryptoError::ParseFailure)?;
    Ok((
        minimal(sig.r.as_bytes()).to_vec(),
        minimal(sig.s.as_bytes()).to_vec(),
    ))
}

/// DER-encodes `(r, s)` given as big-endian unsigned integers.
///
/// Empty input encodes as zero.
#[must_use]
pub fn build_ecdsa_signature(r: &[u8], s: &[u8]) -> Vec<u8> {
    // Only integers past the DER length limit fail to encode. Those yield an
    // empty signature, which no verifier accepts.
    encode_signature(r, s).unwrap_or_else(|_| {
        tracing::debug!(
            r_len = r.len(),
            s_len = s.len(),
            "ecdsa signature too large to encode"
        );
        Vec::new()
    })
}

pub(crate) fn encode_signature(r: &[u8], s: &[u8]) -> CryptoResult<Vec<u8>> {
    let sig = EcdsaSigValue {
        r: uint(r)?,
        s: uint(s)?,
    };

    let len = sig
        .encoded_len()
        .and_then(usize::try_from)
        .map_err(|_| CryptoError::EncodeFailure)?;

    let mut out = vec![0u8; len];
    let written = sig
        .encode_to_slice(&mut out)
        .map_err(|_| CryptoError::EncodeFailure)?
        .len();
    out.truncate(written);
    Ok(out)
}

fn uint(bytes: &[u8]) -> CryptoResult<UintRef<'_>> {
    let bytes = match minimal(bytes) {
        [] => &[0u8][..],
        nonzero => nonzero,
    };
    UintRef::new(bytes).map_err(|_| CryptoError::EncodeFailure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() -> CryptoResult<()> {
        let (r, s) = parse_ecdsa_signature(&[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02])?;
        assert_eq!(r, [0x01]);
        assert_eq!(s, [0x02]);
        Ok(())
    }

    #[test]
    fn test_parse_strips_sign_byte() -> CryptoResult<()> {
        let der = [0x30, 0x08, 0x02, 0x02, 0x00, 0x80, 0x02, 0x02, 0x00, 0xff];
        let (r, s) = parse_ecdsa_signature(&der)?;
        assert_eq!(r, [0x80]);
        assert_eq!(s, [0xff]);
        Ok(())
    }

    #[test]
    fn test_parse_zero_is_empty() -> CryptoResult<()> {
        let (r, s) = parse_ecdsa_signature(&[0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00])?;
        assert!(r.is_empty());
        assert!(s.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let cases: [&[u8]; 7] = [
            &[],
            &[0x30, 0x00],
            &[0x30, 0x03, 0x02, 0x01, 0x01],
            &[0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01, 0x00],
            &[0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x01],
            &[0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x01],
            &[0x31, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        ];
        for der in cases {
            assert_eq!(
                parse_ecdsa_signature(der),
                Err(CryptoError::ParseFailure),
                "accepted {der:02x?}"
            );
        }
    }

    #[test]
    fn test_build_minimal() {
        assert_eq!(
            build_ecdsa_signature(&[0x01], &[0x02]),
            [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]
        );
    }

    #[test]
    fn test_build_adds_sign_byte() {
        assert_eq!(
            build_ecdsa_signature(&[0x80], &[0x7f]),
            [0x30, 0x07, 0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0x7f]
        );
    }

    #[test]
    fn test_build_ignores_leading_zeros() {
        assert_eq!(
            build_ecdsa_signature(&[0x00, 0x00, 0x01], &[0x00, 0x02]),
            build_ecdsa_signature(&[0x01], &[0x02])
        );
    }

    #[test]
    fn test_build_empty_is_zero() {
        assert_eq!(
            build_ecdsa_signature(&[], &[]),
            [0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00]
        );
    }

    #[test]
    fn test_build_long_integers() -> CryptoResult<()> {
        let r = [0x7fu8; 300];
        let der = build_ecdsa_signature(&r, &[0x01]);
        assert!(!der.is_empty());

        let (r2, s2) = parse_ecdsa_signature(&der)?;
        assert_eq!(r2, r);
        assert_eq!(s2, [0x01]);
        Ok(())
    }

    #[test]
    fn test_roundtrip_full_width() -> CryptoResult<()> {
        let r = [0xa5u8; 32];
        let mut s = [0x5au8; 32];
        s[0] = 0x00;
        s[1] = 0x00;

        let der = build_ecdsa_signature(&r, &s);
        assert!(der.len() <= P256_MAX_DER_LEN);

        let (r2, s2) = parse_ecdsa_signature(&der)?;
        assert_eq!(r2, r);
        assert_eq!(s2, &s[2..]);

        assert_eq!(build_ecdsa_signature(&r2, &s2), der);
        Ok(())
    }
}
