#![no_main]

use libfuzzer_sys::fuzz_target;
use pemcrypt::core::operations::ecdsa_sig::{build_ecdsa_signature, parse_ecdsa_signature};

fuzz_target!(|data: &[u8]| {
    // Anything that parses is canonical, so it must re-encode byte for byte
    if let Ok((r, s)) = parse_ecdsa_signature(data) {
        assert_eq!(build_ecdsa_signature(&r, &s), data);
    }
});
