#![no_main]

use libfuzzer_sys::fuzz_target;
use pemcrypt::core::key::pem::{import_private_pem, import_public_pem};

fuzz_target!(|data: &str| {
    // Arbitrary text must be rejected, never panic
    if let Ok(key) = import_private_pem(data) {
        assert!(key.has_private_material());
        let _ = key.public_pem();
    }
    if let Ok(key) = import_public_pem(data) {
        assert!(!key.has_private_material());
    }
});
