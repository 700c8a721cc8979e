#![no_main]

use libfuzzer_sys::fuzz_target;
use pemcrypt::core::operations::aead::{decrypt, NONCE_LEN};

const KEY: [u8; 16] = [0x42; 16];

fuzz_target!(|data: &[u8]| {
    if data.len() < NONCE_LEN {
        return;
    }
    let (nonce, ciphertext) = data.split_at(NONCE_LEN);
    // Forged ciphertexts must fail authentication, never panic
    let _ = decrypt(&KEY, nonce, ciphertext);
});
