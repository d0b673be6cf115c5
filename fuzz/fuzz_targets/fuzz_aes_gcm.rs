#![no_main]

use arbitrary::Arbitrary;
use galois_gcm::gcm::{self, AesGcm, AuthResult, TagLength};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct AesGcmFuzzInput {
    plaintext: Vec<u8>,
    key: Vec<u8>,
    nonce: Vec<u8>,
    associated_data: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Vec<u8>,
    tag_length_index: u8,
    flip_bit: u16,
}

fuzz_target!(|input: AesGcmFuzzInput| {
    // Fold the fuzzed key onto a valid AES key size
    let key_len = match input.key.len() % 3 {
        0 => 16,
        1 => 24,
        _ => 32,
    };
    let mut key = input.key.clone();
    key.resize(key_len, 0);
    let cipher = match AesGcm::new(&key) {
        Ok(cipher) => cipher,
        Err(_) => return,
    };

    let tag_length = TagLength::ALL[input.tag_length_index as usize % TagLength::ALL.len()];

    // Round trip must always succeed for a non-empty nonce
    let mut buffer = input.plaintext.clone();
    match cipher.encrypt_in_place_detached(
        &input.nonce,
        &input.associated_data,
        &mut buffer,
        tag_length,
    ) {
        Ok(tag) => {
            let mut sealed = buffer.clone();
            let result = cipher
                .decrypt_in_place_detached(
                    &input.nonce,
                    &input.associated_data,
                    &mut sealed,
                    tag.as_bytes(),
                )
                .expect("valid parameters must not error");
            assert_eq!(result, AuthResult::Authentic);
            assert_eq!(sealed, input.plaintext);

            // Any single bit flip in ciphertext or tag must be rejected
            let mut tampered = buffer.clone();
            tampered.extend_from_slice(tag.as_bytes());
            let bit = input.flip_bit as usize % (tampered.len() * 8);
            tampered[bit / 8] ^= 1 << (bit % 8);
            let (body, received_tag) = tampered.split_at_mut(buffer.len());
            let result = cipher
                .decrypt_in_place_detached(&input.nonce, &input.associated_data, body, received_tag)
                .expect("valid parameters must not error");
            assert_eq!(result, AuthResult::Forged);
            assert!(body.iter().all(|&b| b == 0));
        }
        Err(_) => assert!(input.nonce.is_empty()),
    }

    // Arbitrary ciphertext and tag must never panic
    let _ = gcm::decrypt(&input.ciphertext, &input.nonce, &input.associated_data, &key, &input.tag);
    let _ = cipher.decrypt(&input.ciphertext, &input.nonce, Some(&input.associated_data));
});
