// Test vectors module for interoperability testing
// Known-answer vectors for the GCM implementation in this crate, in a form
// that can be exported for comparison with other implementations

pub mod aes_gcm;

use galois_gcm::error::CryptoResult;

/// Render every test vector as text
pub fn generate_all_test_vectors() -> CryptoResult<Vec<u8>> {
    let mut result = Vec::new();

    result.extend_from_slice(b"Galois GCM Test Vectors\n");
    result.extend_from_slice(b"=======================\n\n");

    let sections = [
        ("STANDARD TEST VECTORS", aes_gcm::standard_test_vectors()),
        ("SPECIAL CASE TEST VECTORS", aes_gcm::special_case_test_vectors()),
    ];

    for (title, vectors) in sections.iter() {
        result.extend_from_slice(format!("{}\n{}\n\n", title, "=".repeat(title.len())).as_bytes());

        for vector in vectors {
            result.extend_from_slice(format!("Name: {}\n", vector.name).as_bytes());
            result.extend_from_slice(format!("Key: {}\n", vector.key).as_bytes());
            result.extend_from_slice(format!("IV: {}\n", vector.iv).as_bytes());
            if !vector.aad.is_empty() {
                result.extend_from_slice(format!("AAD: {}\n", vector.aad).as_bytes());
            }
            result.extend_from_slice(format!("Plaintext: {}\n", vector.plaintext).as_bytes());
            result.extend_from_slice(format!("Ciphertext: {}\n", vector.ciphertext).as_bytes());
            result.extend_from_slice(format!("Tag: {}\n\n", vector.tag).as_bytes());
        }
    }

    Ok(result)
}
