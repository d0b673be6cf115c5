use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

use crate::error::{error_codes, CryptoError, CryptoResult};

/// Generate random bytes of the specified length
pub fn random_bytes(length: usize) -> CryptoResult<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CryptoError::RandomGenerationError {
            cause: e.to_string(),
            error_code: error_codes::INSUFFICIENT_ENTROPY,
        })?;
    Ok(bytes)
}

/// Securely zero out sensitive data from memory
///
/// Uses the zeroize crate so the writes are not optimized away.
pub fn secure_zero(data: &mut [u8]) {
    data.zeroize();
}

/// Convert bytes to a lowercase hexadecimal string
pub fn to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Convert a hexadecimal string to bytes
pub fn from_hex(hex_str: &str) -> CryptoResult<Vec<u8>> {
    hex::decode(hex_str).map_err(|e| {
        CryptoError::invalid_parameter("hex", "even-length hexadecimal string", &e.to_string())
    })
}
