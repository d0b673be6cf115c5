/*!
 * Galois GCM
 *
 * Authenticated encryption with associated data using the Galois/Counter
 * Mode of NIST SP 800-38D. The mode is implemented over a generic 128-bit
 * block cipher, with AES-128, AES-192 and AES-256 provided.
 *
 * The building blocks are exposed individually:
 *
 * - GF(2^128) multiplication in GCM's reflected bit order
 * - the GHASH universal hash
 * - the GCTR counter-mode keystream
 * - GCM encryption, verified decryption and GMAC
 *
 * Multiplication uses no secret-dependent branches or table lookups, and
 * tag comparison runs in constant time over the full tag.
 */

/// Galois/Counter Mode and its building blocks
pub mod gcm;

/// Common error types for the crate
pub mod error;

/// Constant-time comparison and timing verification
pub mod security;

/// Utilities for cryptographic operations
pub mod utils;

pub use error::{CryptoError, CryptoResult};
pub use gcm::{AesGcm, AuthResult, Gcm, GcmConfig, Tag, TagLength};

/// Initialize the library.
///
/// Runs the GCM known-answer self test against the published SP 800-38D
/// vectors. Call it once at start-up before relying on the cipher.
///
/// # Returns
///
/// `Ok(())` if the self test passes, or `SelfTestFailed` otherwise
///
/// # Example
///
/// ```
/// use galois_gcm::prelude::*;
///
/// fn main() -> Result<(), CryptoError> {
///     init()?;
///
///     let cipher = AesGcm::new(&[0x42; 16])?;
///     let nonce = cipher.generate_nonce()?;
///     let sealed = cipher.encrypt(b"hello", &nonce, None)?;
///     assert_eq!(cipher.decrypt(&sealed, &nonce, None)?, b"hello");
///
///     Ok(())
/// }
/// ```
pub fn init() -> Result<(), CryptoError> {
    gcm::self_test()
}

/// The most commonly used types and functions
pub mod prelude {
    pub use crate::gcm::{
        decrypt, decrypt_with_nonce, encrypt, encrypt_with_random_nonce, generate_nonce, gmac,
        verify_gmac, AesCipher, AesGcm, AuthResult, BlockCipher, Gcm, GcmConfig, KeySize, Tag,
        TagLength,
    };
    pub use crate::init;
    pub use crate::CryptoError;
    pub use crate::CryptoResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization() {
        assert!(init().is_ok());
    }

    #[test]
    fn test_prelude_round_trip() {
        use prelude::*;

        init().unwrap();

        let key = crate::utils::random_bytes(32).unwrap();
        let message = b"Hello Elena, this is an authenticated message from Mary!";
        let header = b"from=mary;to=elena";

        let (sealed, nonce) = encrypt_with_random_nonce(message, &key, Some(header)).unwrap();
        let opened = decrypt_with_nonce(&sealed, &key, &nonce, Some(header)).unwrap();
        assert_eq!(opened, message);

        let err = decrypt_with_nonce(&sealed, &key, &nonce, Some(b"from=eve")).unwrap_err();
        assert!(err.is_authentication_failure());
    }
}
