//! AES-GCM Authenticated Encryption
//!
//! Galois/Counter Mode as specified in NIST SP 800-38D. Encryption runs the
//! payload through GCTR starting at J1 = inc32(J0); the tag is GHASH over
//! the AAD, the ciphertext and their bit lengths, encrypted with GCTR at J0.

use std::fmt;

use zeroize::Zeroize;

use super::block_cipher::{AesCipher, Block, BlockCipher, KeySize, BLOCK_SIZE};
use super::config::{GcmConfig, TagLength, GCM_NONCE_SIZE, GCM_TAG_SIZE};
use super::gctr::{gctr, inc32};
use super::ghash::Ghash;
use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::security::constant_time_eq;
use crate::utils;

/// Largest plaintext accepted under one nonce: 2^39 - 256 bits
pub const GCM_MAX_PLAINTEXT_LEN: u64 = (1 << 36) - 32;

/// Largest AAD accepted: 2^64 - 1 bits, rounded down to whole bytes
pub const GCM_MAX_AAD_LEN: u64 = (1 << 61) - 1;

/// Outcome of tag verification
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthResult {
    /// The tag matched; the plaintext may be used
    Authentic,
    /// The tag did not match; any plaintext output has been zeroed
    Forged,
}

impl AuthResult {
    pub fn is_authentic(self) -> bool {
        self == AuthResult::Authentic
    }

    /// Turn a forgery into an `AuthenticationError` for `?` propagation
    pub fn into_result(self, operation: &str) -> CryptoResult<()> {
        match self {
            AuthResult::Authentic => Ok(()),
            AuthResult::Forged => Err(CryptoError::authentication_error(
                operation,
                "GCM authentication tag mismatch",
                error_codes::GCM_AUTHENTICATION_FAILED,
            )),
        }
    }
}

/// An authentication tag: the full 128-bit value and the length it is
/// truncated to on output
#[derive(Clone, Copy)]
pub struct Tag {
    block: Block,
    length: TagLength,
}

impl Tag {
    fn new(block: Block, length: TagLength) -> Self {
        Self { block, length }
    }

    /// The truncated tag bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.block[..self.length.bytes()]
    }

    pub fn length(&self) -> TagLength {
        self.length
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Compare against received tag bytes in constant time
    pub fn verify(&self, received: &[u8]) -> AuthResult {
        if constant_time_eq(self.as_bytes(), received) {
            AuthResult::Authentic
        } else {
            AuthResult::Forged
        }
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(self.as_bytes(), other.as_bytes())
    }
}

impl Eq for Tag {}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", utils::to_hex(self.as_bytes()))
    }
}

/// GCM over any 128-bit block cipher
///
/// Holds the cipher and the hash subkey H = E(K, 0^128), computed once per
/// key. No per-message state is kept, so one instance can serve many
/// messages and threads. H is zeroized when the instance is dropped.
///
/// # Examples
///
/// ```
/// use galois_gcm::gcm::{AesCipher, Gcm, TagLength};
///
/// let cipher = AesCipher::new(&[0x42; 16]).unwrap();
/// let gcm = Gcm::from_cipher(cipher);
///
/// let nonce = [0x24; 12];
/// let mut buffer = *b"in-place message";
/// let tag = gcm
///     .encrypt_in_place_detached(&nonce, b"header", &mut buffer, TagLength::Tag128)
///     .unwrap();
///
/// let result = gcm
///     .decrypt_in_place_detached(&nonce, b"header", &mut buffer, tag.as_bytes())
///     .unwrap();
/// assert!(result.is_authentic());
/// assert_eq!(&buffer, b"in-place message");
/// ```
#[derive(Clone)]
pub struct Gcm<C: BlockCipher> {
    cipher: C,
    h: Block,
    config: GcmConfig,
}

/// AES-GCM with a 128, 192 or 256-bit key
pub type AesGcm = Gcm<AesCipher>;

impl<C: BlockCipher> Gcm<C> {
    /// Create a GCM instance over `cipher` with the default configuration
    pub fn from_cipher(cipher: C) -> Self {
        let h = cipher.encrypt_block(&[0u8; BLOCK_SIZE]);
        Self {
            cipher,
            h,
            config: GcmConfig::default(),
        }
    }

    /// Create a GCM instance over `cipher` with an explicit configuration
    pub fn from_cipher_with_config(cipher: C, config: GcmConfig) -> CryptoResult<Self> {
        config.validate()?;
        let mut gcm = Self::from_cipher(cipher);
        gcm.config = config;
        Ok(gcm)
    }

    pub fn config(&self) -> &GcmConfig {
        &self.config
    }

    /// Derive the pre-counter block J0 from a nonce.
    ///
    /// A 12-byte nonce is used directly as `IV || 0^31 || 1`. Any other
    /// length is hashed: `GHASH(IV || 0^(s+64) || [len(IV)]_64)`, with the
    /// length in bits.
    pub fn derive_j0(&self, iv: &[u8]) -> CryptoResult<Block> {
        check_nonce(iv)?;

        if iv.len() == GCM_NONCE_SIZE {
            let mut j0 = [0u8; BLOCK_SIZE];
            j0[..GCM_NONCE_SIZE].copy_from_slice(iv);
            j0[BLOCK_SIZE - 1] = 1;
            return Ok(j0);
        }

        log::debug!(
            "Deriving GCM pre-counter block from a {}-byte nonce via GHASH",
            iv.len()
        );
        let mut ghash = Ghash::new(&self.h);
        ghash.update_padded(iv);
        ghash.update_lengths(0, iv.len() as u64);
        Ok(ghash.finalize())
    }

    /// Full 128-bit tag: GCTR(J0, GHASH(A || C || lengths))
    fn tag_block(&self, j0: &Block, aad: &[u8], ciphertext: &[u8]) -> Block {
        let mut ghash = Ghash::new(&self.h);
        ghash.update_padded(aad);
        ghash.update_padded(ciphertext);
        ghash.update_lengths(aad.len() as u64, ciphertext.len() as u64);

        let mut tag = ghash.finalize();
        gctr(&self.cipher, j0, &mut tag);
        tag
    }

    /// Compute the tag GCM would attach to `ciphertext` without touching it
    pub fn compute_tag(
        &self,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        tag_length: TagLength,
    ) -> CryptoResult<Tag> {
        check_lengths(iv, aad.len(), ciphertext.len())?;
        let j0 = self.derive_j0(iv)?;
        Ok(Tag::new(self.tag_block(&j0, aad, ciphertext), tag_length))
    }

    /// Encrypt `buffer` in place and return the detached tag
    ///
    /// # Arguments
    ///
    /// * `iv` - Nonce of any non-zero length; 12 bytes is recommended
    /// * `aad` - Associated data, authenticated but not encrypted
    /// * `buffer` - Plaintext on entry, ciphertext on return
    /// * `tag_length` - Length the returned tag is truncated to
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the nonce is empty or the plaintext or
    /// AAD exceed the SP 800-38D limits. The buffer is untouched on error.
    ///
    /// # Security Considerations
    ///
    /// 1. The nonce must never repeat under the same key
    /// 2. Tags shorter than 96 bits only suit short messages with limited
    ///    forgery attempts (SP 800-38D Appendix C)
    pub fn encrypt_in_place_detached(
        &self,
        iv: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag_length: TagLength,
    ) -> CryptoResult<Tag> {
        check_lengths(iv, aad.len(), buffer.len())?;

        let j0 = self.derive_j0(iv)?;
        let mut j1 = j0;
        inc32(&mut j1);

        gctr(&self.cipher, &j1, buffer);
        let tag = self.tag_block(&j0, aad, buffer);

        Ok(Tag::new(tag, tag_length))
    }

    /// Verify and decrypt `buffer` in place
    ///
    /// The tag is recomputed over the received ciphertext and compared with
    /// `tag` in constant time over `tag.len()` bytes.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResult::Authentic)` - `buffer` holds the plaintext
    /// * `Ok(AuthResult::Forged)` - authentication failed and `buffer` has
    ///   been zeroed
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty nonce, a tag length outside
    /// {4, 8, 12..=16} bytes, or oversized inputs.
    pub fn decrypt_in_place_detached(
        &self,
        iv: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> CryptoResult<AuthResult> {
        let tag_length = TagLength::from_bytes(tag.len())?;
        check_lengths(iv, aad.len(), buffer.len())?;

        let j0 = self.derive_j0(iv)?;
        let expected = Tag::new(self.tag_block(&j0, aad, buffer), tag_length);

        let mut j1 = j0;
        inc32(&mut j1);
        gctr(&self.cipher, &j1, buffer);

        let result = expected.verify(tag);
        if result == AuthResult::Forged {
            utils::secure_zero(buffer);
            log::warn!(
                "GCM tag verification failed ({} ciphertext bytes, {} AAD bytes)",
                buffer.len(),
                aad.len()
            );
        }

        Ok(result)
    }

    /// Encrypt `plaintext` into `ciphertext`, which must be the same length
    pub fn encrypt_into(
        &self,
        iv: &[u8],
        aad: &[u8],
        plaintext: &[u8],
        ciphertext: &mut [u8],
        tag_length: TagLength,
    ) -> CryptoResult<Tag> {
        check_output_len(plaintext.len(), ciphertext.len())?;
        check_lengths(iv, aad.len(), plaintext.len())?;
        ciphertext.copy_from_slice(plaintext);
        self.encrypt_in_place_detached(iv, aad, ciphertext, tag_length)
    }

    /// Decrypt `ciphertext` into `plaintext`, which must be the same length.
    ///
    /// On `AuthResult::Forged` the output buffer is zeroed.
    pub fn decrypt_into(
        &self,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        plaintext: &mut [u8],
        tag: &[u8],
    ) -> CryptoResult<AuthResult> {
        check_output_len(ciphertext.len(), plaintext.len())?;
        TagLength::from_bytes(tag.len())?;
        check_lengths(iv, aad.len(), ciphertext.len())?;
        plaintext.copy_from_slice(ciphertext);
        self.decrypt_in_place_detached(iv, aad, plaintext, tag)
    }

    /// Encrypt and return `ciphertext || tag`
    ///
    /// The tag length comes from the instance configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use galois_gcm::gcm::AesGcm;
    ///
    /// let cipher = AesGcm::new(&[0x42; 32]).unwrap();
    /// let nonce = cipher.generate_nonce().unwrap();
    ///
    /// let sealed = cipher.encrypt(b"Secret message", &nonce, Some(b"metadata")).unwrap();
    /// assert_eq!(sealed.len(), b"Secret message".len() + 16);
    ///
    /// let opened = cipher.decrypt(&sealed, &nonce, Some(b"metadata")).unwrap();
    /// assert_eq!(opened, b"Secret message");
    /// ```
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        nonce: &[u8],
        associated_data: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        let aad = associated_data.unwrap_or(&[]);
        let tag_length = self.config.tag_length;

        let mut output = Vec::with_capacity(plaintext.len() + tag_length.bytes());
        output.extend_from_slice(plaintext);

        let tag = self.encrypt_in_place_detached(nonce, aad, &mut output, tag_length)?;
        output.extend_from_slice(tag.as_bytes());
        Ok(output)
    }

    /// Verify and decrypt `ciphertext || tag` produced by `encrypt`
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` if the data, nonce or associated data
    /// do not match what was encrypted, and `InvalidParameter` if the input
    /// is shorter than one tag.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        nonce: &[u8],
        associated_data: Option<&[u8]>,
    ) -> CryptoResult<Vec<u8>> {
        let tag_len = self.config.tag_length.bytes();
        if ciphertext.len() < tag_len {
            return Err(CryptoError::invalid_parameter(
                "ciphertext",
                &format!("at least {} bytes", tag_len),
                &format!("{} bytes", ciphertext.len()),
            ));
        }

        let aad = associated_data.unwrap_or(&[]);
        let (body, tag) = ciphertext.split_at(ciphertext.len() - tag_len);

        let mut plaintext = body.to_vec();
        self.decrypt_in_place_detached(nonce, aad, &mut plaintext, tag)?
            .into_result("decrypt")?;
        Ok(plaintext)
    }

    /// Authenticate `aad` only (GMAC): GCM with an empty plaintext
    pub fn gmac(&self, iv: &[u8], aad: &[u8], tag_length: TagLength) -> CryptoResult<Tag> {
        self.compute_tag(iv, aad, &[], tag_length)
    }

    /// Verify a GMAC tag in constant time
    pub fn verify_gmac(&self, iv: &[u8], aad: &[u8], tag: &[u8]) -> CryptoResult<AuthResult> {
        let tag_length = TagLength::from_bytes(tag.len())?;
        let result = self.gmac(iv, aad, tag_length)?.verify(tag);
        if result == AuthResult::Forged {
            log::warn!("GMAC verification failed ({} AAD bytes)", aad.len());
        }
        Ok(result)
    }

    /// Generate a random nonce of the configured length
    pub fn generate_nonce(&self) -> CryptoResult<Vec<u8>> {
        utils::random_bytes(self.config.nonce_length)
    }
}

impl Gcm<AesCipher> {
    /// Create a new AES-GCM cipher from a 16, 24 or 32-byte key
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the key is not 16, 24 or 32 bytes long
    ///
    /// # Examples
    ///
    /// ```
    /// use galois_gcm::gcm::{AesGcm, KeySize};
    ///
    /// let cipher = AesGcm::new(&[0x42; 24]).unwrap();
    /// assert_eq!(cipher.key_size(), KeySize::Aes192);
    /// assert!(AesGcm::new(&[0x42; 20]).is_err());
    /// ```
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        Ok(Self::from_cipher(AesCipher::new(key)?))
    }

    /// Create a new AES-GCM cipher with an explicit configuration
    pub fn with_config(key: &[u8], config: GcmConfig) -> CryptoResult<Self> {
        Self::from_cipher_with_config(AesCipher::new(key)?, config)
    }

    pub fn key_size(&self) -> KeySize {
        self.cipher.key_size()
    }
}

impl<C: BlockCipher> Drop for Gcm<C> {
    fn drop(&mut self) {
        self.h.zeroize();
    }
}

impl<C: BlockCipher> fmt::Debug for Gcm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gcm")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn check_nonce(iv: &[u8]) -> CryptoResult<()> {
    if iv.is_empty() {
        return Err(CryptoError::invalid_parameter_with_code(
            "nonce",
            "at least 1 byte",
            "0 bytes",
            error_codes::GCM_INVALID_NONCE_SIZE,
        ));
    }
    if (iv.len() as u64).checked_mul(8).is_none() {
        return Err(CryptoError::invalid_parameter_with_code(
            "nonce",
            "at most 2^64 - 1 bits",
            &format!("{} bytes", iv.len()),
            error_codes::GCM_INVALID_NONCE_SIZE,
        ));
    }
    Ok(())
}

fn check_lengths(iv: &[u8], aad_len: usize, text_len: usize) -> CryptoResult<()> {
    check_nonce(iv)?;

    if text_len as u64 > GCM_MAX_PLAINTEXT_LEN {
        return Err(CryptoError::invalid_parameter_with_code(
            "plaintext",
            &format!("at most {} bytes", GCM_MAX_PLAINTEXT_LEN),
            &format!("{} bytes", text_len),
            error_codes::GCM_MESSAGE_TOO_LONG,
        ));
    }
    if aad_len as u64 > GCM_MAX_AAD_LEN {
        return Err(CryptoError::invalid_parameter_with_code(
            "associated_data",
            &format!("at most {} bytes", GCM_MAX_AAD_LEN),
            &format!("{} bytes", aad_len),
            error_codes::GCM_MESSAGE_TOO_LONG,
        ));
    }
    Ok(())
}

fn check_output_len(input_len: usize, output_len: usize) -> CryptoResult<()> {
    if input_len != output_len {
        return Err(CryptoError::invalid_parameter_with_code(
            "output",
            &format!("{} bytes", input_len),
            &format!("{} bytes", output_len),
            error_codes::GCM_BUFFER_SIZE_MISMATCH,
        ));
    }
    Ok(())
}

/// Encrypt `plaintext` and return the ciphertext with a detached tag
///
/// # Arguments
///
/// * `plaintext` - The data to encrypt
/// * `iv` - Nonce of any non-zero length; 12 bytes is recommended
/// * `aad` - Associated data, authenticated but not encrypted
/// * `key` - AES key of 16, 24 or 32 bytes
/// * `tag_length` - Length the tag is truncated to
///
/// # Examples
///
/// ```
/// use galois_gcm::gcm::{self, TagLength};
///
/// let key = [0u8; 16];
/// let iv = [0u8; 12];
/// let (ciphertext, tag) = gcm::encrypt(b"", &iv, b"", &key, TagLength::Tag128).unwrap();
/// assert!(ciphertext.is_empty());
/// assert_eq!(
///     galois_gcm::utils::to_hex(tag.as_bytes()),
///     "58e2fccefa7e3061367f1d57a4e7455a"
/// );
/// ```
pub fn encrypt(
    plaintext: &[u8],
    iv: &[u8],
    aad: &[u8],
    key: &[u8],
    tag_length: TagLength,
) -> CryptoResult<(Vec<u8>, Tag)> {
    let gcm = AesGcm::new(key)?;
    let mut ciphertext = plaintext.to_vec();
    let tag = gcm.encrypt_in_place_detached(iv, aad, &mut ciphertext, tag_length)?;
    Ok((ciphertext, tag))
}

/// Verify and decrypt a ciphertext with a detached tag
///
/// # Errors
///
/// Returns `AuthenticationError` when the tag does not match; no plaintext
/// is released in that case.
pub fn decrypt(
    ciphertext: &[u8],
    iv: &[u8],
    aad: &[u8],
    key: &[u8],
    tag: &[u8],
) -> CryptoResult<Vec<u8>> {
    let gcm = AesGcm::new(key)?;
    let mut plaintext = ciphertext.to_vec();
    gcm.decrypt_in_place_detached(iv, aad, &mut plaintext, tag)?
        .into_result("decrypt")?;
    Ok(plaintext)
}

/// Encrypt with a freshly generated 12-byte nonce
///
/// # Returns
///
/// A tuple containing:
/// * `ciphertext` - The encrypted data with a 16-byte tag appended
/// * `nonce` - The nonce that must accompany the ciphertext
pub fn encrypt_with_random_nonce(
    plaintext: &[u8],
    key: &[u8],
    associated_data: Option<&[u8]>,
) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    let cipher = AesGcm::new(key)?;
    let nonce = cipher.generate_nonce()?;
    let ciphertext = cipher.encrypt(plaintext, &nonce, associated_data)?;
    Ok((ciphertext, nonce))
}

/// Decrypt `ciphertext || tag` produced by `encrypt_with_random_nonce`
pub fn decrypt_with_nonce(
    ciphertext: &[u8],
    key: &[u8],
    nonce: &[u8],
    associated_data: Option<&[u8]>,
) -> CryptoResult<Vec<u8>> {
    let cipher = AesGcm::new(key)?;
    cipher.decrypt(ciphertext, nonce, associated_data)
}

/// Compute a GMAC tag over `aad`
pub fn gmac(key: &[u8], iv: &[u8], aad: &[u8], tag_length: TagLength) -> CryptoResult<Tag> {
    AesGcm::new(key)?.gmac(iv, aad, tag_length)
}

/// Verify a GMAC tag over `aad`
pub fn verify_gmac(key: &[u8], iv: &[u8], aad: &[u8], tag: &[u8]) -> CryptoResult<AuthResult> {
    AesGcm::new(key)?.verify_gmac(iv, aad, tag)
}

/// Generate a random 12-byte nonce
pub fn generate_nonce() -> CryptoResult<Vec<u8>> {
    utils::random_bytes(GCM_NONCE_SIZE)
}

// SP 800-38D test cases 1 and 2: zero AES-128 key, zero 96-bit nonce
const SELF_TEST_TAG_EMPTY: [u8; GCM_TAG_SIZE] = [
    0x58, 0xe2, 0xfc, 0xce, 0xfa, 0x7e, 0x30, 0x61, 0x36, 0x7f, 0x1d, 0x57, 0xa4, 0xe7, 0x45, 0x5a,
];
const SELF_TEST_CIPHERTEXT: [u8; BLOCK_SIZE] = [
    0x03, 0x88, 0xda, 0xce, 0x60, 0xb6, 0xa3, 0x92, 0xf3, 0x28, 0xc2, 0xb9, 0x71, 0xb2, 0xfe, 0x78,
];
const SELF_TEST_TAG_BLOCK: [u8; GCM_TAG_SIZE] = [
    0xab, 0x6e, 0x47, 0xd4, 0x2c, 0xec, 0x13, 0xbd, 0xf5, 0x3a, 0x67, 0xb2, 0x12, 0x57, 0xbd, 0xdf,
];

/// Run the known-answer self test
///
/// Encrypts SP 800-38D test cases 1 and 2 and decrypts the result. Returns
/// `SelfTestFailed` if any output differs from the published values.
pub fn self_test() -> CryptoResult<()> {
    let gcm = AesGcm::new(&[0u8; 16])?;
    let iv = [0u8; GCM_NONCE_SIZE];

    let tag = gcm.compute_tag(&iv, &[], &[], TagLength::Tag128)?;
    if tag.as_bytes() != SELF_TEST_TAG_EMPTY {
        log::warn!("GCM self test failed: empty-message tag mismatch");
        return Err(CryptoError::self_test_failed(
            "gcm_empty_message",
            "tag does not match SP 800-38D test case 1",
        ));
    }

    let mut buffer = [0u8; BLOCK_SIZE];
    let tag = gcm.encrypt_in_place_detached(&iv, &[], &mut buffer, TagLength::Tag128)?;
    if buffer != SELF_TEST_CIPHERTEXT || tag.as_bytes() != SELF_TEST_TAG_BLOCK {
        log::warn!("GCM self test failed: single-block output mismatch");
        return Err(CryptoError::self_test_failed(
            "gcm_single_block",
            "ciphertext or tag does not match SP 800-38D test case 2",
        ));
    }

    let result = gcm.decrypt_in_place_detached(&iv, &[], &mut buffer, &SELF_TEST_TAG_BLOCK)?;
    if !result.is_authentic() || buffer != [0u8; BLOCK_SIZE] {
        log::warn!("GCM self test failed: decryption did not invert encryption");
        return Err(CryptoError::self_test_failed(
            "gcm_single_block_decrypt",
            "decryption of SP 800-38D test case 2 failed",
        ));
    }

    log::info!("GCM known-answer self test passed");
    Ok(())
}
