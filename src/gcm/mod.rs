//! Galois/Counter Mode Authenticated Encryption
//!
//! This module implements GCM as specified in NIST SP 800-38D over a generic
//! 128-bit block cipher, with AES (FIPS-197) as the provided instantiation.
//!
//! The layers build on each other bottom-up:
//!
//! - `block_cipher`: the forward block cipher seam and its AES implementation
//! - `gf128`: constant-time multiplication in GF(2^128)
//! - `ghash`: the GHASH universal hash
//! - `gctr`: the counter-mode keystream
//! - `Gcm`: encryption, verified decryption and GMAC built from the above

pub mod block_cipher;
pub mod config;
pub mod gctr;
pub mod gf128;
pub mod ghash;
mod gcm;

pub use block_cipher::{AesCipher, Block, BlockCipher, KeySize, BLOCK_SIZE};
pub use config::{GcmConfig, TagLength, GCM_NONCE_SIZE, GCM_TAG_SIZE};
pub use gcm::{
    decrypt, decrypt_with_nonce, encrypt, encrypt_with_random_nonce, generate_nonce, gmac,
    self_test, verify_gmac, AesGcm, AuthResult, Gcm, Tag, GCM_MAX_AAD_LEN,
    GCM_MAX_PLAINTEXT_LEN,
};
