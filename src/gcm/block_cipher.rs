//! Block Cipher Primitive
//!
//! GCM only ever needs the forward direction of a 128-bit block cipher. The
//! `BlockCipher` trait is that seam; `AesCipher` plugs the FIPS-197 AES
//! implementation from the `aes` crate into it.

use std::fmt;

use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::{error_codes, CryptoError, CryptoResult};

/// Size of a cipher block and of a GF(2^128) element in bytes
pub const BLOCK_SIZE: usize = 16;

/// A 128-bit block
pub type Block = [u8; BLOCK_SIZE];

/// Forward encryption of a single 128-bit block.
///
/// Implementations must be deterministic and hold no mutable state, so one
/// instance can be shared across threads.
pub trait BlockCipher {
    fn encrypt_block(&self, block: &Block) -> Block;
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    fn encrypt_block(&self, block: &Block) -> Block {
        (**self).encrypt_block(block)
    }
}

/// Supported AES key sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Map a key length in bytes to its AES variant
    pub fn from_key_len(len: usize) -> CryptoResult<Self> {
        match len {
            16 => Ok(KeySize::Aes128),
            24 => Ok(KeySize::Aes192),
            32 => Ok(KeySize::Aes256),
            other => Err(CryptoError::invalid_parameter_with_code(
                "key",
                "16, 24 or 32 bytes",
                &format!("{} bytes", other),
                error_codes::GCM_INVALID_KEY_SIZE,
            )),
        }
    }

    /// Key length in bytes
    pub fn key_len(&self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySize::Aes128 => write!(f, "AES-128"),
            KeySize::Aes192 => write!(f, "AES-192"),
            KeySize::Aes256 => write!(f, "AES-256"),
        }
    }
}

/// AES block cipher with an expanded key schedule.
///
/// The key schedule is zeroized when dropped.
#[derive(Clone)]
pub enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    /// Expand an AES key of 16, 24 or 32 bytes
    pub fn new(key: &[u8]) -> CryptoResult<Self> {
        let key_size = KeySize::from_key_len(key.len())?;
        let cipher = match key_size {
            KeySize::Aes128 => AesCipher::Aes128(Aes128::new(GenericArray::from_slice(key))),
            KeySize::Aes192 => AesCipher::Aes192(Aes192::new(GenericArray::from_slice(key))),
            KeySize::Aes256 => AesCipher::Aes256(Aes256::new(GenericArray::from_slice(key))),
        };
        Ok(cipher)
    }

    pub fn key_size(&self) -> KeySize {
        match self {
            AesCipher::Aes128(_) => KeySize::Aes128,
            AesCipher::Aes192(_) => KeySize::Aes192,
            AesCipher::Aes256(_) => KeySize::Aes256,
        }
    }
}

impl BlockCipher for AesCipher {
    fn encrypt_block(&self, block: &Block) -> Block {
        let mut buf = GenericArray::clone_from_slice(block);
        match self {
            AesCipher::Aes128(c) => c.encrypt_block(&mut buf),
            AesCipher::Aes192(c) => c.encrypt_block(&mut buf),
            AesCipher::Aes256(c) => c.encrypt_block(&mut buf),
        }
        let mut out = [0u8; BLOCK_SIZE];
        out.copy_from_slice(&buf);
        out
    }
}

impl fmt::Debug for AesCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesCipher")
            .field("key_size", &self.key_size())
            .finish_non_exhaustive()
    }
}
