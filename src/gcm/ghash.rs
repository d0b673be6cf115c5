//! GHASH Universal Hash
//!
//! GHASH folds 128-bit blocks into an accumulator as `acc = (acc ^ block) * H`
//! in GF(2^128). GCM feeds it the AAD, then the ciphertext, each zero-padded to
//! a block boundary, then one block holding both lengths in bits.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::block_cipher::{Block, BLOCK_SIZE};
use super::gf128;

/// Fold `data` into `acc` under the hash subkey `h`.
///
/// A trailing partial block is zero-padded. Empty input leaves `acc`
/// unchanged.
pub fn ghash(h: &Block, acc: &mut Block, data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let mut chunks = data.chunks_exact(BLOCK_SIZE);
    for chunk in &mut chunks {
        absorb(h, acc, chunk);
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut padded = [0u8; BLOCK_SIZE];
        padded[..remainder.len()].copy_from_slice(remainder);
        absorb(h, acc, &padded);
        padded.zeroize();
    }
}

#[inline]
fn absorb(h: &Block, acc: &mut Block, block: &[u8]) {
    for (a, b) in acc.iter_mut().zip(block.iter()) {
        *a ^= b;
    }
    *acc = gf128::mul(acc, h);
}

/// Encode two byte counts as the GHASH length block: both values in bits,
/// as 64-bit big-endian integers.
pub fn length_block(first_len: u64, second_len: u64) -> Block {
    let mut block = [0u8; BLOCK_SIZE];
    block[..8].copy_from_slice(&first_len.wrapping_mul(8).to_be_bytes());
    block[8..].copy_from_slice(&second_len.wrapping_mul(8).to_be_bytes());
    block
}

/// GHASH state holding the subkey and running accumulator
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ghash {
    h: Block,
    acc: Block,
}

impl Ghash {
    /// Start a new hash with an all-zero accumulator
    pub fn new(h: &Block) -> Self {
        Self {
            h: *h,
            acc: [0u8; BLOCK_SIZE],
        }
    }

    /// Absorb `data`, zero-padding a trailing partial block
    pub fn update_padded(&mut self, data: &[u8]) {
        ghash(&self.h, &mut self.acc, data);
    }

    /// Absorb the final length block
    pub fn update_lengths(&mut self, first_len: u64, second_len: u64) {
        let block = length_block(first_len, second_len);
        absorb(&self.h, &mut self.acc, &block);
    }

    /// Current accumulator value
    pub fn accumulator(&self) -> Block {
        self.acc
    }

    /// Consume the state and return the hash value
    pub fn finalize(self) -> Block {
        self.acc
    }
}
