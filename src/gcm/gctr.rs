//! GCTR Counter-Mode Keystream
//!
//! Encrypts successive counter blocks and XORs the keystream into the data.
//! Only the last four bytes of the counter block change; they hold a
//! big-endian 32-bit counter that wraps modulo 2^32.

use zeroize::Zeroize;

use super::block_cipher::{Block, BlockCipher, BLOCK_SIZE};
use crate::error::{error_codes, CryptoError, CryptoResult};

/// Increment the low 32 bits of a counter block, big-endian, mod 2^32
pub fn inc32(counter: &mut Block) {
    let mut low = [0u8; 4];
    low.copy_from_slice(&counter[12..]);
    let next = u32::from_be_bytes(low).wrapping_add(1);
    counter[12..].copy_from_slice(&next.to_be_bytes());
}

/// Apply the keystream started at `icb` to `data` in place.
///
/// The counter advances between full blocks only; a trailing partial block
/// consumes the leading bytes of one more keystream block. Empty input makes
/// no cipher calls.
pub fn gctr<C: BlockCipher + ?Sized>(cipher: &C, icb: &Block, data: &mut [u8]) {
    if data.is_empty() {
        return;
    }

    let mut counter = *icb;
    let mut chunks = data.chunks_exact_mut(BLOCK_SIZE);

    for chunk in &mut chunks {
        let mut keystream = cipher.encrypt_block(&counter);
        xor_in_place(chunk, &keystream);
        keystream.zeroize();
        inc32(&mut counter);
    }

    let remainder = chunks.into_remainder();
    if !remainder.is_empty() {
        let mut keystream = cipher.encrypt_block(&counter);
        xor_in_place(remainder, &keystream[..remainder.len()]);
        keystream.zeroize();
    }
}

/// Copying variant of `gctr`; `output` must be exactly as long as `input`
pub fn gctr_into<C: BlockCipher + ?Sized>(
    cipher: &C,
    icb: &Block,
    input: &[u8],
    output: &mut [u8],
) -> CryptoResult<()> {
    if input.len() != output.len() {
        return Err(CryptoError::invalid_parameter_with_code(
            "output",
            &format!("{} bytes", input.len()),
            &format!("{} bytes", output.len()),
            error_codes::GCM_BUFFER_SIZE_MISMATCH,
        ));
    }

    output.copy_from_slice(input);
    gctr(cipher, icb, output);
    Ok(())
}

#[inline]
fn xor_in_place(data: &mut [u8], keystream: &[u8]) {
    for (d, k) in data.iter_mut().zip(keystream.iter()) {
        *d ^= k;
    }
}
