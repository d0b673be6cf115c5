//! GF(2^128) Multiplication
//!
//! Field elements use GCM's storage convention: the most significant bit of
//! byte 0 is the coefficient of x^0 and the least significant bit of byte 15
//! is the coefficient of x^127. Internally each 32-bit big-endian word is
//! bit-reversed so that bit `i` of limb `k` holds the coefficient of
//! x^(32k + i); multiplication then proceeds in natural polynomial order and
//! the result is reflected back on the way out. Nothing outside this module
//! deals with reflected bit order.
//!
//! The carryless products are computed without a CLMUL instruction using the
//! interleaved-plane technique described at
//! <https://bearssl.org/constanttime.html#ghash-for-gcm>, with no
//! data-dependent branches or table lookups.

use super::block_cipher::{Block, BLOCK_SIZE};

/// The additive identity
pub const ZERO: Block = [0u8; BLOCK_SIZE];

/// The multiplicative identity (coefficient of x^0 set)
pub const ONE: Block = [0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Multiply two field elements modulo x^128 + x^7 + x^2 + x + 1.
pub fn mul(a: &Block, b: &Block) -> Block {
    let x = to_natural(a);
    let y = to_natural(b);
    let (lo, hi) = clmul128(x, y);
    from_natural(reduce(lo, hi))
}

/// Reflect a stored block into a natural-order polynomial (bit i = x^i)
fn to_natural(block: &Block) -> u128 {
    let mut value = 0u128;
    for (k, word) in block.chunks_exact(4).enumerate() {
        let limb = u32::from_be_bytes([word[0], word[1], word[2], word[3]]).reverse_bits();
        value |= u128::from(limb) << (32 * k);
    }
    value
}

/// Inverse of `to_natural`
fn from_natural(value: u128) -> Block {
    let mut out = [0u8; BLOCK_SIZE];
    for (k, word) in out.chunks_exact_mut(4).enumerate() {
        let limb = (value >> (32 * k)) as u32;
        word.copy_from_slice(&limb.reverse_bits().to_be_bytes());
    }
    out
}

/// 32x32 -> 64 bit carryless multiply.
///
/// Each operand is split into four planes holding every fourth bit. An
/// integer product of two planes has at most eight terms per column, so the
/// carries stay within the three bits above each column and are masked off.
fn bmul32(a: u32, b: u32) -> u64 {
    #[inline(always)]
    fn mul(a: u32, b: u32) -> u64 {
        u64::from(a) * u64::from(b)
    }

    let a0 = a & 0x1111_1111;
    let a1 = a & 0x2222_2222;
    let a2 = a & 0x4444_4444;
    let a3 = a & 0x8888_8888;

    let b0 = b & 0x1111_1111;
    let b1 = b & 0x2222_2222;
    let b2 = b & 0x4444_4444;
    let b3 = b & 0x8888_8888;

    let c0 = mul(a0, b0) ^ mul(a1, b3) ^ mul(a2, b2) ^ mul(a3, b1);
    let c1 = mul(a0, b1) ^ mul(a1, b0) ^ mul(a2, b3) ^ mul(a3, b2);
    let c2 = mul(a0, b2) ^ mul(a1, b1) ^ mul(a2, b0) ^ mul(a3, b3);
    let c3 = mul(a0, b3) ^ mul(a1, b2) ^ mul(a2, b1) ^ mul(a3, b0);

    (c0 & 0x1111_1111_1111_1111)
        | (c1 & 0x2222_2222_2222_2222)
        | (c2 & 0x4444_4444_4444_4444)
        | (c3 & 0x8888_8888_8888_8888)
}

/// 64x64 -> 128 bit carryless multiply (Karatsuba over 32-bit limbs)
fn bmul64(a: u64, b: u64) -> u128 {
    let (a0, a1) = (a as u32, (a >> 32) as u32);
    let (b0, b1) = (b as u32, (b >> 32) as u32);

    let lo = bmul32(a0, b0);
    let hi = bmul32(a1, b1);
    let mid = bmul32(a0 ^ a1, b0 ^ b1) ^ lo ^ hi;

    u128::from(lo) ^ (u128::from(mid) << 32) ^ (u128::from(hi) << 64)
}

/// 128x128 -> 256 bit carryless multiply, returned as (low, high) halves
fn clmul128(a: u128, b: u128) -> (u128, u128) {
    let (a0, a1) = (a as u64, (a >> 64) as u64);
    let (b0, b1) = (b as u64, (b >> 64) as u64);

    let lo = bmul64(a0, b0);
    let hi = bmul64(a1, b1);
    let mid = bmul64(a0 ^ a1, b0 ^ b1) ^ lo ^ hi;

    (lo ^ (mid << 64), hi ^ (mid >> 64))
}

/// Reduce a 256-bit product modulo x^128 + x^7 + x^2 + x + 1.
///
/// x^128 = x^7 + x^2 + x + 1, so the high half is folded in as
/// hi ^ hi<<1 ^ hi<<2 ^ hi<<7. The bits those shifts push past x^127 are
/// folded into the high half first; they are few enough not to overflow again.
fn reduce(lo: u128, hi: u128) -> u128 {
    let overflow = (hi >> 127) ^ (hi >> 126) ^ (hi >> 121);
    let hi = hi ^ overflow;
    lo ^ hi ^ (hi << 1) ^ (hi << 2) ^ (hi << 7)
}
