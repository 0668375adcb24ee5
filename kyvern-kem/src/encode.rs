//! Serialization, compression and message encoding of polynomials.
//!
//! Every packed format is a little-endian bitstream: coefficient `i`
//! occupies bits `[i*d, (i+1)*d)`. Coefficients are canonicalized to
//! `[0, q)` before packing, so any representative congruent mod q
//! serializes identically.
//!
//! Compression avoids a hardware division: `x / q` is computed as a
//! multiplication by `ceil(2^36 / q)` followed by a shift, which is exact
//! for every numerator that occurs here.

use crate::params::{N, Q, SYMBYTES};
use crate::poly::Poly;
use crate::reduce::caddq;

const DIV_Q_SHIFT: u32 = 36;
const DIV_Q_MUL: u64 = 20_642_679;

/// Pack 256 values of `bits` bits each into `out` (`32 * bits` bytes).
fn pack_bits(values: &[u16; N], bits: usize, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 32 * bits);
    let mut acc: u32 = 0;
    let mut filled = 0;
    let mut pos = 0;
    for &v in values {
        acc |= (v as u32) << filled;
        filled += bits;
        while filled >= 8 {
            out[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            filled -= 8;
        }
    }
}

/// Unpack 256 values of `bits` bits each from `bytes`.
fn unpack_bits(bytes: &[u8], bits: usize) -> [u16; N] {
    debug_assert_eq!(bytes.len(), 32 * bits);
    let mask = (1u32 << bits) - 1;
    let mut values = [0u16; N];
    let mut acc: u32 = 0;
    let mut filled = 0;
    let mut input = bytes.iter();
    for v in values.iter_mut() {
        while filled < bits {
            if let Some(&b) = input.next() {
                acc |= (b as u32) << filled;
            }
            filled += 8;
        }
        *v = (acc & mask) as u16;
        acc >>= bits;
        filled -= bits;
    }
    values
}

/// `round(2^d * x / q) mod 2^d` for a coefficient in (-q, q).
#[inline]
fn compress_coeff(x: i16, d: usize) -> u16 {
    let numerator = ((caddq(x) as u64) << d) + (Q as u64) / 2;
    (((numerator * DIV_Q_MUL) >> DIV_Q_SHIFT) as u16) & ((1u16 << d) - 1)
}

/// `round(q * y / 2^d)`.
#[inline]
fn decompress_coeff(y: u16, d: usize) -> i16 {
    (((y as u32) * (Q as u32) + (1 << (d - 1))) >> d) as i16
}

/// Serialize with 12 bits per coefficient (384 bytes).
pub fn poly_to_bytes(poly: &Poly, out: &mut [u8]) {
    let mut values = [0u16; N];
    for (v, &c) in values.iter_mut().zip(poly.coeffs.iter()) {
        *v = caddq(c) as u16;
    }
    pack_bits(&values, 12, out);
}

/// Deserialize 12-bit coefficients. Values are taken as-is, without a
/// range check against q.
pub fn poly_from_bytes(bytes: &[u8]) -> Poly {
    let values = unpack_bits(bytes, 12);
    let mut poly = Poly::default();
    for (c, &v) in poly.coeffs.iter_mut().zip(values.iter()) {
        *c = v as i16;
    }
    poly
}

/// Compress to `d` bits per coefficient (`32 * d` bytes).
pub fn poly_compress(poly: &Poly, d: usize, out: &mut [u8]) {
    let mut values = [0u16; N];
    for (v, &c) in values.iter_mut().zip(poly.coeffs.iter()) {
        *v = compress_coeff(c, d);
    }
    pack_bits(&values, d, out);
}

/// Decompress from `d` bits per coefficient.
pub fn poly_decompress(bytes: &[u8], d: usize) -> Poly {
    let values = unpack_bits(bytes, d);
    let mut poly = Poly::default();
    for (c, &v) in poly.coeffs.iter_mut().zip(values.iter()) {
        *c = decompress_coeff(v, d);
    }
    poly
}

/// Map each message bit of `msg` to 0 or (q + 1) / 2 in `poly`.
pub fn poly_from_msg(poly: &mut Poly, msg: &[u8; SYMBYTES]) {
    for (i, &byte) in msg.iter().enumerate() {
        for j in 0..8 {
            let mask = 0i16.wrapping_sub(((byte >> j) & 1) as i16);
            poly.coeffs[8 * i + j] = mask & ((Q + 1) / 2);
        }
    }
}

/// Decode each coefficient to the nearer of 0 and q/2 (1-bit compression).
pub fn poly_to_msg(poly: &Poly) -> [u8; SYMBYTES] {
    let mut msg = [0u8; SYMBYTES];
    for (i, byte) in msg.iter_mut().enumerate() {
        for j in 0..8 {
            *byte |= (compress_coeff(poly.coeffs[8 * i + j], 1) as u8) << j;
        }
    }
    msg
}
