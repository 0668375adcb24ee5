//! Number-theoretic transform over Z_q[X]/(X^256 + 1).
//!
//! Scalar reference code. Each butterfly layer is exposed separately so the
//! vector backends can take over the wide layers and hand the narrow ones
//! back to this module.

use crate::params::N;
use crate::reduce::{barrett_reduce, fqmul};

/// Powers of zeta = 17 in bit-reversed order, Montgomery form, centered.
pub const ZETAS: [i16; 128] = [
    -1044, -758, -359, -1517, 1493, 1422, 287, 202, -171, 622, 1577, 182, 962, -1202, -1474, 1468,
    573, -1325, 264, 383, -829, 1458, -1602, -130, -681, 1017, 732, 608, -1542, 411, -205, -1571,
    1223, 652, -552, 1015, -1293, 1491, -282, -1544, 516, -8, -320, -666, -1618, -1162, 126, 1469,
    -853, -90, -271, 830, 107, -1421, -247, -951, -398, 961, -1508, -725, 448, -1065, 677, -1275,
    -1103, 430, 555, 843, -1251, 871, 1550, 105, 422, 587, 177, -235, -291, -460, 1574, 1653, -246,
    778, 1159, -147, -777, 1483, -602, 1119, -1590, 644, -872, 349, 418, 329, -156, -75, 817, 1097,
    603, 610, 1322, -1285, -1465, 384, -1215, -136, 1218, -1335, -874, 220, -1187, -1659, -1185,
    -1530, -1278, 794, -1510, -854, -870, 478, -108, -308, 996, 991, 958, -1460, 1522, 1628,
];

/// mont^2 / 128: undoes the 2^7 growth of the inverse transform and leaves
/// the result in the Montgomery domain.
pub const INV_NTT_SCALE: i16 = 1441;

/// One Cooley-Tukey layer with half-width `len`, consuming zetas from `*k`.
#[inline]
pub fn forward_layer(r: &mut [i16; N], len: usize, k: &mut usize) {
    let mut start = 0;
    while start < N {
        let zeta = ZETAS[*k];
        *k += 1;
        for j in start..start + len {
            let t = fqmul(zeta, r[j + len]);
            r[j + len] = r[j].wrapping_sub(t);
            r[j] = r[j].wrapping_add(t);
        }
        start += 2 * len;
    }
}

/// One Gentleman-Sande layer with half-width `len`, consuming zetas
/// downwards from `*k`.
#[inline]
pub fn inverse_layer(r: &mut [i16; N], len: usize, k: &mut usize) {
    let mut start = 0;
    while start < N {
        let zeta = ZETAS[*k];
        *k = k.wrapping_sub(1);
        for j in start..start + len {
            let t = r[j];
            r[j] = barrett_reduce(t.wrapping_add(r[j + len]));
            r[j + len] = fqmul(zeta, r[j + len].wrapping_sub(t));
        }
        start += 2 * len;
    }
}

/// Forward NTT in place. Output is in bit-reversed order and not reduced.
pub fn ntt(r: &mut [i16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 2 {
        forward_layer(r, len, &mut k);
        len >>= 1;
    }
}

/// Inverse NTT in place, multiplying by the Montgomery factor 2^16.
pub fn inv_ntt(r: &mut [i16; N]) {
    let mut k = 127;
    let mut len = 2;
    while len <= 128 {
        inverse_layer(r, len, &mut k);
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, INV_NTT_SCALE);
    }
}

/// Product of `a0 + a1 X` and `b0 + b1 X` modulo `X^2 - zeta`.
#[inline]
pub fn basemul(a: [i16; 2], b: [i16; 2], zeta: i16) -> [i16; 2] {
    let r0 = fqmul(fqmul(a[1], b[1]), zeta).wrapping_add(fqmul(a[0], b[0]));
    let r1 = fqmul(a[0], b[1]).wrapping_add(fqmul(a[1], b[0]));
    [r0, r1]
}
