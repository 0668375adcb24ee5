//! Montgomery and Barrett reduction modulo q = 3329.
//!
//! All functions are branch-free and have data-independent timing.

use crate::params::Q;

/// q^(-1) mod 2^16.
pub const QINV: i16 = -3327;

/// 2^32 mod q; multiplying by it through [`montgomery_reduce`] maps into
/// the Montgomery domain.
pub const MONT_R2: i16 = 1353;

/// Barrett multiplier: round(2^26 / q).
pub const BARRETT_V: i16 = 20159;

/// Montgomery reduction: for |a| < q * 2^15 returns `a * 2^-16 mod q`
/// in (-q, q).
#[inline]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Montgomery product `a * b * 2^-16 mod q`.
#[inline]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Barrett reduction: centered representative of `a mod q` in
/// `[-(q-1)/2, (q-1)/2]`.
#[inline]
pub const fn barrett_reduce(a: i16) -> i16 {
    let t = (((BARRETT_V as i32) * (a as i32) + (1 << 25)) >> 26) as i16;
    a.wrapping_sub(t.wrapping_mul(Q))
}

/// Map a representative in (-q, q) to [0, q).
#[inline]
pub const fn caddq(a: i16) -> i16 {
    a + ((a >> 15) & Q)
}

/// Multiply by 2^16 mod q (enter the Montgomery domain).
#[inline]
pub const fn to_mont(a: i16) -> i16 {
    fqmul(a, MONT_R2)
}
