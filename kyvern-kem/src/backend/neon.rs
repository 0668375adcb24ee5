//! NEON kernels (aarch64).
//!
//! Layers with a half-width of at least 8 coefficients run on 128-bit
//! vectors. NEON has no 16-bit multiply-high, so the high halves come from
//! a widening multiply followed by a narrowing shift.
//!
//! # Safety
//!
//! NEON is part of the aarch64 baseline, so the intrinsics are always
//! available on this target.

#![allow(unsafe_code)]

use core::arch::aarch64::*;

use super::Kernels;
use crate::ntt::{forward_layer, inverse_layer, INV_NTT_SCALE, ZETAS};
use crate::params::{N, Q};
use crate::reduce::{BARRETT_V, MONT_R2, QINV};

/// NEON kernels.
pub(crate) struct Neon;

impl Kernels for Neon {
    fn ntt(r: &mut [i16; N]) {
        // SAFETY: NEON is always available on aarch64
        unsafe { ntt_neon(r) }
    }

    fn inv_ntt(r: &mut [i16; N]) {
        // SAFETY: NEON is always available on aarch64
        unsafe { inv_ntt_neon(r) }
    }

    fn add(r: &mut [i16; N], b: &[i16; N]) {
        // SAFETY: NEON is always available on aarch64
        unsafe {
            for i in (0..N).step_by(8) {
                store(r, i, vaddq_s16(load(r, i), load(b, i)));
            }
        }
    }

    fn sub(r: &mut [i16; N], b: &[i16; N]) {
        // SAFETY: NEON is always available on aarch64
        unsafe {
            for i in (0..N).step_by(8) {
                store(r, i, vsubq_s16(load(r, i), load(b, i)));
            }
        }
    }

    fn reduce(r: &mut [i16; N]) {
        // SAFETY: NEON is always available on aarch64
        unsafe {
            for i in (0..N).step_by(8) {
                store(r, i, barrett_8x(load(r, i)));
            }
        }
    }

    fn to_mont(r: &mut [i16; N]) {
        // SAFETY: NEON is always available on aarch64
        unsafe { scale_neon(r, MONT_R2) }
    }
}

/// Signed high 16 bits of the 8 products `a * b`.
#[target_feature(enable = "neon")]
#[inline]
unsafe fn mulhi_8x(a: int16x8_t, b: int16x8_t) -> int16x8_t {
    let lo = vmull_s16(vget_low_s16(a), vget_low_s16(b));
    let hi = vmull_s16(vget_high_s16(a), vget_high_s16(b));
    vcombine_s16(vshrn_n_s32(lo, 16), vshrn_n_s32(hi, 16))
}

/// 8 lanes of `montgomery_reduce(a * b)`.
#[target_feature(enable = "neon")]
#[inline]
unsafe fn fqmul_8x(a: int16x8_t, b: int16x8_t) -> int16x8_t {
    let t = vmulq_s16(vmulq_s16(a, b), vdupq_n_s16(QINV));
    vsubq_s16(mulhi_8x(a, b), mulhi_8x(t, vdupq_n_s16(Q)))
}

/// 8 lanes of `barrett_reduce(a)`.
#[target_feature(enable = "neon")]
#[inline]
unsafe fn barrett_8x(a: int16x8_t) -> int16x8_t {
    let hi = mulhi_8x(a, vdupq_n_s16(BARRETT_V));
    let t = vshrq_n_s16(vaddq_s16(hi, vdupq_n_s16(1 << 9)), 10);
    vsubq_s16(a, vmulq_s16(t, vdupq_n_s16(Q)))
}

#[target_feature(enable = "neon")]
#[inline]
unsafe fn load(r: &[i16; N], i: usize) -> int16x8_t {
    debug_assert!(i + 8 <= N);
    vld1q_s16(r.as_ptr().add(i))
}

#[target_feature(enable = "neon")]
#[inline]
unsafe fn store(r: &mut [i16; N], i: usize, v: int16x8_t) {
    debug_assert!(i + 8 <= N);
    vst1q_s16(r.as_mut_ptr().add(i), v);
}

#[target_feature(enable = "neon")]
unsafe fn ntt_neon(r: &mut [i16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 8 {
        let mut start = 0;
        while start < N {
            let zeta = vdupq_n_s16(ZETAS[k]);
            k += 1;
            for j in (start..start + len).step_by(8) {
                let lo = load(r, j);
                let t = fqmul_8x(zeta, load(r, j + len));
                store(r, j + len, vsubq_s16(lo, t));
                store(r, j, vaddq_s16(lo, t));
            }
            start += 2 * len;
        }
        len >>= 1;
    }
    while len >= 2 {
        forward_layer(r, len, &mut k);
        len >>= 1;
    }
}

#[target_feature(enable = "neon")]
unsafe fn inv_ntt_neon(r: &mut [i16; N]) {
    let mut k = 127;
    let mut len = 2;
    while len < 8 {
        inverse_layer(r, len, &mut k);
        len <<= 1;
    }
    while len <= 128 {
        let mut start = 0;
        while start < N {
            let zeta = vdupq_n_s16(ZETAS[k]);
            k = k.wrapping_sub(1);
            for j in (start..start + len).step_by(8) {
                let t = load(r, j);
                let hi = load(r, j + len);
                store(r, j, barrett_8x(vaddq_s16(t, hi)));
                store(r, j + len, fqmul_8x(zeta, vsubq_s16(hi, t)));
            }
            start += 2 * len;
        }
        len <<= 1;
    }
    scale_neon(r, INV_NTT_SCALE);
}

#[target_feature(enable = "neon")]
unsafe fn scale_neon(r: &mut [i16; N], factor: i16) {
    let f = vdupq_n_s16(factor);
    for i in (0..N).step_by(8) {
        store(r, i, fqmul_8x(load(r, i), f));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_support::{assert_matches_reference, pseudo_random_poly};
    use crate::reduce::fqmul;

    #[test]
    fn test_fqmul_lanes() {
        let a = pseudo_random_poly(11);
        let b = pseudo_random_poly(12);
        let mut out = [0i16; N];
        // SAFETY: NEON is always available on aarch64
        unsafe {
            for i in (0..N).step_by(8) {
                store(&mut out, i, fqmul_8x(load(&a, i), load(&b, i)));
            }
        }
        for i in 0..N {
            assert_eq!(out[i], fqmul(a[i], b[i]), "lane {i}");
        }
    }

    #[test]
    fn test_matches_reference() {
        assert_matches_reference::<Neon>();
    }
}
