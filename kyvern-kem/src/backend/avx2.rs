//! AVX2 kernels (x86_64).
//!
//! Butterfly layers with a half-width of at least 16 coefficients run on
//! 256-bit vectors; the narrower layers reuse the scalar code. Every lane
//! computes exactly what the scalar code computes, so results are
//! bit-identical to [`Reference`](super::Reference).
//!
//! # Safety
//!
//! The intrinsics require AVX2. [`Avx2`] checks [`has_avx2`] on every call
//! and falls back to the reference kernels otherwise.

#![allow(unsafe_code)]

use core::arch::x86_64::*;

use super::{Kernels, Reference};
use crate::ntt::{forward_layer, inverse_layer, INV_NTT_SCALE, ZETAS};
use crate::params::{N, Q};
use crate::reduce::{BARRETT_V, MONT_R2, QINV};

kyvern_core::define_has_avx2!(pub(crate));

/// AVX2 kernels.
pub(crate) struct Avx2;

impl Kernels for Avx2 {
    fn ntt(r: &mut [i16; N]) {
        if has_avx2() {
            // SAFETY: AVX2 availability confirmed by has_avx2()
            unsafe { ntt_avx2(r) }
        } else {
            Reference::ntt(r);
        }
    }

    fn inv_ntt(r: &mut [i16; N]) {
        if has_avx2() {
            // SAFETY: AVX2 availability confirmed by has_avx2()
            unsafe { inv_ntt_avx2(r) }
        } else {
            Reference::inv_ntt(r);
        }
    }

    fn add(r: &mut [i16; N], b: &[i16; N]) {
        if has_avx2() {
            // SAFETY: AVX2 availability confirmed by has_avx2()
            unsafe { add_avx2(r, b) }
        } else {
            Reference::add(r, b);
        }
    }

    fn sub(r: &mut [i16; N], b: &[i16; N]) {
        if has_avx2() {
            // SAFETY: AVX2 availability confirmed by has_avx2()
            unsafe { sub_avx2(r, b) }
        } else {
            Reference::sub(r, b);
        }
    }

    fn reduce(r: &mut [i16; N]) {
        if has_avx2() {
            // SAFETY: AVX2 availability confirmed by has_avx2()
            unsafe { reduce_avx2(r) }
        } else {
            Reference::reduce(r);
        }
    }

    fn to_mont(r: &mut [i16; N]) {
        if has_avx2() {
            // SAFETY: AVX2 availability confirmed by has_avx2()
            unsafe { scale_avx2(r, MONT_R2) }
        } else {
            Reference::to_mont(r);
        }
    }
}

/// 16 lanes of `montgomery_reduce(a * b)`.
///
/// The low halves of `a * b` and `t * q` agree by construction of `t`, so
/// the difference of the high halves is the exact reduced value.
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn fqmul_16x(a: __m256i, b: __m256i) -> __m256i {
    let lo = _mm256_mullo_epi16(a, b);
    let hi = _mm256_mulhi_epi16(a, b);
    let t = _mm256_mullo_epi16(lo, _mm256_set1_epi16(QINV));
    let tq = _mm256_mulhi_epi16(t, _mm256_set1_epi16(Q));
    _mm256_sub_epi16(hi, tq)
}

/// 16 lanes of `barrett_reduce(a)`.
///
/// `(mulhi(a, v) + 2^9) >> 10` equals `(v * a + 2^25) >> 26`.
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn barrett_16x(a: __m256i) -> __m256i {
    let hi = _mm256_mulhi_epi16(a, _mm256_set1_epi16(BARRETT_V));
    let t = _mm256_srai_epi16(_mm256_add_epi16(hi, _mm256_set1_epi16(1 << 9)), 10);
    _mm256_sub_epi16(a, _mm256_mullo_epi16(t, _mm256_set1_epi16(Q)))
}

#[target_feature(enable = "avx2")]
#[inline]
unsafe fn load(r: &[i16; N], i: usize) -> __m256i {
    debug_assert!(i + 16 <= N);
    _mm256_loadu_si256(r.as_ptr().add(i).cast())
}

#[target_feature(enable = "avx2")]
#[inline]
unsafe fn store(r: &mut [i16; N], i: usize, v: __m256i) {
    debug_assert!(i + 16 <= N);
    _mm256_storeu_si256(r.as_mut_ptr().add(i).cast(), v);
}

#[target_feature(enable = "avx2")]
unsafe fn ntt_avx2(r: &mut [i16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 16 {
        let mut start = 0;
        while start < N {
            let zeta = _mm256_set1_epi16(ZETAS[k]);
            k += 1;
            for j in (start..start + len).step_by(16) {
                let lo = load(r, j);
                let t = fqmul_16x(zeta, load(r, j + len));
                store(r, j + len, _mm256_sub_epi16(lo, t));
                store(r, j, _mm256_add_epi16(lo, t));
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

#[target_feature(enable = "avx2")]
unsafe fn inv_ntt_avx2(r: &mut [i16; N]) {
    let mut k = 127;
    let mut len = 2;
    while len < 16 {
        inverse_layer(r, len, &mut k);
        len <<= 1;
    }
    while len <= 128 {
        let mut start = 0;
        while start < N {
            let zeta = _mm256_set1_epi16(ZETAS[k]);
            k = k.wrapping_sub(1);
            for j in (start..start + len).step_by(16) {
                let t = load(r, j);
                let hi = load(r, j + len);
                store(r, j, barrett_16x(_mm256_add_epi16(t, hi)));
                store(r, j + len, fqmul_16x(zeta, _mm256_sub_epi16(hi, t)));
            }
            start += 2 * len;
        }
        len <<= 1;
    }
    scale_avx2(r, INV_NTT_SCALE);
}

/// Multiply every coefficient by `factor` in the Montgomery domain.
#[target_feature(enable = "avx2")]
unsafe fn scale_avx2(r: &mut [i16; N], factor: i16) {
    let f = _mm256_set1_epi16(factor);
    for i in (0..N).step_by(16) {
        store(r, i, fqmul_16x(load(r, i), f));
    }
}

#[target_feature(enable = "avx2")]
unsafe fn add_avx2(r: &mut [i16; N], b: &[i16; N]) {
    for i in (0..N).step_by(16) {
        store(r, i, _mm256_add_epi16(load(r, i), load(b, i)));
    }
}

#[target_feature(enable = "avx2")]
unsafe fn sub_avx2(r: &mut [i16; N], b: &[i16; N]) {
    for i in (0..N).step_by(16) {
        store(r, i, _mm256_sub_epi16(load(r, i), load(b, i)));
    }
}

#[target_feature(enable = "avx2")]
unsafe fn reduce_avx2(r: &mut [i16; N]) {
    for i in (0..N).step_by(16) {
        store(r, i, barrett_16x(load(r, i)));
    }
}
