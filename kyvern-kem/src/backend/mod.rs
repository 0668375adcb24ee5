//! Arithmetic kernels behind the encryption primitive.
//!
//! A [`Kernels`] implementation supplies the transform and the
//! coefficient-wise operations; everything above it (sampling, encoding,
//! hashing) is shared. Implementations must agree with [`Reference`] modulo
//! q on every coefficient, which keeps serialized outputs byte-identical
//! across backends.
//!
//! # Supported Platforms
//!
//! - **x86_64**: AVX2 (16 x i16 lanes), detected at runtime
//! - **aarch64**: NEON (8 x i16 lanes), part of the baseline ISA

use crate::params::N;
use crate::poly;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod avx2;
#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod neon;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
pub(crate) use avx2::{has_avx2, Avx2};
#[cfg(all(feature = "simd", target_arch = "aarch64"))]
pub(crate) use neon::Neon;

/// Polynomial arithmetic used by the encryption primitive.
pub(crate) trait Kernels {
    /// Forward NTT, unreduced output.
    fn ntt(r: &mut [i16; N]);

    /// Inverse NTT including the final 2^16 scaling.
    fn inv_ntt(r: &mut [i16; N]);

    /// `r += b`
    fn add(r: &mut [i16; N], b: &[i16; N]);

    /// `r -= b`
    fn sub(r: &mut [i16; N], b: &[i16; N]);

    /// Barrett-reduce every coefficient.
    fn reduce(r: &mut [i16; N]);

    /// Multiply every coefficient by 2^16 mod q.
    fn to_mont(r: &mut [i16; N]);
}

/// Portable scalar kernels.
pub(crate) struct Reference;

impl Kernels for Reference {
    #[inline]
    fn ntt(r: &mut [i16; N]) {
        crate::ntt::ntt(r);
    }

    #[inline]
    fn inv_ntt(r: &mut [i16; N]) {
        crate::ntt::inv_ntt(r);
    }

    #[inline]
    fn add(r: &mut [i16; N], b: &[i16; N]) {
        poly::add_scalar(r, b);
    }

    #[inline]
    fn sub(r: &mut [i16; N], b: &[i16; N]) {
        poly::sub_scalar(r, b);
    }

    #[inline]
    fn reduce(r: &mut [i16; N]) {
        poly::reduce_scalar(r);
    }

    #[inline]
    fn to_mont(r: &mut [i16; N]) {
        poly::to_mont_scalar(r);
    }
}
