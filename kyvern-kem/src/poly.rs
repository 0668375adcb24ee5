//! Polynomials in R_q = Z_q[X]/(X^256 + 1).
//!
//! Coefficients are `i16` and are only reduced where the arithmetic needs
//! it; serialization canonicalizes them. The transform and coefficient-wise
//! operations run on whichever [`Kernels`] implementation the caller picks.

use zeroize::Zeroize;

use crate::backend::Kernels;
use crate::ntt::{basemul, ZETAS};
use crate::params::N;
use crate::reduce::{barrett_reduce, to_mont};

/// A polynomial with 256 coefficients.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// Coefficients, lowest degree first (bit-reversed order in the NTT
    /// domain).
    pub coeffs: [i16; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self { coeffs: [0; N] }
    }
}

impl Poly {
    /// Forward NTT followed by a Barrett reduction of every coefficient.
    pub(crate) fn ntt<B: Kernels>(&mut self) {
        B::ntt(&mut self.coeffs);
        B::reduce(&mut self.coeffs);
    }

    /// Inverse NTT; the result carries a factor 2^16.
    pub(crate) fn inv_ntt_tomont<B: Kernels>(&mut self) {
        B::inv_ntt(&mut self.coeffs);
    }

    pub(crate) fn add<B: Kernels>(&mut self, other: &Poly) {
        B::add(&mut self.coeffs, &other.coeffs);
    }

    pub(crate) fn sub<B: Kernels>(&mut self, other: &Poly) {
        B::sub(&mut self.coeffs, &other.coeffs);
    }

    pub(crate) fn reduce<B: Kernels>(&mut self) {
        B::reduce(&mut self.coeffs);
    }

    pub(crate) fn to_mont<B: Kernels>(&mut self) {
        B::to_mont(&mut self.coeffs);
    }

    /// `self += a * b` in the NTT domain, with a factor 2^-16.
    ///
    /// The pairs at `4i` use `+zeta`, the pairs at `4i + 2` use `-zeta`.
    pub(crate) fn basemul_acc(&mut self, a: &Poly, b: &Poly) {
        for i in 0..N / 4 {
            let zeta = ZETAS[64 + i];
            for (offset, z) in [(4 * i, zeta), (4 * i + 2, -zeta)] {
                let r = basemul(
                    [a.coeffs[offset], a.coeffs[offset + 1]],
                    [b.coeffs[offset], b.coeffs[offset + 1]],
                    z,
                );
                self.coeffs[offset] = self.coeffs[offset].wrapping_add(r[0]);
                self.coeffs[offset + 1] = self.coeffs[offset + 1].wrapping_add(r[1]);
            }
        }
    }
}

// Scalar coefficient-wise operations, shared by the reference backend and
// the tails of the vector backends.

pub(crate) fn add_scalar(r: &mut [i16; N], b: &[i16; N]) {
    for (x, y) in r.iter_mut().zip(b.iter()) {
        *x = x.wrapping_add(*y);
    }
}

pub(crate) fn sub_scalar(r: &mut [i16; N], b: &[i16; N]) {
    for (x, y) in r.iter_mut().zip(b.iter()) {
        *x = x.wrapping_sub(*y);
    }
}

pub(crate) fn reduce_scalar(r: &mut [i16; N]) {
    for x in r.iter_mut() {
        *x = barrett_reduce(*x);
    }
}

pub(crate) fn to_mont_scalar(r: &mut [i16; N]) {
    for x in r.iter_mut() {
        *x = to_mont(*x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Reference;
    use crate::reduce::caddq;

    fn canonical(a: i16) -> i16 {
        caddq(barrett_reduce(a))
    }

    /// Schoolbook product in Z_q[X]/(X^256 + 1).
    fn schoolbook(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
        let mut acc = [0i64; N];
        for i in 0..N {
            for j in 0..N {
                let p = a[i] as i64 * b[j] as i64;
                if i + j < N {
                    acc[i + j] += p;
                } else {
                    acc[i + j - N] -= p;
                }
            }
        }
        let mut r = [0i16; N];
        for (o, v) in r.iter_mut().zip(acc.iter()) {
            *o = v.rem_euclid(3329) as i16;
        }
        r
    }

    #[test]
    fn test_ntt_multiplication_matches_schoolbook() {
        let mut a = Poly::default();
        let mut b = Poly::default();
        for i in 0..N {
            a.coeffs[i] = ((i * 7 + 3) % 5) as i16 - 2;
            b.coeffs[i] = ((i * 13 + 1) % 3329) as i16 - 1664;
        }
        let expected = schoolbook(&a.coeffs, &b.coeffs);

        a.ntt::<Reference>();
        b.ntt::<Reference>();
        let mut r = Poly::default();
        r.basemul_acc(&a, &b);
        r.reduce::<Reference>();
        // basemul contributes 2^-16, inv_ntt contributes 2^16.
        r.inv_ntt_tomont::<Reference>();

        for i in 0..N {
            assert_eq!(canonical(r.coeffs[i]), expected[i], "coefficient {i}");
        }
    }

    #[test]
    fn test_add_sub_inverse() {
        let mut a = Poly::default();
        let mut b = Poly::default();
        for i in 0..N {
            a.coeffs[i] = i as i16;
            b.coeffs[i] = 3 * i as i16 - 100;
        }
        let original = a.clone();
        a.add::<Reference>(&b);
        a.sub::<Reference>(&b);
        assert_eq!(a.coeffs, original.coeffs);
    }

    #[test]
    fn test_reduce_keeps_congruence() {
        let mut a = Poly::default();
        for i in 0..N {
            a.coeffs[i] = (i as i16).wrapping_mul(127);
        }
        let original = a.clone();
        a.reduce::<Reference>();
        for i in 0..N {
            assert_eq!(canonical(a.coeffs[i]), canonical(original.coeffs[i]));
        }
    }
}
