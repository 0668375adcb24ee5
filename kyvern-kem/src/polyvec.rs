//! Vectors of `K` polynomials.

use zeroize::Zeroize;

use crate::backend::Kernels;
use crate::encode::{poly_compress, poly_decompress, poly_from_bytes, poly_to_bytes};
use crate::params::POLYBYTES;
use crate::poly::Poly;

/// A vector of K polynomials (`s`, `e`, `t`, `r`, `u`, ...).
#[derive(Clone)]
pub struct PolyVec<const K: usize> {
    pub polys: [Poly; K],
}

impl<const K: usize> Default for PolyVec<K> {
    fn default() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::default()),
        }
    }
}

impl<const K: usize> Zeroize for PolyVec<K> {
    fn zeroize(&mut self) {
        for poly in self.polys.iter_mut() {
            poly.zeroize();
        }
    }
}

impl<const K: usize> PolyVec<K> {
    pub(crate) fn ntt<B: Kernels>(&mut self) {
        for poly in self.polys.iter_mut() {
            poly.ntt::<B>();
        }
    }

    pub(crate) fn inv_ntt_tomont<B: Kernels>(&mut self) {
        for poly in self.polys.iter_mut() {
            poly.inv_ntt_tomont::<B>();
        }
    }

    pub(crate) fn add<B: Kernels>(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(other.polys.iter()) {
            a.add::<B>(b);
        }
    }

    pub(crate) fn reduce<B: Kernels>(&mut self) {
        for poly in self.polys.iter_mut() {
            poly.reduce::<B>();
        }
    }

    /// Inner product in the NTT domain, reduced, with a factor 2^-16.
    pub(crate) fn basemul_acc<B: Kernels>(&self, other: &Self) -> Poly {
        let mut r = Poly::default();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            r.basemul_acc(a, b);
        }
        r.reduce::<B>();
        r
    }

    /// Serialize with 12 bits per coefficient into `K * 384` bytes.
    pub fn to_bytes(&self, out: &mut [u8]) {
        for (poly, chunk) in self.polys.iter().zip(out.chunks_exact_mut(POLYBYTES)) {
            poly_to_bytes(poly, chunk);
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut v = Self::default();
        for (poly, chunk) in v.polys.iter_mut().zip(bytes.chunks_exact(POLYBYTES)) {
            *poly = poly_from_bytes(chunk);
        }
        v
    }

    /// Compress to `d` bits per coefficient into `K * 32 * d` bytes.
    pub fn compress(&self, d: usize, out: &mut [u8]) {
        for (poly, chunk) in self.polys.iter().zip(out.chunks_exact_mut(32 * d)) {
            poly_compress(poly, d, chunk);
        }
    }

    pub fn decompress(bytes: &[u8], d: usize) -> Self {
        let mut v = Self::default();
        for (poly, chunk) in v.polys.iter_mut().zip(bytes.chunks_exact(32 * d)) {
            *poly = poly_decompress(chunk, d);
        }
        v
    }
}
