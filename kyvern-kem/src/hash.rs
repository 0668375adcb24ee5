//! Symmetric primitives.
//!
//! - H = SHA3-256
//! - G = SHA3-512
//! - KDF = SHAKE256 squeezed to 32 bytes
//! - XOF = SHAKE128, absorbs `rho || x || y` to sample the public matrix
//! - PRF = SHAKE256, absorbs `sigma || nonce` to sample noise

use sha3::{
    digest::{Digest, ExtendableOutput, Update, XofReader},
    Sha3_256, Sha3_512, Shake128, Shake256,
};

use crate::params::{SSBYTES, SYMBYTES};

/// H: SHA3-256.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; SYMBYTES] {
    let mut out = [0u8; SYMBYTES];
    out.copy_from_slice(&Sha3_256::digest(input));
    out
}

/// G: SHA3-512 over the concatenation of `parts`.
///
/// The output splits into two 32-byte halves (`k̄ || coins` in the KEM,
/// `rho || sigma` in key generation). Written to `out`, which callers keep
/// in a zeroizing buffer.
#[inline]
pub fn hash_g(parts: &[&[u8]], out: &mut [u8; 2 * SYMBYTES]) {
    let mut hasher = Sha3_512::new();
    for part in parts {
        Digest::update(&mut hasher, *part);
    }
    out.copy_from_slice(&hasher.finalize());
}

/// KDF: SHAKE256 over the concatenation of `parts`, squeezed to 32 bytes.
#[inline]
pub fn kdf(parts: &[&[u8]]) -> [u8; SSBYTES] {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(*part);
    }
    let mut out = [0u8; SSBYTES];
    hasher.finalize_xof().read(&mut out);
    out
}

/// SHAKE128 stream seeded with `rho || x || y`.
pub struct Xof {
    reader: sha3::Shake128Reader,
}

impl Xof {
    /// Absorb `rho || x || y`.
    pub fn new(rho: &[u8; SYMBYTES], x: u8, y: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[x, y]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze the next `out.len()` bytes.
    #[inline]
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// PRF: SHAKE256(`sigma || nonce`) written to `out`.
#[inline]
pub fn prf(sigma: &[u8; SYMBYTES], nonce: u8, out: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(sigma);
    hasher.update(&[nonce]);
    hasher.finalize_xof().read(out);
}
