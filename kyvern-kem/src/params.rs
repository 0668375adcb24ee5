//! Kyber parameter sets (round 3).
//!
//! Sizes are derived from the module rank and compression widths with
//! `const fn` helpers so every layer agrees on the byte layout.

/// Polynomial ring dimension (n).
pub const N: usize = 256;

/// Modulus (q).
pub const Q: i16 = 3329;

/// Size of seeds, hashes and messages.
pub const SYMBYTES: usize = 32;

/// Size of the shared secret.
pub const SSBYTES: usize = 32;

/// Serialized size of one polynomial with 12-bit coefficients.
pub const POLYBYTES: usize = 384;

/// Serialized size of a vector of `k` polynomials.
pub const fn polyvec_bytes(k: usize) -> usize {
    k * POLYBYTES
}

/// Size of the public key (encoded `t` followed by `rho`).
pub const fn pke_public_key_bytes(k: usize) -> usize {
    polyvec_bytes(k) + SYMBYTES
}

/// Size of the encryption primitive's secret key (encoded `s`).
pub const fn pke_secret_key_bytes(k: usize) -> usize {
    polyvec_bytes(k)
}

/// Size of the KEM secret key: `sk_pke || pk || H(pk) || z`.
pub const fn kem_secret_key_bytes(k: usize) -> usize {
    pke_secret_key_bytes(k) + pke_public_key_bytes(k) + 2 * SYMBYTES
}

/// Size of a ciphertext: compressed `u` followed by compressed `v`.
pub const fn ciphertext_bytes(k: usize, du: usize, dv: usize) -> usize {
    k * 32 * du + 32 * dv
}

macro_rules! parameter_set {
    (
        $(#[$meta:meta])*
        $name:ident, k: $k:expr, eta1: $eta1:expr, eta2: $eta2:expr, du: $du:expr, dv: $dv:expr
    ) => {
        $(#[$meta])*
        pub mod $name {
            /// Module rank (k).
            pub const K: usize = $k;
            /// Noise parameter for `s`, `e` and `r` (eta1).
            pub const ETA1: usize = $eta1;
            /// Noise parameter for `e1` and `e2` (eta2).
            pub const ETA2: usize = $eta2;
            /// Compression width of `u` (du).
            pub const DU: usize = $du;
            /// Compression width of `v` (dv).
            pub const DV: usize = $dv;

            /// Public key size in bytes.
            pub const PUBLIC_KEY_SIZE: usize = super::pke_public_key_bytes(K);
            /// Secret key size in bytes.
            pub const SECRET_KEY_SIZE: usize = super::kem_secret_key_bytes(K);
            /// Ciphertext size in bytes.
            pub const CIPHERTEXT_SIZE: usize = super::ciphertext_bytes(K, DU, DV);
            /// Shared secret size in bytes.
            pub const SHARED_SECRET_SIZE: usize = super::SSBYTES;
        }
    };
}

parameter_set! {
    /// Kyber-512 (NIST level 1).
    #[cfg(feature = "kyber512")]
    kyber512, k: 2, eta1: 3, eta2: 2, du: 10, dv: 4
}

parameter_set! {
    /// Kyber-768 (NIST level 3).
    #[cfg(feature = "kyber768")]
    kyber768, k: 3, eta1: 2, eta2: 2, du: 10, dv: 4
}

parameter_set! {
    /// Kyber-1024 (NIST level 5).
    #[cfg(feature = "kyber1024")]
    kyber1024, k: 4, eta1: 2, eta2: 2, du: 11, dv: 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(feature = "kyber512")]
    fn test_kyber512_sizes() {
        assert_eq!(kyber512::PUBLIC_KEY_SIZE, 800);
        assert_eq!(kyber512::SECRET_KEY_SIZE, 1632);
        assert_eq!(kyber512::CIPHERTEXT_SIZE, 768);
    }

    #[test]
    #[cfg(feature = "kyber768")]
    fn test_kyber768_sizes() {
        assert_eq!(kyber768::PUBLIC_KEY_SIZE, 1184);
        assert_eq!(kyber768::SECRET_KEY_SIZE, 2400);
        assert_eq!(kyber768::CIPHERTEXT_SIZE, 1088);
    }

    #[test]
    #[cfg(feature = "kyber1024")]
    fn test_kyber1024_sizes() {
        assert_eq!(kyber1024::PUBLIC_KEY_SIZE, 1568);
        assert_eq!(kyber1024::SECRET_KEY_SIZE, 3168);
        assert_eq!(kyber1024::CIPHERTEXT_SIZE, 1568);
    }

    #[test]
    fn test_secret_key_layout_adds_up() {
        for k in 2..=4 {
            assert_eq!(
                kem_secret_key_bytes(k),
                pke_secret_key_bytes(k) + pke_public_key_bytes(k) + 64
            );
        }
    }
}
