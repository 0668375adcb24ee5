//! Kyber-1024, NIST security level 5 (comparable to AES-256).

use crate::custom;
use crate::dispatch::Backend;
use crate::kem;
use crate::params::kyber1024::*;
use crate::types::{define_kem_types, define_kyber};
use kyvern_core::{CpaCustomKem, CustomSecretKem, Error, Kem, Result};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

define_kem_types! {
    dk_size: SECRET_KEY_SIZE,
    ek_size: PUBLIC_KEY_SIZE,
    ct_size: CIPHERTEXT_SIZE,
    ss_size: SHARED_SECRET_SIZE
}

define_kyber! {
    /// Kyber-1024 key encapsulation mechanism.
    Kyber1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_sizes() {
        assert_eq!(Kyber1024::DECAPSULATION_KEY_SIZE, 3168);
        assert_eq!(Kyber1024::ENCAPSULATION_KEY_SIZE, 1568);
        assert_eq!(Kyber1024::CIPHERTEXT_SIZE, 1568);
        assert_eq!(Kyber1024::SHARED_SECRET_SIZE, 32);
    }

    #[test]
    fn test_encapsulation_key_invalid_length() {
        let result = EncapsulationKey::from_bytes(&[0u8; 100]);
        assert!(matches!(result, Err(Error::InvalidKeyLength { .. })));
    }

    #[test]
    fn test_custom_secret_invalid_length() {
        let result = CustomSecret::from_bytes(&[0u8; 16]);
        assert!(matches!(
            result,
            Err(Error::InvalidMessageLength {
                expected: 32,
                actual: 16
            })
        ));
    }
}
