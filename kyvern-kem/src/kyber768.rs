//! Kyber-768, NIST security level 3 (comparable to AES-192).

use crate::custom;
use crate::dispatch::Backend;
use crate::kem;
use crate::params::kyber768::*;
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
    /// Kyber-768 key encapsulation mechanism.
    Kyber768
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_key_sizes() {
        assert_eq!(Kyber768::DECAPSULATION_KEY_SIZE, 2400);
        assert_eq!(Kyber768::ENCAPSULATION_KEY_SIZE, 1184);
        assert_eq!(Kyber768::CIPHERTEXT_SIZE, 1088);
        assert_eq!(Kyber768::SHARED_SECRET_SIZE, 32);
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

    #[test]
    fn test_seeded_keygen_roundtrip() {
        let (dk, ek) = Kyber768::keygen_from_seed(&[0x42; 32]).unwrap();
        let (dk2, ek2) = Kyber768::keygen_from_seed(&[0x42; 32]).unwrap();
        assert_eq!(dk.as_bytes(), dk2.as_bytes());
        assert!(ek == ek2);

        let restored = DecapsulationKey::from_bytes(dk.as_bytes()).unwrap();
        let (ct, ss) = Kyber768::encaps_custom(&ek, &CustomSecret::new([7u8; 32])).unwrap();
        let ss2 = Kyber768::decaps_custom(&restored, &ct).unwrap();
        assert_eq!(ss.as_ref(), ss2.as_ref());
    }

    #[test]
    fn test_cpa_ciphertext_bytes_roundtrip() {
        let (dk, ek) = Kyber768::keygen_from_seed(&[1u8; 32]).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let msg = [0x5au8; 32];
        let (ct, secret) = Kyber768::encaps_cpa(&ek, &msg, &mut rng).unwrap();
        assert_eq!(secret.as_ref(), &msg[..]);

        let parsed = CpaCiphertext::from_bytes(ct.as_bytes()).unwrap();
        assert_eq!(Kyber768::decaps_cpa(&dk, &parsed).unwrap().as_ref(), &msg[..]);
    }
}
