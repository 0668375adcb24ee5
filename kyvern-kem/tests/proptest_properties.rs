// Skip compilation entirely when no variant features are enabled
// (e.g., --no-default-features), since all test functions are feature-gated.
#![cfg(any(feature = "kyber512", feature = "kyber768", feature = "kyber1024"))]

//! Property-based tests for the Kyber KEM using proptest.
//!
//! These tests verify fundamental properties of every mode:
//! - Roundtrip: encaps/decaps agree, sizes are fixed
//! - Determinism: same seed produces same keys
//! - Implicit rejection: a modified ciphertext yields a different but
//!   reproducible secret
//! - Custom secrets: CPA transports the message itself, CCA roundtrips

use proptest::prelude::*;

fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

fn arb_message() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

macro_rules! kyber_proptest {
    ($mod_name:ident, $module:ident, $variant:ident, $feature:literal, $cases:expr) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use super::*;
            use kyvern_kem::$module::{Ciphertext, CustomSecret};
            use kyvern_kem::$variant;
            use kyvern_kem::{CpaCustomKem, CustomSecretKem, Kem};
            use rand::rngs::StdRng;
            use rand::SeedableRng;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                /// Roundtrip encaps/decaps, key sizes, ciphertext size.
                #[test]
                fn basic_properties(seed in arb_seed(), enc_seed in arb_seed()) {
                    let mut keygen_rng = StdRng::from_seed(seed);
                    let (dk, ek) = $variant::keygen(&mut keygen_rng).unwrap();

                    prop_assert_eq!(dk.as_bytes().len(), $variant::DECAPSULATION_KEY_SIZE);
                    prop_assert_eq!(ek.as_bytes().len(), $variant::ENCAPSULATION_KEY_SIZE);

                    let mut encaps_rng = StdRng::from_seed(enc_seed);
                    let (ct, ss_sender) = $variant::encaps(&ek, &mut encaps_rng).unwrap();

                    prop_assert_eq!(ct.as_bytes().len(), $variant::CIPHERTEXT_SIZE);
                    prop_assert_eq!(ss_sender.as_ref().len(), $variant::SHARED_SECRET_SIZE);

                    let ss_receiver = $variant::decaps(&dk, &ct).unwrap();
                    prop_assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
                }

                /// Same seed produces same keys, through both key generators.
                #[test]
                fn determinism(seed in arb_seed()) {
                    let mut rng1 = StdRng::from_seed(seed);
                    let mut rng2 = StdRng::from_seed(seed);

                    let (dk1, ek1) = $variant::keygen(&mut rng1).unwrap();
                    let (dk2, ek2) = $variant::keygen(&mut rng2).unwrap();
                    prop_assert_eq!(dk1.as_bytes(), dk2.as_bytes());
                    prop_assert_eq!(ek1.as_bytes(), ek2.as_bytes());

                    let (dk3, ek3) = $variant::keygen_from_seed(&seed).unwrap();
                    let (dk4, ek4) = $variant::keygen_from_seed(&seed).unwrap();
                    prop_assert_eq!(dk3.as_bytes(), dk4.as_bytes());
                    prop_assert_eq!(ek3.as_bytes(), ek4.as_bytes());
                }

                /// Flipping any ciphertext bit changes the secret, reproducibly.
                #[test]
                fn implicit_rejection(seed in arb_seed(), index in any::<usize>(), bit in 0u8..8) {
                    let (dk, ek) = $variant::keygen_from_seed(&seed).unwrap();
                    let mut rng = StdRng::from_seed(seed);
                    let (ct, ss) = $variant::encaps(&ek, &mut rng).unwrap();

                    let mut bytes = ct.as_bytes().to_vec();
                    let index = index % bytes.len();
                    bytes[index] ^= 1 << bit;
                    let bad = Ciphertext::from_bytes(&bytes).unwrap();

                    let rejected = $variant::decaps(&dk, &bad).unwrap();
                    prop_assert_ne!(rejected.as_ref(), ss.as_ref());
                    let again = $variant::decaps(&dk, &bad).unwrap();
                    prop_assert_eq!(rejected.as_ref(), again.as_ref());
                }

                /// CPA custom: the secret is the message on both sides.
                #[test]
                fn cpa_custom_identity(seed in arb_seed(), msg in arb_message()) {
                    let (dk, ek) = $variant::keygen_from_seed(&seed).unwrap();
                    let mut rng = StdRng::from_seed(seed);

                    let (ct, sent) = $variant::encaps_cpa(&ek, &msg, &mut rng).unwrap();
                    prop_assert_eq!(sent.as_ref(), &msg[..]);
                    prop_assert_eq!(ct.as_ref().len(), $variant::CIPHERTEXT_SIZE);

                    let received = $variant::decaps_cpa(&dk, &ct).unwrap();
                    prop_assert_eq!(received.as_ref(), &msg[..]);
                }

                /// CCA custom: roundtrip, deterministic in the message.
                #[test]
                fn cca_custom_roundtrip(seed in arb_seed(), msg in arb_message()) {
                    let (dk, ek) = $variant::keygen_from_seed(&seed).unwrap();
                    let custom = CustomSecret::new(msg);

                    let (ct1, ss1) = $variant::encaps_custom(&ek, &custom).unwrap();
                    let (ct2, ss2) = $variant::encaps_custom(&ek, &custom).unwrap();
                    prop_assert_eq!(ct1.as_bytes(), ct2.as_bytes());
                    prop_assert_eq!(ss1.as_ref(), ss2.as_ref());

                    let received = $variant::decaps_custom(&dk, &ct1).unwrap();
                    prop_assert_eq!(received.as_ref(), ss1.as_ref());
                }
            }
        }
    };
}

kyber_proptest!(kyber512_props, kyber512, Kyber512, "kyber512", 16);
kyber_proptest!(kyber768_props, kyber768, Kyber768, "kyber768", 16);
kyber_proptest!(kyber1024_props, kyber1024, Kyber1024, "kyber1024", 16);
