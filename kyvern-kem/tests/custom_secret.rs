#![cfg(feature = "kyber768")]

//! Custom-secret modes through the typed Kyber-768 surface.

use kyvern_kem::kyber768::{Ciphertext, CpaCiphertext, CustomSecret};
use kyvern_kem::params::kyber768::{CIPHERTEXT_SIZE, ETA1, ETA2, DU, DV, K, SECRET_KEY_SIZE};
use kyvern_kem::{kem, Backend, CpaCustomKem, CustomSecretKem, Error, Kem, Kyber768};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Shake256};

fn counting_message() -> [u8; 32] {
    core::array::from_fn(|i| i as u8)
}

fn shake256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    hasher.finalize_xof().read(&mut out);
    out
}

#[test]
fn cpa_secret_equals_message() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let (dk, ek) = Kyber768::keygen(&mut rng).unwrap();
    let msg = counting_message();

    let (ct, sent) = Kyber768::encaps_cpa(&ek, &msg, &mut rng).unwrap();
    assert_eq!(sent.as_ref(), &msg[..]);

    let received = Kyber768::decaps_cpa(&dk, &ct).unwrap();
    assert_eq!(received.as_ref(), &msg[..]);
}

#[test]
fn cpa_tampering_goes_unnoticed() {
    let mut rng = StdRng::seed_from_u64(1);
    let (dk, ek) = Kyber768::keygen(&mut rng).unwrap();
    let msg = counting_message();
    let (ct, _) = Kyber768::encaps_cpa(&ek, &msg, &mut rng).unwrap();

    // Replacing v with zeros still decrypts, just to the wrong message.
    let mut bytes = ct.as_bytes().to_vec();
    let v_start = CIPHERTEXT_SIZE - 32 * DV;
    bytes[v_start..].fill(0);
    let forged = CpaCiphertext::from_bytes(&bytes).unwrap();
    let received = Kyber768::decaps_cpa(&dk, &forged).unwrap();
    assert_ne!(received.as_ref(), &msg[..]);
}

/// Replays a fixed 32-byte value as its only output.
struct FixedRng([u8; 32]);

impl rand_core::RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }
    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let n = dest.len().min(32);
        dest[..n].copy_from_slice(&self.0[..n]);
    }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand_core::CryptoRng for FixedRng {}

#[test]
fn cca_custom_equals_standard_pipeline_with_message_as_randomness() {
    let (dk, ek) = Kyber768::keygen_from_seed(&[9u8; 32]).unwrap();
    let msg = counting_message();

    let (ct, ss) = Kyber768::encaps_custom(&ek, &CustomSecret::new(msg)).unwrap();

    let mut std_ct = [0u8; CIPHERTEXT_SIZE];
    let std_ss = kem::encapsulate::<K, ETA1, ETA2, DU, DV>(
        &Backend::reference(),
        &mut FixedRng(msg),
        &mut std_ct,
        ek.as_bytes(),
    )
    .unwrap();
    assert_eq!(&std_ct[..], ct.as_bytes());
    assert_eq!(&std_ss[..], ss.as_ref());

    let received = Kyber768::decaps_custom(&dk, &ct).unwrap();
    assert_eq!(received.as_ref(), ss.as_ref());
    let via_standard = Kyber768::decaps(&dk, &ct).unwrap();
    assert_eq!(via_standard.as_ref(), ss.as_ref());
}

#[test]
fn cca_custom_rejection_uses_z() {
    let seed = [0x77u8; 32];
    let (dk, ek) = Kyber768::keygen_from_seed(&seed).unwrap();
    let (ct, ss) = Kyber768::encaps_custom(&ek, &CustomSecret::new(counting_message())).unwrap();

    let mut bytes = ct.as_bytes().to_vec();
    bytes[17] ^= 0x20;
    let tampered = Ciphertext::from_bytes(&bytes).unwrap();
    let rejected = Kyber768::decaps_custom(&dk, &tampered).unwrap();

    let z = &dk.as_bytes()[SECRET_KEY_SIZE - 32..];
    assert_eq!(z, &seed[..]);
    let h_ct = Sha3_256::digest(&bytes);
    assert_eq!(rejected.as_ref(), &shake256(&[z, &h_ct[..]])[..]);
    assert_ne!(rejected.as_ref(), ss.as_ref());
}

#[test]
fn custom_secret_length_is_checked() {
    assert_eq!(
        CustomSecret::from_bytes(&[0u8; 31]).err(),
        Some(Error::InvalidMessageLength {
            expected: 32,
            actual: 31
        })
    );
    assert!(CustomSecret::from_bytes(&counting_message()).is_ok());
}
