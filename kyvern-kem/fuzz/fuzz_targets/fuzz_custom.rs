//! Fuzz target for the custom-secret modes.
//!
//! For arbitrary keys and messages:
//! 1. CPA custom transports the message unchanged
//! 2. CCA custom is deterministic in the message and roundtrips
//! 3. Messages of the wrong length are rejected with an error

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

use kyvern_kem::custom::{
    decapsulate_cca_custom, decapsulate_cpa_custom, encapsulate_cca_custom,
    encapsulate_cpa_custom,
};
use kyvern_kem::kem::keypair_from_seed;
use kyvern_kem::params::{ciphertext_bytes, kem_secret_key_bytes, pke_public_key_bytes};
use kyvern_kem::Backend;

#[derive(Debug, Arbitrary)]
struct CustomInput {
    seed: [u8; 32],
    rng_seed: u64,
    msg: Vec<u8>,
    variant: u8,
}

fn run<const K: usize, const ETA1: usize, const ETA2: usize, const DU: usize, const DV: usize>(
    input: &CustomInput,
) {
    let backend = Backend::detect();
    let mut pk = vec![0u8; pke_public_key_bytes(K)];
    let mut sk = vec![0u8; kem_secret_key_bytes(K)];
    keypair_from_seed::<K, ETA1>(&backend, &input.seed, &mut pk, &mut sk).unwrap();

    let mut rng = StdRng::seed_from_u64(input.rng_seed);
    let mut ct = vec![0u8; ciphertext_bytes(K, DU, DV)];

    let cpa = encapsulate_cpa_custom::<K, ETA1, ETA2, DU, DV>(
        &backend, &mut rng, &mut ct, &pk, &input.msg,
    );
    if input.msg.len() != 32 {
        assert!(cpa.is_err(), "Wrong message length must be rejected");
        assert!(encapsulate_cca_custom::<K, ETA1, ETA2, DU, DV>(&backend, &mut ct, &pk, &input.msg).is_err());
        return;
    }
    let sent = cpa.unwrap();
    assert_eq!(&sent[..], &input.msg[..]);
    let received = decapsulate_cpa_custom::<K, DU, DV>(&backend, &sk, &ct).unwrap();
    assert_eq!(*received, *sent, "CPA custom should transport the message");

    let ss = encapsulate_cca_custom::<K, ETA1, ETA2, DU, DV>(&backend, &mut ct, &pk, &input.msg)
        .unwrap();
    let mut ct2 = ct.clone();
    let ss2 = encapsulate_cca_custom::<K, ETA1, ETA2, DU, DV>(&backend, &mut ct2, &pk, &input.msg)
        .unwrap();
    assert_eq!(ct, ct2, "CCA custom should be deterministic");
    assert_eq!(*ss, *ss2);
    let received = decapsulate_cca_custom::<K, ETA1, ETA2, DU, DV>(&backend, &sk, &ct).unwrap();
    assert_eq!(*received, *ss, "CCA custom should roundtrip");
}

fuzz_target!(|input: CustomInput| {
    match input.variant % 3 {
        0 => run::<2, 3, 2, 10, 4>(&input),
        1 => run::<3, 2, 2, 10, 4>(&input),
        _ => run::<4, 2, 2, 11, 5>(&input),
    }
});
