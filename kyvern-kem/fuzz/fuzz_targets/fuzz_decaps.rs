//! Fuzz target for decapsulation.
//!
//! This fuzzer checks that decapsulation:
//! 1. Recovers the shared secret for a valid ciphertext
//! 2. Accepts arbitrary same-length bytes without error (implicit rejection)
//! 3. Is deterministic, including on rejection
//! 4. Rejects any other length with an error instead of panicking

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::rngs::StdRng;
use rand::SeedableRng;

use kyvern_kem::kem::{decapsulate, encapsulate, keypair_from_seed};
use kyvern_kem::params::{ciphertext_bytes, kem_secret_key_bytes, pke_public_key_bytes};
use kyvern_kem::Backend;

#[derive(Debug, Arbitrary)]
struct DecapsInput {
    seed: [u8; 32],
    rng_seed: u64,
    garbage: Vec<u8>,
    variant: u8,
}

fn run<const K: usize, const ETA1: usize, const ETA2: usize, const DU: usize, const DV: usize>(
    input: &DecapsInput,
) {
    let backend = Backend::detect();
    let mut pk = vec![0u8; pke_public_key_bytes(K)];
    let mut sk = vec![0u8; kem_secret_key_bytes(K)];
    keypair_from_seed::<K, ETA1>(&backend, &input.seed, &mut pk, &mut sk).unwrap();

    let ct_len = ciphertext_bytes(K, DU, DV);
    let mut ct = vec![0u8; ct_len];
    let mut rng = StdRng::seed_from_u64(input.rng_seed);
    let ss = encapsulate::<K, ETA1, ETA2, DU, DV>(&backend, &mut rng, &mut ct, &pk).unwrap();
    let ss_receiver = decapsulate::<K, ETA1, ETA2, DU, DV>(&backend, &sk, &ct).unwrap();
    assert_eq!(*ss, *ss_receiver, "Valid decaps should recover shared secret");

    if input.garbage.len() == ct_len {
        let first = decapsulate::<K, ETA1, ETA2, DU, DV>(&backend, &sk, &input.garbage).unwrap();
        let second = decapsulate::<K, ETA1, ETA2, DU, DV>(&backend, &sk, &input.garbage).unwrap();
        assert_eq!(*first, *second, "Implicit rejection should be deterministic");
    } else {
        assert!(decapsulate::<K, ETA1, ETA2, DU, DV>(&backend, &sk, &input.garbage).is_err());
    }
}

fuzz_target!(|input: DecapsInput| {
    match input.variant % 3 {
        0 => run::<2, 3, 2, 10, 4>(&input),
        1 => run::<3, 2, 2, 10, 4>(&input),
        _ => run::<4, 2, 2, 11, 5>(&input),
    }
});
