//! Constant-time verification for Kyber decapsulation.
//!
//! Tests that decapsulation timing is independent of ciphertext validity
//! (implicit rejection must be constant-time), for both the standard and
//! the CCA custom-secret path.
//!
//! Run with: `cargo run --release -p kyvern-timing --bin kyber_decaps`

use dudect_bencher::rand::Rng;
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use kyvern_core::{CustomSecretKem, Kem};
use kyvern_kem::kyber768::{Ciphertext, CustomSecret, DecapsulationKey, Kyber768};
use once_cell::sync::Lazy;

/// Pre-generated key pair and ciphertexts for testing.
struct TestData {
    dk: DecapsulationKey,
    ct_valid: Ciphertext,
    ct_invalid: Ciphertext,
    ct_custom: Ciphertext,
}

fn corrupt(ct: &Ciphertext) -> Ciphertext {
    let mut bytes = ct.as_bytes().to_vec();
    bytes[0] ^= 0xff;
    bytes[100] ^= 0xaa;
    Ciphertext::from_bytes(&bytes).expect("invalid ct construction")
}

static TEST_DATA: Lazy<TestData> = Lazy::new(|| {
    let (dk, ek) = Kyber768::keygen(&mut rand::thread_rng()).expect("keygen failed");
    let (ct_valid, _ss) = Kyber768::encaps(&ek, &mut rand::thread_rng()).expect("encaps failed");
    let ct_invalid = corrupt(&ct_valid);
    let (ct_custom, _ss) =
        Kyber768::encaps_custom(&ek, &CustomSecret::new([0x5a; 32])).expect("encaps failed");

    TestData {
        dk,
        ct_valid,
        ct_invalid,
        ct_custom,
    }
});

/// Number of iterations per batch.
const ITERATIONS: usize = 10_000;

fn random_classes(rng: &mut BenchRng) -> Vec<Class> {
    (0..ITERATIONS)
        .map(|_| if rng.gen::<bool>() { Class::Left } else { Class::Right })
        .collect()
}

/// Left: valid ciphertext. Right: corrupted ciphertext (implicit rejection).
fn bench_decaps_768(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;

    for class in random_classes(rng) {
        let ct = match class {
            Class::Left => &data.ct_valid,
            Class::Right => &data.ct_invalid,
        };

        runner.run_one(class, || {
            let _ = Kyber768::decaps(&data.dk, ct);
        });
    }
}

/// Left: valid custom ciphertext. Right: corrupted custom ciphertext.
fn bench_decaps_custom_768(runner: &mut CtRunner, rng: &mut BenchRng) {
    let data = &*TEST_DATA;
    let ct_custom_invalid = corrupt(&data.ct_custom);

    for class in random_classes(rng) {
        let ct = match class {
            Class::Left => &data.ct_custom,
            Class::Right => &ct_custom_invalid,
        };

        runner.run_one(class, || {
            let _ = Kyber768::decaps_custom(&data.dk, ct);
        });
    }
}

ctbench_main!(bench_decaps_768, bench_decaps_custom_768);
