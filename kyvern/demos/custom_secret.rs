//! Custom-secret encapsulation with Kyber-768.
//!
//! Runs the CPA-only mode and the CCA mode with the message `0, 1, ..., 31`
//! and prints what each side ends up with.
//!
//! ```text
//! cargo run -p kyvern --example custom_secret
//! ```

use anyhow::{ensure, Result};
use kyvern::kyber::kyber768::CustomSecret;
use kyvern::kyber::{Backend, CpaCustomKem, CustomSecretKem, Kem, Kyber768};
use rand::rngs::OsRng;

fn main() -> Result<()> {
    let backend = Backend::selected()?;
    println!("backend: {}", backend.kind());

    let (dk, ek) = Kyber768::keygen(&mut OsRng)?;
    let msg: [u8; 32] = core::array::from_fn(|i| i as u8);
    println!("message:        {}", hex::encode(msg));

    // CPA: the message itself is the shared secret.
    let (ct, sent) = Kyber768::encaps_cpa(&ek, &msg, &mut OsRng)?;
    let received = Kyber768::decaps_cpa(&dk, &ct)?;
    println!("cpa sender:     {}", hex::encode(sent.as_ref()));
    println!("cpa receiver:   {}", hex::encode(received.as_ref()));
    ensure!(sent.as_ref() == received.as_ref(), "CPA secrets differ");

    // CCA: the message replaces the encapsulation randomness.
    let (ct, sent) = Kyber768::encaps_custom(&ek, &CustomSecret::new(msg))?;
    let received = Kyber768::decaps_custom(&dk, &ct)?;
    println!("cca sender:     {}", hex::encode(sent.as_ref()));
    println!("cca receiver:   {}", hex::encode(received.as_ref()));
    ensure!(sent.as_ref() == received.as_ref(), "CCA secrets differ");

    Ok(())
}
