//! Custom-secret encapsulation over byte slices.
//!
//! Two modes let the caller choose the 32-byte message that ends up inside
//! the ciphertext:
//!
//! - **CCA**: the message replaces the sampled randomness of
//!   [`encapsulate`](crate::kem::encapsulate). Decapsulation is the
//!   standard one, with the re-encryption check and implicit rejection.
//! - **CPA**: the message is encrypted directly and *is* the shared secret.
//!   Decapsulation returns whatever decryption yields. Chosen-plaintext
//!   security only: a modified ciphertext silently decrypts to a different
//!   message.

use kyvern_core::{Error, Result};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::dispatch::{check_ciphertext, Backend};
use crate::kem::{decapsulate, encapsulate_with_input, SecretKeyView};
use crate::params::{ciphertext_bytes, SSBYTES, SYMBYTES};

fn message(msg: &[u8]) -> Result<&[u8; SYMBYTES]> {
    msg.try_into().map_err(|_| Error::InvalidMessageLength {
        expected: SYMBYTES,
        actual: msg.len(),
    })
}

/// Encrypt `msg` under `pk` with fresh coins from `rng`.
///
/// Returns the transported secret, which equals `msg`.
pub fn encapsulate_cpa_custom<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    backend: &Backend,
    rng: &mut impl CryptoRngCore,
    ct: &mut [u8],
    pk: &[u8],
    msg: &[u8],
) -> Result<Zeroizing<[u8; SSBYTES]>> {
    let msg = message(msg)?;
    let mut coins = Zeroizing::new([0u8; SYMBYTES]);
    rng.try_fill_bytes(&mut coins[..])?;

    backend.pke_encrypt::<K, ETA1, ETA2, DU, DV>(ct, msg, pk, &coins)?;
    Ok(Zeroizing::new(*msg))
}

/// Decrypt a CPA custom ciphertext. No integrity check is performed.
pub fn decapsulate_cpa_custom<const K: usize, const DU: usize, const DV: usize>(
    backend: &Backend,
    sk: &[u8],
    ct: &[u8],
) -> Result<Zeroizing<[u8; SSBYTES]>> {
    let key = SecretKeyView::parse::<K>(sk)?;
    check_ciphertext(ct.len(), ciphertext_bytes(K, DU, DV))?;
    backend.pke_decrypt::<K, DU, DV>(ct, key.sk_pke)
}

/// CCA2 encapsulation of a caller-chosen message.
///
/// Deterministic in `(pk, msg)`.
pub fn encapsulate_cca_custom<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    backend: &Backend,
    ct: &mut [u8],
    pk: &[u8],
    msg: &[u8],
) -> Result<Zeroizing<[u8; SSBYTES]>> {
    let msg = message(msg)?;
    encapsulate_with_input::<K, ETA1, ETA2, DU, DV>(backend, ct, pk, msg)
}

/// Decapsulate a CCA custom ciphertext.
///
/// This is the standard decapsulation; it is exposed under its own name
/// so both sides of the custom mode read symmetrically.
pub fn decapsulate_cca_custom<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    backend: &Backend,
    sk: &[u8],
    ct: &[u8],
) -> Result<Zeroizing<[u8; SSBYTES]>> {
    decapsulate::<K, ETA1, ETA2, DU, DV>(backend, sk, ct)
}
