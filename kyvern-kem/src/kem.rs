//! CCA2-secure KEM over byte slices (Kyber round-3 Fujisaki-Okamoto
//! transform).
//!
//! The secret key is laid out as `sk_pke || pk || H(pk) || z`. `H(pk)` and
//! `z` are stored at key generation and never recomputed.
//!
//! Decapsulation never reports an integrity failure. A ciphertext that does
//! not re-encrypt to itself yields `KDF(z || H(ct))`, which is
//! indistinguishable from a real shared secret to anyone without `z`.
//!
//! # Type Parameters
//! * `K` - Module rank (2, 3, or 4)
//! * `ETA1` - Noise parameter for `s`, `e` and `r` (2 or 3)
//! * `ETA2` - Noise parameter for `e1` and `e2` (2)
//! * `DU` - Compression width of `u` (10 or 11)
//! * `DV` - Compression width of `v` (4 or 5)

use kyvern_core::ct::{ct_compare, ct_select};
use kyvern_core::Result;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::dispatch::{check_ciphertext, check_key, Backend};
use crate::hash::{hash_g, hash_h, kdf};
use crate::params::{
    ciphertext_bytes, kem_secret_key_bytes, pke_public_key_bytes, pke_secret_key_bytes, SSBYTES,
    SYMBYTES,
};

/// Largest ciphertext over all parameter sets (Kyber-1024).
pub(crate) const MAX_CIPHERTEXT_BYTES: usize = ciphertext_bytes(4, 11, 5);

/// Borrowed view of a KEM secret key.
pub(crate) struct SecretKeyView<'a> {
    pub sk_pke: &'a [u8],
    pub pk: &'a [u8],
    pub h_pk: &'a [u8; SYMBYTES],
    pub z: &'a [u8; SYMBYTES],
}

impl<'a> SecretKeyView<'a> {
    /// Split `sk` for rank `K`, checking its length.
    pub fn parse<const K: usize>(sk: &'a [u8]) -> Result<Self> {
        check_key(sk.len(), kem_secret_key_bytes(K))?;
        let (sk_pke, rest) = sk.split_at(pke_secret_key_bytes(K));
        let (pk, rest) = rest.split_at(pke_public_key_bytes(K));
        let (h_pk, z) = rest.split_at(SYMBYTES);
        Ok(Self {
            sk_pke,
            pk,
            h_pk: as_seed(h_pk)?,
            z: as_seed(z)?,
        })
    }
}

fn as_seed(bytes: &[u8]) -> Result<&[u8; SYMBYTES]> {
    bytes.try_into().map_err(|_| kyvern_core::Error::InvalidKeyLength {
        expected: SYMBYTES,
        actual: bytes.len(),
    })
}

fn split_halves(buf: &[u8; 2 * SYMBYTES]) -> (Zeroizing<[u8; SYMBYTES]>, Zeroizing<[u8; SYMBYTES]>) {
    let mut lo = Zeroizing::new([0u8; SYMBYTES]);
    let mut hi = Zeroizing::new([0u8; SYMBYTES]);
    lo.copy_from_slice(&buf[..SYMBYTES]);
    hi.copy_from_slice(&buf[SYMBYTES..]);
    (lo, hi)
}

/// Assemble `sk = sk_pke || pk || H(pk) || z` around a fresh primitive key
/// pair derived from `d`.
fn keypair_with<const K: usize, const ETA1: usize>(
    backend: &Backend,
    d: &[u8; SYMBYTES],
    z: &[u8; SYMBYTES],
    pk: &mut [u8],
    sk: &mut [u8],
) -> Result<()> {
    check_key(pk.len(), pke_public_key_bytes(K))?;
    check_key(sk.len(), kem_secret_key_bytes(K))?;

    let sk_pke_len = pke_secret_key_bytes(K);
    let pk_len = pke_public_key_bytes(K);
    backend.pke_keypair_from_seed::<K, ETA1>(d, pk, &mut sk[..sk_pke_len])?;

    let (_, tail) = sk.split_at_mut(sk_pke_len);
    let (pk_copy, tail) = tail.split_at_mut(pk_len);
    let (h_pk, z_out) = tail.split_at_mut(SYMBYTES);
    pk_copy.copy_from_slice(pk);
    h_pk.copy_from_slice(&hash_h(pk));
    z_out.copy_from_slice(z);
    Ok(())
}

/// Generate a key pair. The primitive seed and `z` come from `rng`.
pub fn keypair<const K: usize, const ETA1: usize>(
    backend: &Backend,
    rng: &mut impl CryptoRngCore,
    pk: &mut [u8],
    sk: &mut [u8],
) -> Result<()> {
    let mut d = Zeroizing::new([0u8; SYMBYTES]);
    let mut z = Zeroizing::new([0u8; SYMBYTES]);
    rng.try_fill_bytes(&mut d[..])?;
    rng.try_fill_bytes(&mut z[..])?;
    keypair_with::<K, ETA1>(backend, &d, &z, pk, sk)
}

/// Derive a key pair deterministically from `seed`.
///
/// The seed feeds the primitive key generation and is also stored as the
/// rejection value `z`. Knowing the seed therefore reveals both the
/// decapsulation key and every implicit-rejection secret.
pub fn keypair_from_seed<const K: usize, const ETA1: usize>(
    backend: &Backend,
    seed: &[u8; SYMBYTES],
    pk: &mut [u8],
    sk: &mut [u8],
) -> Result<()> {
    keypair_with::<K, ETA1>(backend, seed, seed, pk, sk)
}

/// FO encapsulation with a caller-provided 32-byte input, which is hashed
/// before use. Writes the ciphertext to `ct` and returns the shared secret.
pub(crate) fn encapsulate_with_input<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    backend: &Backend,
    ct: &mut [u8],
    pk: &[u8],
    input: &[u8; SYMBYTES],
) -> Result<Zeroizing<[u8; SSBYTES]>> {
    check_key(pk.len(), pke_public_key_bytes(K))?;
    check_ciphertext(ct.len(), ciphertext_bytes(K, DU, DV))?;

    // m <- H(input): never expose raw RNG output or caller bytes
    let m = Zeroizing::new(hash_h(input));
    let d = hash_h(pk);
    let mut kr = Zeroizing::new([0u8; 2 * SYMBYTES]);
    hash_g(&[&m[..], &d[..]], &mut kr);
    let (k_bar, coins) = split_halves(&kr);

    backend.pke_encrypt::<K, ETA1, ETA2, DU, DV>(ct, &m, pk, &coins)?;

    let h_ct = hash_h(ct);
    Ok(Zeroizing::new(kdf(&[&k_bar[..], &h_ct[..]])))
}

/// Encapsulate a fresh shared secret to `pk`.
pub fn encapsulate<
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
) -> Result<Zeroizing<[u8; SSBYTES]>> {
    let mut buf = Zeroizing::new([0u8; SYMBYTES]);
    rng.try_fill_bytes(&mut buf[..])?;
    encapsulate_with_input::<K, ETA1, ETA2, DU, DV>(backend, ct, pk, &buf)
}

/// Decapsulate `ct` with `sk`.
///
/// Runs in time independent of whether `ct` is valid.
pub fn decapsulate<
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
    let key = SecretKeyView::parse::<K>(sk)?;
    let ct_len = ciphertext_bytes(K, DU, DV);
    check_ciphertext(ct.len(), ct_len)?;

    let m = backend.pke_decrypt::<K, DU, DV>(ct, key.sk_pke)?;
    let mut kr = Zeroizing::new([0u8; 2 * SYMBYTES]);
    hash_g(&[&m[..], &key.h_pk[..]], &mut kr);
    let (k_bar, coins) = split_halves(&kr);

    let mut cmp = Zeroizing::new([0u8; MAX_CIPHERTEXT_BYTES]);
    backend.pke_encrypt::<K, ETA1, ETA2, DU, DV>(&mut cmp[..ct_len], &m, key.pk, &coins)?;
    let fail = ct_compare(ct, &cmp[..ct_len]);

    // kr = k_bar' || H(ct), with k_bar' replaced by z on failure
    let mut kr = Zeroizing::new([0u8; 2 * SYMBYTES]);
    kr[..SYMBYTES].copy_from_slice(&k_bar[..]);
    kr[SYMBYTES..].copy_from_slice(&hash_h(ct));
    ct_select(&mut kr[..SYMBYTES], key.z, fail);

    Ok(Zeroizing::new(kdf(&[&kr[..]])))
}
