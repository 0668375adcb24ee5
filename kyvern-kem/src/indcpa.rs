//! IND-CPA public-key encryption (Kyber round 3).
//!
//! Deterministic given its seed / coins; the KEM layer supplies all
//! randomness. Buffers are sized by the caller (see [`crate::params`]);
//! the functions here assume the lengths were validated.
//!
//! Layouts:
//! - public key: `encode12(t) || rho`
//! - secret key: `encode12(s)`
//! - ciphertext: `compress_du(u) || compress_dv(v)`

use zeroize::Zeroizing;

use crate::backend::Kernels;
use crate::encode::{poly_compress, poly_decompress, poly_from_msg, poly_to_msg};
use crate::hash::hash_g;
use crate::params::{polyvec_bytes, SYMBYTES};
use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::sample::{sample_noise, sample_uniform};

/// Expand `rho` into the public matrix A, or its transpose.
///
/// `A[i][j]` is sampled from XOF(`rho || j || i`).
fn gen_matrix<const K: usize>(rho: &[u8; SYMBYTES], transposed: bool) -> [PolyVec<K>; K] {
    core::array::from_fn(|i| PolyVec {
        polys: core::array::from_fn(|j| {
            if transposed {
                sample_uniform(rho, i as u8, j as u8)
            } else {
                sample_uniform(rho, j as u8, i as u8)
            }
        }),
    })
}

/// Key generation from a 32-byte seed `d`: `(rho, sigma) = G(d)`.
pub(crate) fn keypair<const K: usize, const ETA1: usize, B: Kernels>(
    d: &[u8; SYMBYTES],
    pk: &mut [u8],
    sk: &mut [u8],
) {
    let mut expanded = Zeroizing::new([0u8; 2 * SYMBYTES]);
    hash_g(&[&d[..]], &mut expanded);
    let mut rho = [0u8; SYMBYTES];
    let mut sigma = Zeroizing::new([0u8; SYMBYTES]);
    rho.copy_from_slice(&expanded[..SYMBYTES]);
    sigma.copy_from_slice(&expanded[SYMBYTES..]);

    let a = gen_matrix::<K>(&rho, false);

    let mut s = Zeroizing::new(PolyVec::<K>::default());
    let mut e = Zeroizing::new(PolyVec::<K>::default());
    for i in 0..K {
        sample_noise::<ETA1>(&mut s.polys[i], &sigma, i as u8);
        sample_noise::<ETA1>(&mut e.polys[i], &sigma, (K + i) as u8);
    }
    s.ntt::<B>();
    e.ntt::<B>();

    let mut t = PolyVec::<K>::default();
    for (ti, row) in t.polys.iter_mut().zip(a.iter()) {
        *ti = row.basemul_acc::<B>(&s);
        ti.to_mont::<B>();
    }
    t.add::<B>(&e);
    t.reduce::<B>();

    let pv = polyvec_bytes(K);
    s.to_bytes(&mut sk[..pv]);
    t.to_bytes(&mut pk[..pv]);
    pk[pv..pv + SYMBYTES].copy_from_slice(&rho);
}

/// Encrypt `msg` under `pk` with the 32-byte `coins`.
pub(crate) fn encrypt<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
    B: Kernels,
>(
    ct: &mut [u8],
    msg: &[u8; SYMBYTES],
    pk: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let pv = polyvec_bytes(K);
    let t = PolyVec::<K>::from_bytes(&pk[..pv]);
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(&pk[pv..pv + SYMBYTES]);

    let at = gen_matrix::<K>(&rho, true);

    let mut r = Zeroizing::new(PolyVec::<K>::default());
    let mut e1 = Zeroizing::new(PolyVec::<K>::default());
    let mut e2 = Zeroizing::new(Poly::default());
    for i in 0..K {
        sample_noise::<ETA1>(&mut r.polys[i], coins, i as u8);
        sample_noise::<ETA2>(&mut e1.polys[i], coins, (K + i) as u8);
    }
    sample_noise::<ETA2>(&mut e2, coins, (2 * K) as u8);
    r.ntt::<B>();

    let mut u = Zeroizing::new(PolyVec::<K>::default());
    for (ui, row) in u.polys.iter_mut().zip(at.iter()) {
        *ui = row.basemul_acc::<B>(&r);
    }
    let mut v = Zeroizing::new(t.basemul_acc::<B>(&r));

    u.inv_ntt_tomont::<B>();
    v.inv_ntt_tomont::<B>();

    u.add::<B>(&e1);
    v.add::<B>(&e2);
    let mut msg_poly = Zeroizing::new(Poly::default());
    poly_from_msg(&mut msg_poly, msg);
    v.add::<B>(&msg_poly);
    u.reduce::<B>();
    v.reduce::<B>();

    let split = K * 32 * DU;
    u.compress(DU, &mut ct[..split]);
    poly_compress(&v, DV, &mut ct[split..split + 32 * DV]);
}

/// Decrypt `ct` with `sk`, returning the 32-byte message.
pub(crate) fn decrypt<const K: usize, const DU: usize, const DV: usize, B: Kernels>(
    ct: &[u8],
    sk: &[u8],
) -> Zeroizing<[u8; SYMBYTES]> {
    let split = K * 32 * DU;
    let mut u = PolyVec::<K>::decompress(&ct[..split], DU);
    let mut v = Zeroizing::new(poly_decompress(&ct[split..split + 32 * DV], DV));
    let s = Zeroizing::new(PolyVec::<K>::from_bytes(&sk[..polyvec_bytes(K)]));

    u.ntt::<B>();
    let mut mp: Zeroizing<Poly> = Zeroizing::new(s.basemul_acc::<B>(&u));
    mp.inv_ntt_tomont::<B>();

    v.sub::<B>(&mp);
    v.reduce::<B>();
    Zeroizing::new(poly_to_msg(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Reference;
    use crate::params::{ciphertext_bytes, pke_public_key_bytes, pke_secret_key_bytes};

    const K: usize = 3;
    const PK: usize = pke_public_key_bytes(K);
    const SK: usize = pke_secret_key_bytes(K);
    const CT: usize = ciphertext_bytes(K, 10, 4);

    fn keys(seed: u8) -> ([u8; PK], [u8; SK]) {
        let mut pk = [0u8; PK];
        let mut sk = [0u8; SK];
        keypair::<K, 2, Reference>(&[seed; 32], &mut pk, &mut sk);
        (pk, sk)
    }

    #[test]
    fn test_encrypt_decrypt() {
        let (pk, sk) = keys(1);
        let msg: [u8; 32] = core::array::from_fn(|i| i as u8);
        let mut ct = [0u8; CT];
        encrypt::<K, 2, 2, 10, 4, Reference>(&mut ct, &msg, &pk, &[7u8; 32]);
        let recovered = decrypt::<K, 10, 4, Reference>(&ct, &sk);
        assert_eq!(*recovered, msg);
    }

    #[test]
    fn test_keypair_deterministic() {
        assert_eq!(keys(5), keys(5));
        assert_ne!(keys(5).0, keys(6).0);
    }

    #[test]
    fn test_public_key_ends_with_rho() {
        let (pk, _) = keys(9);
        let mut g = [0u8; 64];
        hash_g(&[&[9u8; 32][..]], &mut g);
        assert_eq!(&pk[PK - 32..], &g[..32]);
    }

    #[test]
    fn test_secret_key_uses_sigma_half() {
        let (_, sk) = keys(4);
        let mut g = [0u8; 64];
        hash_g(&[&[4u8; 32][..]], &mut g);
        let mut sigma = [0u8; 32];
        sigma.copy_from_slice(&g[32..]);

        let mut s = PolyVec::<K>::default();
        for i in 0..K {
            sample_noise::<2>(&mut s.polys[i], &sigma, i as u8);
        }
        s.ntt::<Reference>();
        let mut expected = [0u8; SK];
        s.to_bytes(&mut expected);
        assert_eq!(sk, expected);
    }

    #[test]
    fn test_coins_change_ciphertext() {
        let (pk, _) = keys(2);
        let msg = [0xaau8; 32];
        let mut a = [0u8; CT];
        let mut b = [0u8; CT];
        encrypt::<K, 2, 2, 10, 4, Reference>(&mut a, &msg, &pk, &[1u8; 32]);
        encrypt::<K, 2, 2, 10, 4, Reference>(&mut b, &msg, &pk, &[2u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_kyber512_shape() {
        const K2: usize = 2;
        let mut pk = [0u8; pke_public_key_bytes(K2)];
        let mut sk = [0u8; pke_secret_key_bytes(K2)];
        keypair::<K2, 3, Reference>(&[3u8; 32], &mut pk, &mut sk);
        let msg = [0x0fu8; 32];
        let mut ct = [0u8; ciphertext_bytes(K2, 10, 4)];
        encrypt::<K2, 3, 2, 10, 4, Reference>(&mut ct, &msg, &pk, &[4u8; 32]);
        assert_eq!(*decrypt::<K2, 10, 4, Reference>(&ct, &sk), msg);
    }

    #[test]
    fn test_kyber1024_shape() {
        const K4: usize = 4;
        let mut pk = [0u8; pke_public_key_bytes(K4)];
        let mut sk = [0u8; pke_secret_key_bytes(K4)];
        keypair::<K4, 2, Reference>(&[8u8; 32], &mut pk, &mut sk);
        let msg = [0xf0u8; 32];
        let mut ct = [0u8; ciphertext_bytes(K4, 11, 5)];
        encrypt::<K4, 2, 2, 11, 5, Reference>(&mut ct, &msg, &pk, &[4u8; 32]);
        assert_eq!(*decrypt::<K4, 11, 5, Reference>(&ct, &sk), msg);
    }
}
