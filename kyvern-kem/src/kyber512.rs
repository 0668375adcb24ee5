//! Kyber-512, NIST security level 1 (comparable to AES-128).

use crate::custom;
use crate::dispatch::Backend;
use crate::kem;
use crate::params::kyber512::*;
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
    /// Kyber-512 key encapsulation mechanism.
    Kyber512
}
