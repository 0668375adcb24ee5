//! # kyvern-kem
//!
//! CCA2-secure Kyber key encapsulation (round 3), with runtime selection of
//! the arithmetic backend and two custom-secret modes.
//!
//! ## Parameter Sets
//!
//! | Parameter Set | Security Level | Public Key | Secret Key | Ciphertext | Shared Secret |
//! |---------------|----------------|------------|------------|------------|---------------|
//! | Kyber-512     | 1 (128-bit)    | 800 bytes  | 1632 bytes | 768 bytes  | 32 bytes      |
//! | Kyber-768     | 3 (192-bit)    | 1184 bytes | 2400 bytes | 1088 bytes | 32 bytes      |
//! | Kyber-1024    | 5 (256-bit)    | 1568 bytes | 3168 bytes | 1568 bytes | 32 bytes      |
//!
//! ## Modes
//!
//! - [`Kem`]: standard encapsulation with implicit rejection.
//! - [`CustomSecretKem`]: the caller picks the encapsulated message; still
//!   CCA2 secure.
//! - [`CpaCustomKem`]: the caller's message is encrypted directly and is the
//!   shared secret. Chosen-plaintext security only.
//!
//! ## Backends
//!
//! The encryption primitive runs on the fastest backend the CPU supports
//! (AVX2 on x86_64, NEON on aarch64, portable code elsewhere). All backends
//! produce identical bytes. Set `KYVERN_BACKEND` to `reference`, `avx2`,
//! `neon` or `auto` to override the choice; see [`Backend::selected`].
//!
//! ## Example
//!
//! ```
//! use kyvern_kem::{Kem, Kyber768};
//! use rand::rngs::OsRng;
//!
//! let (dk, ek) = Kyber768::keygen(&mut OsRng)?;
//! let (ct, ss_sender) = Kyber768::encaps(&ek, &mut OsRng)?;
//! let ss_receiver = Kyber768::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! # Ok::<(), kyvern_kem::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod backend;
mod dispatch;
mod encode;
mod hash;
mod indcpa;
mod ntt;
mod poly;
mod polyvec;
mod reduce;
mod sample;
mod types;

pub mod custom;
pub mod kem;
pub mod params;

#[cfg(feature = "kyber512")]
pub mod kyber512;
#[cfg(feature = "kyber768")]
pub mod kyber768;
#[cfg(feature = "kyber1024")]
pub mod kyber1024;

pub use dispatch::{Backend, BackendKind, BACKEND_ENV_VAR};
pub use kyvern_core::{CpaCustomKem, CustomSecretKem, Error, Kem, Result};

#[cfg(feature = "kyber512")]
pub use kyber512::Kyber512;
#[cfg(feature = "kyber768")]
pub use kyber768::Kyber768;
#[cfg(feature = "kyber1024")]
pub use kyber1024::Kyber1024;

