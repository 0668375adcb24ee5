//! # Kyvern
//!
//! Post-quantum key encapsulation built on Kyber (round 3).
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support and the
//!   `KYVERN_BACKEND` override
//! - `kyber` (default): Enable the Kyber KEM with all parameter sets and
//!   the SIMD backends
//! - `tracing`: Log backend selection through `tracing`
//!
//! ## Supported Algorithms
//!
//! - **Kyber** (round 3): CCA2-secure KEM via the Fujisaki-Okamoto transform
//!   - Kyber-512
//!   - Kyber-768
//!   - Kyber-1024
//!
//! ## Example
//!
//! ```ignore
//! use kyvern::kyber::{CustomSecretKem, Kem, Kyber768};
//! use kyvern::kyber::kyber768::CustomSecret;
//!
//! // Generate a key pair
//! let (dk, ek) = Kyber768::keygen(&mut rng)?;
//!
//! // Encapsulate a shared secret
//! let (ct, ss_sender) = Kyber768::encaps(&ek, &mut rng)?;
//! let ss_receiver = Kyber768::decaps(&dk, &ct)?;
//!
//! // Or carry a message of your choosing
//! let (ct, ss) = Kyber768::encaps_custom(&ek, &CustomSecret::new([0u8; 32]))?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use kyvern_core::{Error, Result};

/// Core traits for key encapsulation.
pub mod traits {
    pub use kyvern_core::{CpaCustomKem, CustomSecretKem, Kem};
}

/// Constant-time helpers.
pub use kyvern_core::ct;

/// Kyber key encapsulation mechanism.
#[cfg(feature = "kyber")]
pub mod kyber {
    pub use kyvern_core::{CpaCustomKem, CustomSecretKem, Kem};
    pub use kyvern_kem::*;
}
