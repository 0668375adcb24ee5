//! # Kyvern Core
//!
//! Core traits and utilities shared by the kyvern KEM crates.
//!
//! This crate provides:
//! - The common [`Error`] type
//! - The KEM traits ([`Kem`], [`CustomSecretKem`], [`CpaCustomKem`])
//! - Constant-time comparison and conditional overwrite ([`ct`])
//! - AVX2 detection for kernel crates ([`define_has_avx2!`])
//! - Secure memory handling with zeroize integration

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod ct;
mod error;
mod simd;
mod traits;

pub use error::{Error, Result};
pub use traits::{CpaCustomKem, CustomSecretKem, Kem};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Re-export subtle for constant-time operations.
pub use subtle;
