//! Key type wrapper macros for the Kyber variants.
//!
//! `define_kem_types!` generates the fixed-size wrappers of one parameter
//! set and `define_kyber!` implements the KEM traits on top of them by
//! calling into [`crate::kem`] and [`crate::custom`] with the process-wide
//! [`Backend`](crate::Backend).

/// Generate the key, ciphertext and secret types for a parameter set.
macro_rules! define_kem_types {
    (
        dk_size: $dk_size:expr,
        ek_size: $ek_size:expr,
        ct_size: $ct_size:expr,
        ss_size: $ss_size:expr
    ) => {
        /// Decapsulation key (secret key).
        ///
        /// Layout: `sk_pke || ek || H(ek) || z`.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsulationKey {
            bytes: [u8; $dk_size],
        }

        impl DecapsulationKey {
            /// Create a decapsulation key from bytes.
            ///
            /// Writes directly into the struct to avoid intermediate buffers
            /// that could leave sensitive data on the stack.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $dk_size {
                    return Err(Error::InvalidKeyLength {
                        expected: $dk_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $dk_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the key as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Encapsulation key (public key).
        #[derive(Clone, PartialEq, Eq)]
        pub struct EncapsulationKey {
            bytes: [u8; $ek_size],
        }

        impl EncapsulationKey {
            /// Create an encapsulation key from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $ek_size {
                    return Err(Error::InvalidKeyLength {
                        expected: $ek_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $ek_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the key as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Ciphertext of the CCA2 modes.
        #[derive(Clone, PartialEq, Eq)]
        pub struct Ciphertext {
            bytes: [u8; $ct_size],
        }

        impl Ciphertext {
            /// Create a ciphertext from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $ct_size {
                    return Err(Error::InvalidCiphertextLength {
                        expected: $ct_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $ct_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the ciphertext as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Ciphertext of the CPA-only custom mode.
        ///
        /// Same size as [`Ciphertext`] but deliberately a different type.
        #[derive(Clone, PartialEq, Eq)]
        pub struct CpaCiphertext {
            bytes: [u8; $ct_size],
        }

        impl CpaCiphertext {
            /// Create a CPA ciphertext from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $ct_size {
                    return Err(Error::InvalidCiphertextLength {
                        expected: $ct_size,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self {
                    bytes: [0u8; $ct_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the ciphertext as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }

        impl AsRef<[u8]> for CpaCiphertext {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Shared secret.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SharedSecret {
            bytes: [u8; $ss_size],
        }

        impl AsRef<[u8]> for SharedSecret {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Caller-chosen message for the CCA custom mode.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CustomSecret {
            bytes: [u8; 32],
        }

        impl CustomSecret {
            /// Wrap a 32-byte message.
            pub fn new(bytes: [u8; 32]) -> Self {
                Self { bytes }
            }

            /// Create a custom secret from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != 32 {
                    return Err(Error::InvalidMessageLength {
                        expected: 32,
                        actual: bytes.len(),
                    });
                }
                let mut result = Self { bytes: [0u8; 32] };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }
        }

        impl AsRef<[u8]> for CustomSecret {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Secret transported by the CPA-only custom mode.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CpaSecret {
            bytes: [u8; 32],
        }

        impl AsRef<[u8]> for CpaSecret {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

/// Implement [`Kem`](kyvern_core::Kem),
/// [`CustomSecretKem`](kyvern_core::CustomSecretKem) and
/// [`CpaCustomKem`](kyvern_core::CpaCustomKem) for `$name` using the
/// constants of the parameter module in scope.
macro_rules! define_kyber {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name;

        impl Kem for $name {
            type DecapsulationKey = DecapsulationKey;
            type EncapsulationKey = EncapsulationKey;
            type Ciphertext = Ciphertext;
            type SharedSecret = SharedSecret;

            const DECAPSULATION_KEY_SIZE: usize = SECRET_KEY_SIZE;
            const ENCAPSULATION_KEY_SIZE: usize = PUBLIC_KEY_SIZE;
            const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
            const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;

            fn keygen(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
                let backend = Backend::selected()?;
                let mut dk = DecapsulationKey {
                    bytes: [0u8; SECRET_KEY_SIZE],
                };
                let mut ek = EncapsulationKey {
                    bytes: [0u8; PUBLIC_KEY_SIZE],
                };
                kem::keypair::<K, ETA1>(&backend, rng, &mut ek.bytes, &mut dk.bytes)?;
                Ok((dk, ek))
            }

            fn keygen_from_seed(
                seed: &[u8; 32],
            ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
                let backend = Backend::selected()?;
                let mut dk = DecapsulationKey {
                    bytes: [0u8; SECRET_KEY_SIZE],
                };
                let mut ek = EncapsulationKey {
                    bytes: [0u8; PUBLIC_KEY_SIZE],
                };
                kem::keypair_from_seed::<K, ETA1>(&backend, seed, &mut ek.bytes, &mut dk.bytes)?;
                Ok((dk, ek))
            }

            fn encaps(
                ek: &Self::EncapsulationKey,
                rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
                let backend = Backend::selected()?;
                let mut ct = Ciphertext {
                    bytes: [0u8; CIPHERTEXT_SIZE],
                };
                let ss = kem::encapsulate::<K, ETA1, ETA2, DU, DV>(
                    &backend,
                    rng,
                    &mut ct.bytes,
                    &ek.bytes,
                )?;
                Ok((ct, SharedSecret { bytes: *ss }))
            }

            fn decaps(
                dk: &Self::DecapsulationKey,
                ct: &Self::Ciphertext,
            ) -> Result<Self::SharedSecret> {
                let backend = Backend::selected()?;
                let ss =
                    kem::decapsulate::<K, ETA1, ETA2, DU, DV>(&backend, &dk.bytes, &ct.bytes)?;
                Ok(SharedSecret { bytes: *ss })
            }
        }

        impl CustomSecretKem for $name {
            type CustomSecret = CustomSecret;

            fn encaps_custom(
                ek: &Self::EncapsulationKey,
                msg: &Self::CustomSecret,
            ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
                let backend = Backend::selected()?;
                let mut ct = Ciphertext {
                    bytes: [0u8; CIPHERTEXT_SIZE],
                };
                let ss = custom::encapsulate_cca_custom::<K, ETA1, ETA2, DU, DV>(
                    &backend,
                    &mut ct.bytes,
                    &ek.bytes,
                    &msg.bytes,
                )?;
                Ok((ct, SharedSecret { bytes: *ss }))
            }

            fn decaps_custom(
                dk: &Self::DecapsulationKey,
                ct: &Self::Ciphertext,
            ) -> Result<Self::SharedSecret> {
                let backend = Backend::selected()?;
                let ss = custom::decapsulate_cca_custom::<K, ETA1, ETA2, DU, DV>(
                    &backend, &dk.bytes, &ct.bytes,
                )?;
                Ok(SharedSecret { bytes: *ss })
            }
        }

        impl CpaCustomKem for $name {
            type CpaCiphertext = CpaCiphertext;
            type CpaSecret = CpaSecret;

            fn encaps_cpa(
                ek: &Self::EncapsulationKey,
                msg: &[u8; 32],
                rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::CpaCiphertext, Self::CpaSecret)> {
                let backend = Backend::selected()?;
                let mut ct = CpaCiphertext {
                    bytes: [0u8; CIPHERTEXT_SIZE],
                };
                let secret = custom::encapsulate_cpa_custom::<K, ETA1, ETA2, DU, DV>(
                    &backend,
                    rng,
                    &mut ct.bytes,
                    &ek.bytes,
                    msg,
                )?;
                Ok((ct, CpaSecret { bytes: *secret }))
            }

            fn decaps_cpa(
                dk: &Self::DecapsulationKey,
                ct: &Self::CpaCiphertext,
            ) -> Result<Self::CpaSecret> {
                let backend = Backend::selected()?;
                let secret =
                    custom::decapsulate_cpa_custom::<K, DU, DV>(&backend, &dk.bytes, &ct.bytes)?;
                Ok(CpaSecret { bytes: *secret })
            }
        }
    };
}

pub(crate) use define_kem_types;
pub(crate) use define_kyber;
