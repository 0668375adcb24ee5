//! KEM traits.

use crate::Result;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key Encapsulation Mechanism (KEM) trait.
///
/// CCA2-secure KEM obtained from an IND-CPA encryption scheme through the
/// Fujisaki-Okamoto transform.
///
/// # Example
///
/// ```ignore
/// use kyvern_core::Kem;
///
/// let (dk, ek) = MyKem::keygen(&mut rng)?;
/// let (ct, ss_sender) = MyKem::encaps(&ek, &mut rng)?;
/// let ss_receiver = MyKem::decaps(&dk, &ct)?;
/// ```
pub trait Kem {
    /// Decapsulation key (private key).
    type DecapsulationKey: Zeroize + ZeroizeOnDrop;

    /// Encapsulation key (public key).
    type EncapsulationKey: Clone;

    /// Ciphertext produced by encapsulation.
    type Ciphertext: Clone;

    /// Shared secret produced by encapsulation/decapsulation.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Size of the decapsulation key in bytes.
    const DECAPSULATION_KEY_SIZE: usize;

    /// Size of the encapsulation key in bytes.
    const ENCAPSULATION_KEY_SIZE: usize;

    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_SIZE: usize;

    /// Size of the shared secret in bytes.
    const SHARED_SECRET_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// Returns `(decapsulation_key, encapsulation_key)`.
    fn keygen(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Deterministically derive a key pair from a 32-byte seed.
    ///
    /// # Security
    ///
    /// The seed also becomes the implicit-rejection value `z`. Anyone who
    /// knows the seed can predict the rejection secrets, so the seed must be
    /// kept as secret as the decapsulation key itself.
    fn keygen_from_seed(
        seed: &[u8; 32],
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Encapsulate a fresh shared secret to `ek`.
    ///
    /// Returns `(ciphertext, shared_secret)`.
    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a shared secret using the decapsulation key.
    ///
    /// # Security
    ///
    /// Implementations MUST use implicit rejection: an invalid ciphertext
    /// produces a pseudorandom shared secret derived from the private key
    /// and the ciphertext instead of an error.
    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret>;
}

/// CCA2-secure encapsulation of a caller-chosen 32-byte message.
///
/// The message replaces the randomness normally sampled by [`Kem::encaps`];
/// everything else, including the re-encryption check on decapsulation, is
/// unchanged. Encapsulating the same message twice to the same key yields
/// the same ciphertext, so the message must carry enough entropy for the
/// caller's purpose.
pub trait CustomSecretKem: Kem {
    /// Caller-supplied message.
    type CustomSecret: Zeroize + AsRef<[u8]>;

    /// Encapsulate `msg` to `ek`.
    fn encaps_custom(
        ek: &Self::EncapsulationKey,
        msg: &Self::CustomSecret,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a ciphertext produced by [`CustomSecretKem::encaps_custom`].
    ///
    /// Identical to [`Kem::decaps`].
    fn decaps_custom(
        dk: &Self::DecapsulationKey,
        ct: &Self::Ciphertext,
    ) -> Result<Self::SharedSecret>;
}

/// Plain IND-CPA encryption of a caller-chosen 32-byte secret.
///
/// # Security
///
/// This mode is **only** chosen-plaintext secure. There is no re-encryption
/// check on decapsulation: a modified ciphertext decrypts to a different
/// secret without any indication. Its ciphertext and secret types are
/// distinct from the [`Kem`] ones so they cannot be mixed up with the CCA2
/// surface.
pub trait CpaCustomKem: Kem {
    /// Ciphertext of the CPA-only mode.
    type CpaCiphertext: Clone + AsRef<[u8]>;

    /// The transported secret, equal to the encrypted message.
    type CpaSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Encrypt `msg` under `ek`. Fresh encryption coins come from `rng`.
    fn encaps_cpa(
        ek: &Self::EncapsulationKey,
        msg: &[u8; 32],
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::CpaCiphertext, Self::CpaSecret)>;

    /// Decrypt `ct`, returning the recovered secret.
    fn decaps_cpa(
        dk: &Self::DecapsulationKey,
        ct: &Self::CpaCiphertext,
    ) -> Result<Self::CpaSecret>;
}
