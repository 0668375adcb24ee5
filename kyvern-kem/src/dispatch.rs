//! Backend selection.
//!
//! A [`Backend`] names the kernel implementation that runs the encryption
//! primitive. The process-wide choice, [`Backend::selected`], is made once:
//! it honours the `KYVERN_BACKEND` environment variable (`reference`,
//! `avx2`, `neon` or `auto`) and otherwise inspects the CPU. Every backend
//! produces byte-identical keys and ciphertexts.

use core::fmt;
use core::str::FromStr;

use kyvern_core::{Error, Result};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::backend::Reference;
use crate::indcpa;
use crate::params::{ciphertext_bytes, pke_public_key_bytes, pke_secret_key_bytes, SYMBYTES};

#[cfg(feature = "std")]
use once_cell::sync::OnceCell;

/// Name of the environment variable that overrides backend detection.
pub const BACKEND_ENV_VAR: &str = "KYVERN_BACKEND";

/// The available kernel implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Portable scalar code.
    Reference,
    /// x86_64 AVX2.
    Avx2,
    /// aarch64 NEON.
    Neon,
}

impl BackendKind {
    /// Lower-case name, as accepted by `KYVERN_BACKEND`.
    pub const fn name(self) -> &'static str {
        match self {
            BackendKind::Reference => "reference",
            BackendKind::Avx2 => "avx2",
            BackendKind::Neon => "neon",
        }
    }

    /// Whether this backend is compiled in and supported by the running CPU.
    pub fn is_available(self) -> bool {
        match self {
            BackendKind::Reference => true,
            BackendKind::Avx2 => {
                #[cfg(all(feature = "simd", target_arch = "x86_64"))]
                {
                    crate::backend::has_avx2()
                }
                #[cfg(not(all(feature = "simd", target_arch = "x86_64")))]
                {
                    false
                }
            }
            BackendKind::Neon => cfg!(all(feature = "simd", target_arch = "aarch64")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("reference") {
            Ok(BackendKind::Reference)
        } else if s.eq_ignore_ascii_case("avx2") {
            Ok(BackendKind::Avx2)
        } else if s.eq_ignore_ascii_case("neon") {
            Ok(BackendKind::Neon)
        } else {
            Err(Error::InvalidConfiguration)
        }
    }
}

/// A validated backend choice.
///
/// Only backends that can run on this machine can be constructed, so the
/// primitive operations never fail because of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Backend {
    kind: BackendKind,
}

#[cfg(feature = "std")]
static SELECTED: OnceCell<Result<Backend>> = OnceCell::new();

/// Run `$body` with `$k` bound to the kernel type of `$backend`.
macro_rules! with_kernels {
    ($backend:expr, $k:ident => $body:expr) => {
        match $backend.kind {
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            BackendKind::Avx2 => {
                type $k = crate::backend::Avx2;
                $body
            }
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            BackendKind::Neon => {
                type $k = crate::backend::Neon;
                $body
            }
            #[allow(unreachable_patterns)]
            _ => {
                type $k = Reference;
                $body
            }
        }
    };
}

impl Backend {
    /// The portable backend; always available.
    pub const fn reference() -> Self {
        Self {
            kind: BackendKind::Reference,
        }
    }

    /// Request a specific backend.
    ///
    /// # Errors
    ///
    /// [`Error::BackendUnavailable`] if it is not compiled in or the CPU
    /// lacks the required instructions.
    pub fn new(kind: BackendKind) -> Result<Self> {
        if kind.is_available() {
            Ok(Self { kind })
        } else {
            Err(Error::BackendUnavailable {
                backend: kind.name(),
            })
        }
    }

    /// The fastest backend available on this machine.
    pub fn detect() -> Self {
        for kind in [BackendKind::Avx2, BackendKind::Neon] {
            if kind.is_available() {
                return Self { kind };
            }
        }
        Self::reference()
    }

    /// The process-wide backend.
    ///
    /// Resolved on first use and memoized; concurrent first calls observe
    /// the same result. A bad `KYVERN_BACKEND` value is reported by every
    /// call.
    #[cfg(feature = "std")]
    pub fn selected() -> Result<Self> {
        *SELECTED.get_or_init(|| {
            let value = std::env::var(BACKEND_ENV_VAR).ok();
            Self::from_override(value.as_deref())
        })
    }

    /// The process-wide backend. Without `std` there is no environment to
    /// consult and only compile-time target features are considered.
    #[cfg(not(feature = "std"))]
    pub fn selected() -> Result<Self> {
        Ok(Self::detect())
    }

    /// Resolve an optional override value as `KYVERN_BACKEND` would.
    pub fn from_override(value: Option<&str>) -> Result<Self> {
        let result = match value.map(str::trim) {
            None | Some("") => Ok(Self::detect()),
            Some(v) if v.eq_ignore_ascii_case("auto") => Ok(Self::detect()),
            Some(v) => v.parse::<BackendKind>().and_then(Self::new),
        };

        #[cfg(feature = "tracing")]
        match &result {
            Ok(backend) => tracing::debug!(
                backend = backend.kind.name(),
                overridden = value.is_some(),
                "selected kyvern backend"
            ),
            Err(err) => tracing::warn!(error = %err, "ignoring unusable {}", BACKEND_ENV_VAR),
        }
        result
    }

    /// Which implementation this is.
    pub const fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Generate a primitive key pair with a fresh seed from `rng`.
    ///
    /// `pk` must hold `K * 384 + 32` bytes and `sk` `K * 384` bytes.
    pub fn pke_keypair<const K: usize, const ETA1: usize>(
        &self,
        rng: &mut impl CryptoRngCore,
        pk: &mut [u8],
        sk: &mut [u8],
    ) -> Result<()> {
        let mut seed = Zeroizing::new([0u8; SYMBYTES]);
        rng.try_fill_bytes(&mut seed[..])?;
        self.pke_keypair_from_seed::<K, ETA1>(&seed, pk, sk)
    }

    /// Derive a primitive key pair from `seed`.
    pub fn pke_keypair_from_seed<const K: usize, const ETA1: usize>(
        &self,
        seed: &[u8; SYMBYTES],
        pk: &mut [u8],
        sk: &mut [u8],
    ) -> Result<()> {
        check_key(pk.len(), pke_public_key_bytes(K))?;
        check_key(sk.len(), pke_secret_key_bytes(K))?;
        with_kernels!(self, B => indcpa::keypair::<K, ETA1, B>(seed, pk, sk));
        Ok(())
    }

    /// Encrypt `msg` under `pk` with explicit `coins`.
    pub fn pke_encrypt<
        const K: usize,
        const ETA1: usize,
        const ETA2: usize,
        const DU: usize,
        const DV: usize,
    >(
        &self,
        ct: &mut [u8],
        msg: &[u8; SYMBYTES],
        pk: &[u8],
        coins: &[u8; SYMBYTES],
    ) -> Result<()> {
        check_key(pk.len(), pke_public_key_bytes(K))?;
        check_ciphertext(ct.len(), ciphertext_bytes(K, DU, DV))?;
        with_kernels!(self, B => indcpa::encrypt::<K, ETA1, ETA2, DU, DV, B>(ct, msg, pk, coins));
        Ok(())
    }

    /// Decrypt `ct` with the primitive secret key `sk`.
    pub fn pke_decrypt<const K: usize, const DU: usize, const DV: usize>(
        &self,
        ct: &[u8],
        sk: &[u8],
    ) -> Result<Zeroizing<[u8; SYMBYTES]>> {
        check_key(sk.len(), pke_secret_key_bytes(K))?;
        check_ciphertext(ct.len(), ciphertext_bytes(K, DU, DV))?;
        Ok(with_kernels!(self, B => indcpa::decrypt::<K, DU, DV, B>(ct, sk)))
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}

pub(crate) fn check_key(actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::InvalidKeyLength { expected, actual })
    }
}

pub(crate) fn check_ciphertext(actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::InvalidCiphertextLength { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reference_always_available() {
        assert!(BackendKind::Reference.is_available());
        assert_eq!(
            Backend::new(BackendKind::Reference).unwrap(),
            Backend::reference()
        );
    }

    #[test]
    fn test_detect_is_available() {
        assert!(Backend::detect().kind().is_available());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("AVX2".parse::<BackendKind>().unwrap(), BackendKind::Avx2);
        assert_eq!("neon".parse::<BackendKind>().unwrap(), BackendKind::Neon);
        assert_eq!(
            "Reference".parse::<BackendKind>().unwrap(),
            BackendKind::Reference
        );
        assert_eq!(
            "sse9".parse::<BackendKind>(),
            Err(Error::InvalidConfiguration)
        );
    }

    #[test]
    fn test_override_values() {
        assert_eq!(Backend::from_override(None).unwrap(), Backend::detect());
        assert_eq!(Backend::from_override(Some("")).unwrap(), Backend::detect());
        assert_eq!(
            Backend::from_override(Some(" auto ")).unwrap(),
            Backend::detect()
        );
        assert_eq!(
            Backend::from_override(Some("reference")).unwrap(),
            Backend::reference()
        );
        assert_eq!(
            Backend::from_override(Some("fastest")),
            Err(Error::InvalidConfiguration)
        );
    }

    #[test]
    fn test_unavailable_backend_is_config_error() {
        // At most one of the two vector backends exists on any target.
        let missing = if cfg!(target_arch = "aarch64") {
            BackendKind::Avx2
        } else {
            BackendKind::Neon
        };
        assert_eq!(
            Backend::new(missing),
            Err(Error::BackendUnavailable {
                backend: missing.name()
            })
        );
        assert_eq!(
            Backend::from_override(Some(missing.name())),
            Err(Error::BackendUnavailable {
                backend: missing.name()
            })
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_selected_is_stable() {
        let first = Backend::selected();
        for _ in 0..4 {
            assert_eq!(Backend::selected(), first);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_selected_agrees_across_threads() {
        let results: Vec<Result<Backend>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(Backend::selected)).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| *r == results[0]));
        assert_eq!(Backend::selected(), results[0]);
    }

    #[test]
    fn test_primitive_length_checks() {
        let backend = Backend::reference();
        let mut pk = [0u8; 1184];
        let mut sk = [0u8; 100];
        assert_eq!(
            backend.pke_keypair_from_seed::<3, 2>(&[0u8; 32], &mut pk, &mut sk),
            Err(Error::InvalidKeyLength {
                expected: 1152,
                actual: 100
            })
        );

        let mut ct = [0u8; 10];
        assert_eq!(
            backend.pke_encrypt::<3, 2, 2, 10, 4>(&mut ct, &[0u8; 32], &pk, &[0u8; 32]),
            Err(Error::InvalidCiphertextLength {
                expected: 1088,
                actual: 10
            })
        );
    }

    #[test]
    fn test_primitive_roundtrip_every_backend() {
        let mut rng = StdRng::seed_from_u64(7);
        let reference = Backend::reference();
        let mut pk = [0u8; 1184];
        let mut sk = [0u8; 1152];
        reference
            .pke_keypair::<3, 2>(&mut rng, &mut pk, &mut sk)
            .unwrap();
        let msg = [0x3cu8; 32];
        let coins = [0x11u8; 32];
        let mut expected = [0u8; 1088];
        reference
            .pke_encrypt::<3, 2, 2, 10, 4>(&mut expected, &msg, &pk, &coins)
            .unwrap();

        let detected = Backend::detect();
        let mut ct = [0u8; 1088];
        detected
            .pke_encrypt::<3, 2, 2, 10, 4>(&mut ct, &msg, &pk, &coins)
            .unwrap();
        assert_eq!(ct, expected);
        assert_eq!(*detected.pke_decrypt::<3, 10, 4>(&ct, &sk).unwrap(), msg);
    }
}
