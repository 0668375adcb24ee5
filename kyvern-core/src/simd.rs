//! CPU feature detection shared by the kernel crates.

/// Generate a `has_avx2() -> bool` function in the invoking module.
///
/// The function is compiled on x86_64 only. A build with
/// `target-feature=+avx2` answers `true` without a runtime check; otherwise
/// detection uses `is_x86_feature_detected!` when the invoking crate's `std`
/// feature is enabled, and reports `false` without it.
///
/// An optional visibility applies to the generated function (default `pub`).
///
/// # Example
///
/// ```ignore
/// kyvern_core::define_has_avx2!(pub(crate));
/// // has_avx2() is now available in this scope
/// ```
#[macro_export]
macro_rules! define_has_avx2 {
    () => {
        $crate::define_has_avx2!(pub);
    };
    ($vis:vis) => {
        /// Check if AVX2 is available at runtime (x86_64 only).
        #[cfg(target_arch = "x86_64")]
        #[inline]
        $vis fn has_avx2() -> bool {
            #[cfg(target_feature = "avx2")]
            {
                true
            }
            #[cfg(not(target_feature = "avx2"))]
            {
                #[cfg(feature = "std")]
                {
                    std::arch::is_x86_feature_detected!("avx2")
                }
                #[cfg(not(feature = "std"))]
                {
                    false
                }
            }
        }
    };
}
