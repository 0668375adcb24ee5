//! Constant-time comparison and conditional overwrite.
//!
//! Both functions run in time that depends only on the slice lengths, never
//! on their contents. The returned / consumed [`Choice`] uses the convention
//! of the decapsulation path: `1` means *fail* (the buffers differ), `0`
//! means they are equal.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Compare two byte strings, returning a fail flag.
///
/// Returns `Choice(0)` when `a == b`, `Choice(1)` otherwise. Slices of
/// different lengths always compare as failing; the length itself is not
/// secret.
#[inline]
pub fn ct_compare(a: &[u8], b: &[u8]) -> Choice {
    if a.len() != b.len() {
        return Choice::from(1);
    }
    !a.ct_eq(b)
}

/// Overwrite `dst` with `src` when `fail` is set, leave it untouched
/// otherwise.
///
/// Every byte of `dst` is written on both paths. If the lengths differ only
/// the common prefix is processed.
#[inline]
pub fn ct_select(dst: &mut [u8], src: &[u8], fail: Choice) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, fail);
    }
}
