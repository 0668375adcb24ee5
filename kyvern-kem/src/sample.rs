//! Uniform and centered-binomial sampling.

use zeroize::Zeroizing;

use crate::hash::{prf, Xof};
use crate::params::{N, Q, SYMBYTES};
use crate::poly::Poly;

/// SHAKE128 rate in bytes.
const XOF_BLOCK_BYTES: usize = 168;

/// Largest noise buffer: eta = 3 needs 3 * 256 / 4 bytes.
const MAX_NOISE_BYTES: usize = 192;

/// Accept 12-bit candidates below q from `buf` into `coeffs[filled..]`.
/// Returns the new fill count.
fn rej_uniform(coeffs: &mut [i16; N], mut filled: usize, buf: &[u8]) -> usize {
    for chunk in buf.chunks_exact(3) {
        if filled == N {
            break;
        }
        let d1 = u16::from(chunk[0]) | (u16::from(chunk[1] & 0x0f) << 8);
        let d2 = u16::from(chunk[1] >> 4) | (u16::from(chunk[2]) << 4);
        if d1 < Q as u16 {
            coeffs[filled] = d1 as i16;
            filled += 1;
        }
        if filled < N && d2 < Q as u16 {
            coeffs[filled] = d2 as i16;
            filled += 1;
        }
    }
    filled
}

/// Sample a uniform polynomial (already in the NTT domain) from
/// SHAKE128(`rho || x || y`).
pub fn sample_uniform(rho: &[u8; SYMBYTES], x: u8, y: u8) -> Poly {
    let mut xof = Xof::new(rho, x, y);
    let mut poly = Poly::default();
    let mut block = [0u8; XOF_BLOCK_BYTES];
    let mut filled = 0;
    while filled < N {
        xof.squeeze(&mut block);
        filled = rej_uniform(&mut poly.coeffs, filled, &block);
    }
    poly
}

fn cbd2(buf: &[u8], poly: &mut Poly) {
    for (i, chunk) in buf.chunks_exact(4).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            poly.coeffs[8 * i + j] = a - b;
        }
    }
}

fn cbd3(buf: &[u8], poly: &mut Poly) {
    for (i, chunk) in buf.chunks_exact(3).enumerate() {
        let t = u32::from(chunk[0]) | (u32::from(chunk[1]) << 8) | (u32::from(chunk[2]) << 16);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            poly.coeffs[4 * i + j] = a - b;
        }
    }
}

/// Fill `poly` with noise from CBD_eta over PRF(`sigma`, `nonce`).
///
/// Every coefficient is overwritten.
pub fn sample_noise<const ETA: usize>(poly: &mut Poly, sigma: &[u8; SYMBYTES], nonce: u8) {
    let len = ETA * N / 4;
    let mut buf = Zeroizing::new([0u8; MAX_NOISE_BYTES]);
    prf(sigma, nonce, &mut buf[..len]);
    debug_assert!(ETA == 2 || ETA == 3);
    if ETA == 2 {
        cbd2(&buf[..len], poly);
    } else {
        cbd3(&buf[..len], poly);
    }
}
