//! Sampling functions for ML-KEM.
//!
//! - FIPS 203 Algorithm 7 (SampleNTT): uniform polynomials from the XOF,
//!   used for the public matrix.
//! - FIPS 203 Algorithm 8 (SamplePolyCBD): centered binomial noise from PRF
//!   output, used for secrets and errors.

use crate::hash::{prf, Xof, XOF_BLOCK_BYTES};
use crate::params::{N, Q};
use crate::poly::Poly;
use zeroize::Zeroize;

/// Bytes squeezed before the first rejection pass (three SHAKE128 blocks).
///
/// Enough for 256 accepted coefficients in the vast majority of cases.
pub const SAMPLE_NTT_INITIAL_BYTES: usize = 3 * XOF_BLOCK_BYTES;

/// Largest eta in any parameter set.
const MAX_ETA: usize = 3;

/// Parse 12-bit candidates from `buf` and keep those below q.
///
/// Resumes at `filled` and returns the new fill count. Stops early once all
/// 256 coefficients are set.
fn rej_uniform(coeffs: &mut [i16; N], mut filled: usize, buf: &[u8]) -> usize {
    for chunk in buf.chunks_exact(3) {
        if filled >= N {
            break;
        }

        let d1 = (chunk[0] as u16) | (((chunk[1] as u16) & 0x0F) << 8);
        let d2 = ((chunk[1] as u16) >> 4) | ((chunk[2] as u16) << 4);

        if d1 < Q {
            coeffs[filled] = d1 as i16;
            filled += 1;
        }
        if filled < N && d2 < Q {
            coeffs[filled] = d2 as i16;
            filled += 1;
        }
    }
    filled
}

/// Rejection-sample one NTT-domain polynomial, returning it together with
/// the number of extra 168-byte blocks squeezed past the initial 504 bytes.
pub(crate) fn sample_ntt_with_extra_blocks(xof: &mut Xof) -> (Poly, usize) {
    let mut poly = Poly::new();

    let mut buf = [0u8; SAMPLE_NTT_INITIAL_BYTES];
    xof.squeeze(&mut buf);
    let mut filled = rej_uniform(&mut poly.coeffs, 0, &buf);

    let mut extra_blocks = 0;
    let mut block = [0u8; XOF_BLOCK_BYTES];
    while filled < N {
        xof.squeeze(&mut block);
        filled = rej_uniform(&mut poly.coeffs, filled, &block);
        extra_blocks += 1;
    }

    (poly, extra_blocks)
}

/// Sample a polynomial in NTT domain from XOF output (FIPS 203 Algorithm 7).
///
/// Byte triples are read as two 12-bit candidates and values >= q are
/// rejected. The XOF is read as one continuous stream: an initial 504
/// bytes, then further 168-byte blocks until all 256 coefficients are
/// accepted. Coefficients lie in [0, q-1].
pub fn sample_ntt(xof: &mut Xof) -> Poly {
    let (poly, extra_blocks) = sample_ntt_with_extra_blocks(xof);
    if extra_blocks > 0 {
        tracing::trace!(extra_blocks, "rejection sampling squeezed additional XOF blocks");
    }
    poly
}

/// Sample matrix entry A\[i\]\[j\] from the public seed.
pub fn sample_ntt_from_seed(rho: &[u8; 32], i: u8, j: u8) -> Poly {
    let mut xof = Xof::new(rho, i, j);
    sample_ntt(&mut xof)
}

/// Sample a polynomial from the centered binomial distribution.
///
/// `bytes` must hold at least 64*eta bytes. Each coefficient is the
/// difference of two sums of eta bits and lies in [-eta, eta].
pub fn poly_cbd(eta: usize, bytes: &[u8]) -> Poly {
    debug_assert!(eta == 2 || eta == 3);
    debug_assert!(bytes.len() >= 64 * eta);

    let mut poly = Poly::new();
    match eta {
        3 => poly_cbd3(&mut poly, bytes),
        _ => poly_cbd2(&mut poly, bytes),
    }
    poly
}

/// eta = 2: eight coefficients per 32-bit little-endian word.
fn poly_cbd2(poly: &mut Poly, bytes: &[u8]) {
    for (i, chunk) in bytes[..128].chunks_exact(4).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);

        for j in 0..8 {
            let a = ((d >> (4 * j)) & 0x3) as i16;
            let b = ((d >> (4 * j + 2)) & 0x3) as i16;
            poly.coeffs[8 * i + j] = a - b;
        }
    }
}

/// eta = 3: four coefficients per 24-bit little-endian word.
fn poly_cbd3(poly: &mut Poly, bytes: &[u8]) {
    for (i, chunk) in bytes[..192].chunks_exact(3).enumerate() {
        let t = (chunk[0] as u32) | ((chunk[1] as u32) << 8) | ((chunk[2] as u32) << 16);
        let d = (t & 0x24_9249) + ((t >> 1) & 0x24_9249) + ((t >> 2) & 0x24_9249);

        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            poly.coeffs[4 * i + j] = a - b;
        }
    }
}

/// SamplePolyCBD_eta(PRF_eta(sigma, nonce)).
pub fn sample_noise(eta: usize, sigma: &[u8; 32], nonce: u8) -> Poly {
    let mut buf = [0u8; 64 * MAX_ETA];
    let bytes = &mut buf[..64 * eta];
    prf(sigma, nonce, bytes);
    let poly = poly_cbd(eta, bytes);
    buf.zeroize();
    poly
}
