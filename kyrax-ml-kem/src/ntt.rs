//! Number Theoretic Transform (NTT) for ML-KEM.
//!
//! Forward and inverse NTT as specified in FIPS 203 (Algorithms 9 and 10),
//! plus the degree-one base multiplication used in the NTT domain.
//!
//! All operations are constant-time.

use crate::params::N;
use crate::poly::Poly;
use crate::reduce::{barrett_reduce, montgomery_mul, INV_N_MONT};

/// Precomputed zetas (twiddle factors) in Montgomery form.
///
/// These are the powers of the primitive 256th root of unity (zeta = 17)
/// in bit-reversed order, multiplied by R = 2^16 mod q.
///
/// zetas[i] = zeta^(brv(i)) * R mod q, where brv is 7-bit bit-reversal.
pub const ZETAS: [i16; 128] = [
    2285, 2571, 2970, 1812, 1493, 1422, 287, 202, 3158, 622, 1577, 182, 962, 2127, 1855, 1468, 573,
    2004, 264, 383, 2500, 1458, 1727, 3199, 2648, 1017, 732, 608, 1787, 411, 3124, 1758, 1223, 652,
    2777, 1015, 2036, 1491, 3047, 1785, 516, 3321, 3009, 2663, 1711, 2167, 126, 1469, 2476, 3239,
    3058, 830, 107, 1908, 3082, 2378, 2931, 961, 1821, 2604, 448, 2264, 677, 2054, 2226, 430, 555,
    843, 2078, 871, 1550, 105, 422, 587, 177, 3094, 3038, 2869, 1574, 1653, 3083, 778, 1159, 3182,
    2552, 1483, 2727, 1119, 1739, 644, 2457, 349, 418, 329, 3173, 3254, 817, 1097, 603, 610, 1322,
    2044, 1864, 384, 2114, 3193, 1218, 1994, 2455, 220, 2142, 1670, 2144, 1799, 2051, 794, 1819,
    2475, 2459, 478, 3221, 3021, 996, 991, 958, 1869, 1522, 1628,
];

/// Forward NTT: coefficient representation to NTT domain (bit-reversed order).
///
/// Uses the Cooley-Tukey butterfly with decimation-in-time. The output is
/// reduced to [0, q-1].
///
/// # Arguments
/// * `poly` - Polynomial to transform (modified in-place)
pub fn ntt(poly: &mut Poly) {
    let coeffs = &mut poly.coeffs;
    let mut k: usize = 1;
    let mut len: usize = N / 2;

    while len >= 2 {
        let mut start: usize = 0;
        while start < N {
            let zeta = ZETAS[k];
            k += 1;

            for j in start..(start + len) {
                let t = montgomery_mul(zeta, coeffs[j + len]);
                let u = coeffs[j];
                coeffs[j] = u + t;
                coeffs[j + len] = u - t;
            }
            start += 2 * len;
        }
        len >>= 1;
    }

    for c in coeffs.iter_mut() {
        *c = barrett_reduce(*c);
    }
}

/// Inverse NTT: NTT domain back to coefficient representation.
///
/// Uses the Gentleman-Sande butterfly with decimation-in-frequency. The final
/// scaling by 1441 undoes the 2^7 growth of the butterflies and multiplies by
/// R, which cancels the R^(-1) left by [`basemul`].
///
/// # Arguments
/// * `poly` - Polynomial in NTT domain to transform (modified in-place)
pub fn inv_ntt(poly: &mut Poly) {
    let coeffs = &mut poly.coeffs;
    let mut k: usize = N / 2;
    let mut len: usize = 2;

    while len <= N / 2 {
        let mut start: usize = 0;
        while start < N {
            k -= 1;
            let neg_zeta = -ZETAS[k];

            for j in start..(start + len) {
                let t = coeffs[j];
                let x = coeffs[j + len];
                coeffs[j] = barrett_reduce(t.wrapping_add(x));
                coeffs[j + len] = montgomery_mul(neg_zeta, t.wrapping_sub(x));
            }
            start += 2 * len;
        }
        len <<= 1;
    }

    for c in coeffs.iter_mut() {
        *c = montgomery_mul(*c, INV_N_MONT);
    }
}

/// Base multiplication for a single pair of coefficients in NTT domain.
///
/// Computes (a0 + a1*X)(b0 + b1*X) mod (X^2 - zeta), which gives:
/// result = (a0*b0 + a1*b1*zeta) + (a0*b1 + a1*b0)*X
///
/// Each term carries one factor of R^(-1).
///
/// # Arguments
/// * `r` - Output slice of length 2
/// * `a` - First input slice of length 2
/// * `b` - Second input slice of length 2
/// * `zeta` - The twiddle factor for this pair (Montgomery form)
#[inline]
pub fn basemul(r: &mut [i16], a: &[i16], b: &[i16], zeta: i16) {
    let t = montgomery_mul(a[1], b[1]);
    r[0] = montgomery_mul(t, zeta);
    r[0] += montgomery_mul(a[0], b[0]);

    r[1] = montgomery_mul(a[0], b[1]);
    r[1] += montgomery_mul(a[1], b[0]);
}
