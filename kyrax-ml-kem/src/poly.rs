//! Polynomial operations for ML-KEM.
//!
//! This module provides the `Poly` struct representing polynomials in the ring
//! R_q = Z_q\[X\]/(X^256 + 1), along with arithmetic and lossy compression as
//! specified in FIPS 203.
//!
//! Whether a `Poly` holds standard coefficients or NTT-domain values is
//! tracked by the caller; nothing here mixes the two.

#![allow(clippy::needless_range_loop)]

use crate::encode::{byte_decode, byte_encode};
use crate::ntt::{basemul, ZETAS};
use crate::params::{N, Q};
use crate::reduce::{barrett_reduce, to_mont};
use zeroize::Zeroize;

/// A polynomial in R_q = Z_q\[X\]/(X^256 + 1).
///
/// Coefficients are stored as `i16` and may leave [0, q-1] between
/// reductions. They must be canonical before serialization.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// 256 coefficients of the polynomial.
    pub coeffs: [i16; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self { coeffs: [0i16; N] }
    }
}

impl Poly {
    /// Create a new zero polynomial.
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Polynomial Arithmetic
// ============================================================================

/// Add polynomial `b` to `a` in place. No reduction.
pub fn poly_add_assign(a: &mut Poly, b: &Poly) {
    for i in 0..N {
        a.coeffs[i] += b.coeffs[i];
    }
}

/// Subtract polynomial `b` from `a` in place. No reduction.
pub fn poly_sub_assign(a: &mut Poly, b: &Poly) {
    for i in 0..N {
        a.coeffs[i] -= b.coeffs[i];
    }
}

/// Multiply two polynomials in NTT domain (point-wise base multiplication).
///
/// The result carries a factor R^(-1).
#[cfg(test)]
pub fn poly_basemul(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    poly_basemul_acc(&mut r, a, b);
    r
}

/// Accumulate product into result: r += a * b (in NTT domain).
///
/// 64 pairs of degree-one products, each pair using +zeta and -zeta.
pub fn poly_basemul_acc(r: &mut Poly, a: &Poly, b: &Poly) {
    for i in 0..64 {
        let zeta = ZETAS[64 + i];
        let mut tmp = [0i16; 2];

        basemul(
            &mut tmp,
            &a.coeffs[4 * i..4 * i + 2],
            &b.coeffs[4 * i..4 * i + 2],
            zeta,
        );
        r.coeffs[4 * i] += tmp[0];
        r.coeffs[4 * i + 1] += tmp[1];

        basemul(
            &mut tmp,
            &a.coeffs[4 * i + 2..4 * i + 4],
            &b.coeffs[4 * i + 2..4 * i + 4],
            -zeta,
        );
        r.coeffs[4 * i + 2] += tmp[0];
        r.coeffs[4 * i + 3] += tmp[1];
    }
}

/// Reduce all coefficients to canonical form [0, q-1].
pub fn poly_reduce(poly: &mut Poly) {
    for c in poly.coeffs.iter_mut() {
        *c = barrett_reduce(*c);
    }
}

/// Multiply every coefficient by R, restoring the factor dropped by base multiplication.
pub fn poly_to_mont(poly: &mut Poly) {
    for c in poly.coeffs.iter_mut() {
        *c = to_mont(*c);
    }
}

// ============================================================================
// Compression and Decompression (FIPS 203 Compress_d / Decompress_d)
// ============================================================================

/// Compress a single canonical coefficient to `d` bits.
///
/// Computes round(2^d / q * x) mod 2^d.
#[inline]
pub fn compress(x: i16, d: u32) -> u16 {
    let x = x as u32;
    let shifted = (x << d) + (Q as u32 / 2);
    let result = shifted / (Q as u32);
    (result & ((1 << d) - 1)) as u16
}

/// Decompress a single `d`-bit value.
///
/// Computes round(q / 2^d * y), which lies in [0, q-1].
#[inline]
pub fn decompress(y: u16, d: u32) -> i16 {
    let y = y as u32;
    let result = ((y * (Q as u32)) + (1 << (d - 1))) >> d;
    result as i16
}

/// Compress a canonical polynomial to `d` bits per coefficient and pack it
/// into `out` (32*d bytes).
pub fn poly_compress(poly: &Poly, d: usize, out: &mut [u8]) {
    let mut t = Poly::new();
    for i in 0..N {
        t.coeffs[i] = compress(poly.coeffs[i], d as u32) as i16;
    }
    byte_encode(&t, d, out);
}

/// Unpack 32*d bytes and decompress them into a polynomial.
pub fn poly_decompress(bytes: &[u8], d: usize) -> Poly {
    let mut poly = byte_decode(bytes, d);
    for c in poly.coeffs.iter_mut() {
        *c = decompress(*c as u16, d as u32);
    }
    poly
}
