//! Polynomial vector operations for ML-KEM.
//!
//! `PolyVec` holds the k polynomials of s, e, r, t or u, with k taken from
//! the parameter set at runtime.

#![allow(clippy::wrong_self_convention)]

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::encode::{poly_from_bytes, poly_to_bytes};
use crate::ntt::{inv_ntt, ntt};
use crate::params::POLY_BYTES;
use crate::poly::{
    poly_add_assign, poly_basemul_acc, poly_compress, poly_decompress, poly_reduce, Poly,
};
use zeroize::Zeroize;

/// A vector of k polynomials.
#[derive(Clone, Zeroize)]
pub struct PolyVec {
    /// The k polynomials in the vector.
    pub polys: Vec<Poly>,
}

impl PolyVec {
    /// Number of polynomials.
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// Apply forward NTT to all polynomials in the vector.
    pub fn ntt(&mut self) {
        for poly in &mut self.polys {
            ntt(poly);
        }
    }

    /// Apply inverse NTT to all polynomials in the vector.
    pub fn inv_ntt(&mut self) {
        for poly in &mut self.polys {
            inv_ntt(poly);
        }
    }

    /// Reduce all coefficients to [0, q-1].
    pub fn reduce(&mut self) {
        for poly in &mut self.polys {
            poly_reduce(poly);
        }
    }

    /// Add another vector of the same length to self in place.
    pub fn add_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.len(), other.len());
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            poly_add_assign(a, b);
        }
    }

    /// Inner product of two NTT-domain vectors, reduced to [0, q-1].
    ///
    /// The result carries the R^(-1) of base multiplication.
    pub fn inner_product(&self, other: &Self) -> Poly {
        debug_assert_eq!(self.len(), other.len());
        let mut result = Poly::new();
        for (a, b) in self.polys.iter().zip(&other.polys) {
            poly_basemul_acc(&mut result, a, b);
        }
        poly_reduce(&mut result);
        result
    }

    /// Encode with 12 bits per coefficient (k * 384 bytes).
    ///
    /// All coefficients must be canonical.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.len() * POLY_BYTES];
        for (poly, chunk) in self.polys.iter().zip(bytes.chunks_exact_mut(POLY_BYTES)) {
            chunk.copy_from_slice(&poly_to_bytes(poly));
        }
        bytes
    }

    /// Decode `k` polynomials from their 12-bit encoding.
    ///
    /// `bytes` must hold at least k * 384 bytes.
    pub fn from_bytes(bytes: &[u8], k: usize) -> Self {
        Self {
            polys: bytes
                .chunks_exact(POLY_BYTES)
                .take(k)
                .map(poly_from_bytes)
                .collect(),
        }
    }

    /// Compress every polynomial to `d` bits per coefficient (k * 32 * d bytes).
    pub fn compress(&self, d: usize) -> Vec<u8> {
        let bytes_per_poly = 32 * d;
        let mut bytes = vec![0u8; self.len() * bytes_per_poly];
        for (poly, chunk) in self.polys.iter().zip(bytes.chunks_exact_mut(bytes_per_poly)) {
            poly_compress(poly, d, chunk);
        }
        bytes
    }

    /// Decompress `k` polynomials of `d` bits per coefficient.
    pub fn decompress(bytes: &[u8], k: usize, d: usize) -> Self {
        Self {
            polys: bytes
                .chunks_exact(32 * d)
                .take(k)
                .map(|chunk| poly_decompress(chunk, d))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{N, Q};

    fn sample_vec(k: usize, seed: usize) -> PolyVec {
        let mut pv = PolyVec {
            polys: vec![Poly::new(); k],
        };
        for (i, poly) in pv.polys.iter_mut().enumerate() {
            for (j, c) in poly.coeffs.iter_mut().enumerate() {
                *c = (((i * N + j) * 13 + seed * 101) % Q as usize) as i16;
            }
        }
        pv
    }

    #[test]
    fn test_polyvec_zeroize() {
        let mut pv = sample_vec(3, 7);
        pv.zeroize();
        // Vec zeroization wipes the elements and then clears the vector
        assert!(pv.polys.is_empty());
    }

    #[test]
    fn test_polyvec_add_assign() {
        let mut pv1 = sample_vec(2, 0);
        let pv2 = sample_vec(2, 1);
        let expected: Vec<[i16; N]> = pv1
            .polys
            .iter()
            .zip(&pv2.polys)
            .map(|(a, b)| core::array::from_fn(|j| a.coeffs[j] + b.coeffs[j]))
            .collect();

        pv1.add_assign(&pv2);
        for (poly, want) in pv1.polys.iter().zip(&expected) {
            assert_eq!(&poly.coeffs, want);
        }
    }

    #[test]
    fn test_polyvec_to_bytes_from_bytes_roundtrip() {
        for k in [2usize, 3, 4] {
            let pv = sample_vec(k, 7);
            let bytes = pv.to_bytes();
            assert_eq!(bytes.len(), k * POLY_BYTES);

            let recovered = PolyVec::from_bytes(&bytes, k);
            assert_eq!(recovered.len(), k);
            for (a, b) in pv.polys.iter().zip(&recovered.polys) {
                assert_eq!(a.coeffs, b.coeffs);
            }
        }
    }

    #[test]
    fn test_polyvec_compress_decompress() {
        let pv = sample_vec(4, 3);
        for d in [10usize, 11] {
            let compressed = pv.compress(d);
            assert_eq!(compressed.len(), 4 * 32 * d);

            let decompressed = PolyVec::decompress(&compressed, 4, d);
            let max_error = ((Q as i32) + (1 << d)) >> (d + 1);
            for (a, b) in pv.polys.iter().zip(&decompressed.polys) {
                for j in 0..N {
                    let diff = (a.coeffs[j] as i32 - b.coeffs[j] as i32).rem_euclid(Q as i32);
                    assert!(diff.min(Q as i32 - diff) <= max_error);
                }
            }
        }
    }

    #[test]
    fn test_polyvec_ntt_roundtrip() {
        let original = sample_vec(2, 5);
        let mut pv = original.clone();
        pv.ntt();
        pv.inv_ntt();
        pv.reduce();
        // inv_ntt leaves a factor of R = 2^16 mod q = 2285
        for (a, b) in original.polys.iter().zip(&pv.polys) {
            for j in 0..N {
                let expected = (a.coeffs[j] as i32 * 2285).rem_euclid(Q as i32) as i16;
                assert_eq!(b.coeffs[j], expected);
            }
        }
    }

    #[test]
    fn test_inner_product_is_canonical() {
        let mut a = sample_vec(3, 1);
        let mut b = sample_vec(3, 2);
        a.ntt();
        b.ntt();
        let r = a.inner_product(&b);
        assert!(r.coeffs.iter().all(|&c| (0..Q as i16).contains(&c)));
    }
}
