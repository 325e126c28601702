//! The public k x k matrix A and matrix-vector products.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::poly::Poly;
use crate::polyvec::PolyVec;
use crate::sample::sample_ntt_from_seed;

/// A k x k matrix of NTT-domain polynomials, stored row by row.
#[derive(Clone)]
pub struct Matrix {
    /// Rows of the matrix; each row holds k polynomials.
    pub rows: Vec<PolyVec>,
}

impl Matrix {
    /// Expand A (or its transpose) from the public seed.
    ///
    /// Entry A\[i\]\[j\] is SampleNTT(rho || j || i). With `transpose` set,
    /// entry (i, j) of the result is A\[j\]\[i\].
    pub fn sample(rho: &[u8; 32], k: usize, transpose: bool) -> Self {
        let rows = (0..k)
            .map(|i| {
                let polys = (0..k)
                    .map(|j| {
                        if transpose {
                            sample_ntt_from_seed(rho, j as u8, i as u8)
                        } else {
                            sample_ntt_from_seed(rho, i as u8, j as u8)
                        }
                    })
                    .collect();
                PolyVec { polys }
            })
            .collect();
        Self { rows }
    }

    /// Entry (i, j).
    pub fn entry(&self, i: usize, j: usize) -> &Poly {
        &self.rows[i].polys[j]
    }

    /// Product with an NTT-domain vector.
    ///
    /// Each output polynomial is reduced to [0, q-1] and carries the R^(-1)
    /// of base multiplication.
    pub fn mul_vec(&self, v: &PolyVec) -> PolyVec {
        PolyVec {
            polys: self.rows.iter().map(|row| row.inner_product(v)).collect(),
        }
    }
}
