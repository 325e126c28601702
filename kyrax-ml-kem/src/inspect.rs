//! Structural view of an encapsulation key.
//!
//! Decodes `ek = ByteEncode12(t) || rho` into its coefficient vectors and
//! expands the public matrix A from rho. Used by tooling to look inside a
//! key; none of it is needed for encapsulation.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::encode::{encoding_is_canonical, poly_from_bytes};
use crate::hash::hash_h;
use crate::matrix::Matrix;
use crate::params::{ParameterSet, N, POLY_BYTES, SYM_BYTES};
use core::fmt;
use kyrax_core::{Error, Result};

/// Number of leading coefficients shown per polynomial by `Display`.
const PREVIEW_COEFFS: usize = 8;

/// Decoded contents of an encapsulation key.
#[derive(Clone)]
pub struct KeyInspection {
    params: ParameterSet,
    t: Vec<[i16; N]>,
    rho: [u8; SYM_BYTES],
    ek_hash: [u8; 32],
    canonical: bool,
    matrix: Matrix,
}

impl KeyInspection {
    /// Decode `ek` for `params`.
    ///
    /// Fails only on a length mismatch. A key whose t holds values >= q is
    /// still decoded (reduced mod q) and reported through
    /// [`KeyInspection::is_canonical`].
    pub fn new(params: ParameterSet, ek: &[u8]) -> Result<Self> {
        let expected = params.encapsulation_key_size();
        if ek.len() != expected {
            return Err(Error::InvalidKeyLength {
                expected,
                actual: ek.len(),
            });
        }

        let (t_bytes, rho_bytes) = ek.split_at(params.poly_vec_bytes());
        let t = t_bytes
            .chunks_exact(POLY_BYTES)
            .map(|chunk| poly_from_bytes(chunk).coeffs)
            .collect();
        let mut rho = [0u8; SYM_BYTES];
        rho.copy_from_slice(rho_bytes);

        Ok(Self {
            params,
            t,
            rho,
            ek_hash: hash_h(ek),
            canonical: encoding_is_canonical(t_bytes).into(),
            matrix: Matrix::sample(&rho, params.k(), false),
        })
    }

    /// Parameter set the key was decoded for.
    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// The k polynomials of t (NTT domain).
    pub fn t(&self) -> &[[i16; N]] {
        &self.t
    }

    /// Public matrix seed.
    pub fn rho(&self) -> &[u8; SYM_BYTES] {
        &self.rho
    }

    /// H(ek), as stored in the matching decapsulation key.
    pub fn ek_hash(&self) -> &[u8; 32] {
        &self.ek_hash
    }

    /// Whether every encoded coefficient of t was below q.
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    /// Entry A\[i\]\[j\] of the public matrix (NTT domain).
    ///
    /// # Panics
    /// If `i` or `j` is not below k.
    pub fn matrix_entry(&self, i: usize, j: usize) -> &[i16; N] {
        &self.matrix.entry(i, j).coeffs
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}

fn write_preview(
    f: &mut fmt::Formatter<'_>,
    label: fmt::Arguments<'_>,
    coeffs: &[i16; N],
) -> fmt::Result {
    write!(f, "{}: [", label)?;
    for (i, c) in coeffs[..PREVIEW_COEFFS].iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", c)?;
    }
    writeln!(f, ", ...]")
}

impl fmt::Display for KeyInspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "parameter set: {}", self.params)?;
        writeln!(
            f,
            "k: {}  du: {}  dv: {}  eta1: {}  eta2: {}",
            self.params.k(),
            self.params.du(),
            self.params.dv(),
            self.params.eta1(),
            self.params.eta2()
        )?;
        f.write_str("rho: ")?;
        write_hex(f, &self.rho)?;
        f.write_str("\nH(ek): ")?;
        write_hex(f, &self.ek_hash)?;
        writeln!(f)?;
        writeln!(f, "canonical: {}", self.canonical)?;
        for (i, poly) in self.t.iter().enumerate() {
            write_preview(f, format_args!("t[{}]", i), poly)?;
        }
        for i in 0..self.params.k() {
            for j in 0..self.params.k() {
                write_preview(f, format_args!("A[{}][{}]", i, j), self.matrix_entry(i, j))?;
            }
        }
        Ok(())
    }
}
