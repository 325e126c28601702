//! FIPS 203 hash functions for ML-KEM.
//!
//! - H = SHA3-256: hash of the encapsulation key
//! - G = SHA3-512: seed and key derivation, split into two 32-byte halves
//! - J = SHAKE256 with 32-byte output: implicit rejection key
//! - XOF = SHAKE128: matrix sampling
//! - PRF = SHAKE256: noise sampling

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Digest, Sha3_256, Sha3_512, Shake128, Shake256,
};

/// SHAKE128 rate in bytes; the XOF is squeezed in multiples of this.
pub const XOF_BLOCK_BYTES: usize = 168;

/// H function: SHA3-256.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    Sha3_256::digest(input).into()
}

/// G function: SHA3-512 over the concatenation of `parts`.
///
/// Returns the two 32-byte halves of the digest:
/// - G(d || k) -> (rho, sigma) for K-PKE key generation
/// - G(m || H(ek)) -> (K, r) for encapsulation
#[inline]
pub fn hash_g(parts: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let digest = hasher.finalize();

    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    first.copy_from_slice(&digest[..32]);
    second.copy_from_slice(&digest[32..]);
    (first, second)
}

/// J function: SHAKE256(z || ciphertext) truncated to 32 bytes.
///
/// Derives the pseudorandom key returned when decapsulation rejects.
#[inline]
pub fn hash_j(z: &[u8; 32], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(ciphertext);
    let mut out = [0u8; 32];
    hasher.finalize_xof().read(&mut out);
    out
}

/// SHAKE128 stream used to sample one matrix entry.
pub struct Xof {
    reader: sha3::Shake128Reader,
}

impl Xof {
    /// Create the stream for entry A\[i\]\[j\].
    ///
    /// Absorbs rho || j || i, following the column-then-row byte order of
    /// FIPS 203.
    pub fn new(rho: &[u8; 32], i: u8, j: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[j, i]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Read the next `out.len()` bytes of the stream.
    #[inline]
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// PRF function: SHAKE256(sigma || nonce), filling `output`.
#[inline]
pub fn prf(sigma: &[u8; 32], nonce: u8, output: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(sigma);
    hasher.update(&[nonce]);
    hasher.finalize_xof().read(output);
}
