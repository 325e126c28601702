//! K-PKE: IND-CPA-secure public-key encryption (FIPS 203 Algorithms 13-15).
//!
//! The deterministic engine under ML-KEM. All randomness arrives as seeds;
//! the Fujisaki-Okamoto wrapper in [`crate::kem`] supplies them.
//!
//! Domain bookkeeping: `ntt` output is canonical, base multiplication leaves
//! a factor R^(-1), and `inv_ntt` multiplies by R. Products that go back
//! through `inv_ntt` therefore need no correction; only t = A*s, which stays
//! in the NTT domain, is lifted with `to_mont`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::encode::{encoding_is_canonical, msg_to_poly, poly_to_msg};
use crate::hash::hash_g;
use crate::matrix::Matrix;
use crate::ntt::inv_ntt;
use crate::params::{ParameterSet, SYM_BYTES};
use crate::poly::{
    poly_add_assign, poly_compress, poly_decompress, poly_reduce, poly_sub_assign, poly_to_mont,
};
use crate::polyvec::PolyVec;
use crate::sample::sample_noise;
use kyrax_core::{Error, Result};
use zeroize::Zeroize;

/// Sample k noise polynomials with consecutive nonces starting at `first_nonce`.
fn sample_noise_vec(eta: usize, seed: &[u8; 32], k: usize, first_nonce: usize) -> PolyVec {
    PolyVec {
        polys: (0..k)
            .map(|i| sample_noise(eta, seed, (first_nonce + i) as u8))
            .collect(),
    }
}

/// K-PKE Key Generation (FIPS 203 Algorithm 13).
///
/// Returns `(ek_pke, dk_pke)` where `ek_pke = encode(t) || rho`
/// (k*384 + 32 bytes) and `dk_pke = encode(s)` (k*384 bytes).
pub fn k_pke_keygen(params: &ParameterSet, d: &[u8; 32]) -> (Vec<u8>, Vec<u8>) {
    let k = params.k();

    // 1. (rho, sigma) = G(d || k)
    let (rho, mut sigma) = hash_g(&[&d[..], &[k as u8]]);

    // 2. A in NTT domain
    let a = Matrix::sample(&rho, k, false);

    // 3. s and e from CBD_eta1, nonces 0..k and k..2k
    let mut s = sample_noise_vec(params.eta1(), &sigma, k, 0);
    let mut e = sample_noise_vec(params.eta1(), &sigma, k, k);
    sigma.zeroize();

    // 4. Both into the NTT domain (output canonical)
    s.ntt();
    e.ntt();

    // 5. t = A*s + e, lifting A*s out of its R^(-1)
    let mut t = a.mul_vec(&s);
    for poly in &mut t.polys {
        poly_to_mont(poly);
    }
    t.add_assign(&e);
    t.reduce();

    // 6. ek_pke = encode(t) || rho, dk_pke = encode(s)
    let mut ek_pke = t.to_bytes();
    ek_pke.extend_from_slice(&rho);
    let dk_pke = s.to_bytes();

    s.zeroize();
    e.zeroize();

    (ek_pke, dk_pke)
}

/// K-PKE Encryption (FIPS 203 Algorithm 14).
///
/// `ek_pke` must be k*384 + 32 bytes. Fails with
/// [`Error::InvalidEncapsulationKey`] when the encoded t is not canonical,
/// that is when decoding and re-encoding does not reproduce it.
pub fn k_pke_encrypt(
    params: &ParameterSet,
    ek_pke: &[u8],
    m: &[u8; 32],
    coins: &[u8; 32],
) -> Result<Vec<u8>> {
    let k = params.k();
    let t_len = params.poly_vec_bytes();
    debug_assert_eq!(ek_pke.len(), params.encapsulation_key_size());

    // 1. Parse and check ek_pke = encode(t) || rho
    let t_bytes = &ek_pke[..t_len];
    if !bool::from(encoding_is_canonical(t_bytes)) {
        return Err(Error::InvalidEncapsulationKey);
    }
    let t = PolyVec::from_bytes(t_bytes, k);
    let mut rho = [0u8; SYM_BYTES];
    rho.copy_from_slice(&ek_pke[t_len..t_len + SYM_BYTES]);

    // 2. A^T in NTT domain
    let a_t = Matrix::sample(&rho, k, true);

    // 3. r from CBD_eta1, e1 and e2 from CBD_eta2, nonces 0..2k+1
    let mut r = sample_noise_vec(params.eta1(), coins, k, 0);
    let mut e1 = sample_noise_vec(params.eta2(), coins, k, k);
    let mut e2 = sample_noise(params.eta2(), coins, (2 * k) as u8);

    // 4. r into the NTT domain
    r.ntt();

    // 5. u = NTT^-1(A^T * r) + e1
    let mut u = a_t.mul_vec(&r);
    u.inv_ntt();
    u.add_assign(&e1);
    u.reduce();

    // 6. v = NTT^-1(t . r) + e2 + Decompress_1(m)
    let mut v = t.inner_product(&r);
    inv_ntt(&mut v);
    poly_add_assign(&mut v, &e2);
    let mut mu = msg_to_poly(m);
    poly_add_assign(&mut v, &mu);
    poly_reduce(&mut v);

    // 7. c = Compress_du(u) || Compress_dv(v)
    let mut ciphertext = u.compress(params.du());
    let c1_len = ciphertext.len();
    ciphertext.resize(c1_len + params.compressed_v_size(), 0);
    poly_compress(&v, params.dv(), &mut ciphertext[c1_len..]);

    r.zeroize();
    e1.zeroize();
    e2.zeroize();
    mu.zeroize();

    Ok(ciphertext)
}

/// K-PKE Decryption (FIPS 203 Algorithm 15).
///
/// `dk_pke` must be k*384 bytes and `c` a full ciphertext.
pub fn k_pke_decrypt(params: &ParameterSet, dk_pke: &[u8], c: &[u8]) -> [u8; 32] {
    let k = params.k();
    let c1_len = params.compressed_u_size();
    debug_assert_eq!(c.len(), params.ciphertext_size());

    // 1. u = Decompress_du(c1), v = Decompress_dv(c2)
    let mut u = PolyVec::decompress(&c[..c1_len], k, params.du());
    let v = poly_decompress(&c[c1_len..], params.dv());

    // 2. s = decode(dk_pke)
    let mut s = PolyVec::from_bytes(dk_pke, k);

    // 3. w = v - NTT^-1(s . NTT(u))
    u.ntt();
    let mut s_u = s.inner_product(&u);
    inv_ntt(&mut s_u);

    let mut w = v;
    poly_sub_assign(&mut w, &s_u);
    poly_reduce(&mut w);

    // 4. m = Compress_1(w)
    let m = poly_to_msg(&w);

    s.zeroize();
    s_u.zeroize();
    w.zeroize();

    m
}
