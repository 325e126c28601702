//! ML-KEM Key Encapsulation Mechanism (FIPS 203 Algorithms 16-18).
//!
//! The Fujisaki-Okamoto transform with implicit rejection, built on
//! [`crate::k_pke`]. [`MlKem`] binds a parameter set to a random number
//! generator and exposes the four KEM operations.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::hash::{hash_g, hash_h, hash_j};
use crate::k_pke::{k_pke_decrypt, k_pke_encrypt, k_pke_keygen};
use crate::params::{ParameterSet, KEYPAIR_SEED_SIZE, MESSAGE_SIZE, SYM_BYTES};
use crate::types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedSecret};
use kyrax_core::{Error, Result};
use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// ML-KEM Key Generation (FIPS 203 Algorithm 16, deterministic part).
///
/// Returns `(ek, dk)` with `dk = dk_pke || ek || H(ek) || z`.
pub(crate) fn ml_kem_keygen_internal(
    params: &ParameterSet,
    d: &[u8; 32],
    z: &[u8; 32],
) -> (Vec<u8>, Vec<u8>) {
    let (ek, mut dk_pke) = k_pke_keygen(params, d);
    let h_ek = hash_h(&ek);

    let mut dk = Vec::with_capacity(params.decapsulation_key_size());
    dk.extend_from_slice(&dk_pke);
    dk.extend_from_slice(&ek);
    dk.extend_from_slice(&h_ek);
    dk.extend_from_slice(z);
    dk_pke.zeroize();

    (ek, dk)
}

/// ML-KEM Encapsulation (FIPS 203 Algorithm 17, deterministic part).
///
/// # Errors
/// - [`Error::InvalidKeyLength`] if `ek` is not 384k + 32 bytes.
/// - [`Error::InvalidEncapsulationKey`] if a coefficient of t is >= q.
pub(crate) fn ml_kem_encaps_internal(
    params: &ParameterSet,
    ek: &[u8],
    m: &[u8; 32],
) -> Result<(Vec<u8>, [u8; 32])> {
    let expected = params.encapsulation_key_size();
    if ek.len() != expected {
        return Err(Error::InvalidKeyLength {
            expected,
            actual: ek.len(),
        });
    }

    // 1. (K, r) = G(m || H(ek))
    let h = hash_h(ek);
    let (shared_secret, mut r) = hash_g(&[&m[..], &h[..]]);

    // 2. c = K-PKE.Encrypt(ek, m, r), which also checks ek
    let c = k_pke_encrypt(params, ek, m, &r);
    r.zeroize();

    Ok((c?, shared_secret))
}

/// ML-KEM Decapsulation (FIPS 203 Algorithm 18).
///
/// A ciphertext that does not re-encrypt to itself yields the implicit
/// rejection key J(z || c) instead of an error. Both candidate keys are
/// always computed and the choice is made in constant time.
///
/// # Errors
/// - [`Error::InvalidCiphertextLength`] if `c` is not 32(k*du + dv) bytes.
/// - [`Error::InvalidKeyLength`] if `dk` is not 768k + 96 bytes.
/// - [`Error::InvalidEncapsulationKey`] if the key embedded in `dk` is malformed.
pub(crate) fn ml_kem_decaps_internal(
    params: &ParameterSet,
    dk: &[u8],
    c: &[u8],
) -> Result<[u8; 32]> {
    let expected_c = params.ciphertext_size();
    if c.len() != expected_c {
        return Err(Error::InvalidCiphertextLength {
            expected: expected_c,
            actual: c.len(),
        });
    }
    let expected_dk = params.decapsulation_key_size();
    if dk.len() != expected_dk {
        return Err(Error::InvalidKeyLength {
            expected: expected_dk,
            actual: dk.len(),
        });
    }

    // Parse dk = dk_pke || ek || h || z
    let (dk_pke, rest) = dk.split_at(params.poly_vec_bytes());
    let (ek, rest) = rest.split_at(params.encapsulation_key_size());
    let (h, z_bytes) = rest.split_at(SYM_BYTES);
    let mut z = [0u8; SYM_BYTES];
    z.copy_from_slice(z_bytes);

    // 1. m' = K-PKE.Decrypt(dk_pke, c)
    let mut m_prime = k_pke_decrypt(params, dk_pke, c);

    // 2. (K', r') = G(m' || h)
    let (mut k_prime, mut r_prime) = hash_g(&[&m_prime[..], h]);

    // 3. K_bar = J(z || c)
    let mut k_bar = hash_j(&z, c);
    z.zeroize();

    // 4. c' = K-PKE.Encrypt(ek, m', r')
    let c_prime = k_pke_encrypt(params, ek, &m_prime, &r_prime);
    m_prime.zeroize();
    r_prime.zeroize();
    let c_prime = c_prime?;

    // 5. K' if c == c', else K_bar
    let ciphertexts_equal = c.ct_eq(&c_prime[..]);
    let mut result = [0u8; 32];
    for i in 0..32 {
        result[i] = u8::conditional_select(&k_bar[i], &k_prime[i], ciphertexts_equal);
    }
    k_prime.zeroize();
    k_bar.zeroize();

    Ok(result)
}

/// Split a 64-byte seed into `d || z` and derive the typed key pair.
pub(crate) fn derive_key_pair_for(
    params: &ParameterSet,
    seed: &[u8],
) -> Result<(EncapsulationKey, DecapsulationKey)> {
    if seed.len() != KEYPAIR_SEED_SIZE {
        return Err(Error::InvalidSeedLength {
            expected: KEYPAIR_SEED_SIZE,
            actual: seed.len(),
        });
    }
    tracing::debug!(params = params.name(), "deriving key pair");

    let mut d = [0u8; SYM_BYTES];
    let mut z = [0u8; SYM_BYTES];
    d.copy_from_slice(&seed[..SYM_BYTES]);
    z.copy_from_slice(&seed[SYM_BYTES..]);

    let (ek, dk) = ml_kem_keygen_internal(params, &d, &z);
    d.zeroize();
    z.zeroize();

    Ok((
        EncapsulationKey::from_vec(*params, ek),
        DecapsulationKey::from_vec(*params, dk),
    ))
}

/// Encapsulate with an explicit message and wrap the result.
pub(crate) fn encapsulate_for(
    params: &ParameterSet,
    ek: &[u8],
    m: &[u8; 32],
) -> Result<(Ciphertext, SharedSecret)> {
    match ml_kem_encaps_internal(params, ek, m) {
        Ok((ct, ss)) => Ok((
            Ciphertext::from_vec(*params, ct),
            SharedSecret::from_bytes(ss),
        )),
        Err(err) => {
            tracing::debug!(params = params.name(), %err, "encapsulation key rejected");
            Err(err)
        }
    }
}

/// Decapsulate and wrap the result.
pub(crate) fn decapsulate_for(params: &ParameterSet, ct: &[u8], dk: &[u8]) -> Result<SharedSecret> {
    tracing::debug!(params = params.name(), ct_len = ct.len(), "decapsulating");
    let ss = ml_kem_decaps_internal(params, dk, ct)?;
    Ok(SharedSecret::from_bytes(ss))
}

/// An ML-KEM context: one parameter set plus the random number generator
/// used by the randomized operations.
///
/// # Example
///
/// ```ignore
/// use kyrax_ml_kem::{MlKem, ML_KEM_768};
/// use rand::rngs::OsRng;
///
/// let mut kem = MlKem::new(ML_KEM_768, OsRng);
/// let (ek, dk) = kem.generate_key_pair()?;
/// let (ct, ss_sender) = kem.encap(&ek, None)?;
/// let ss_receiver = kem.decap(&ct, &dk)?;
/// assert_eq!(ss_sender, ss_receiver);
/// ```
pub struct MlKem<R> {
    params: ParameterSet,
    rng: R,
}

impl<R: CryptoRngCore> MlKem<R> {
    /// Create a context for `params` drawing randomness from `rng`.
    pub fn new(params: ParameterSet, rng: R) -> Self {
        Self { params, rng }
    }

    /// Parameter set of this context.
    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// Mutable access to the random number generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Consume the context and return its random number generator.
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Generate a fresh key pair from 64 random bytes.
    ///
    /// # Errors
    /// [`Error::RandomnessFailure`] if the generator fails.
    pub fn generate_key_pair(&mut self) -> Result<(EncapsulationKey, DecapsulationKey)> {
        let mut seed = [0u8; KEYPAIR_SEED_SIZE];
        self.rng.try_fill_bytes(&mut seed)?;
        let keys = self.derive_key_pair(&seed);
        seed.zeroize();
        keys
    }

    /// Derive a key pair from the 64-byte seed `d || z`.
    ///
    /// # Errors
    /// [`Error::InvalidSeedLength`] unless `seed` is 64 bytes.
    pub fn derive_key_pair(&self, seed: &[u8]) -> Result<(EncapsulationKey, DecapsulationKey)> {
        derive_key_pair_for(&self.params, seed)
    }

    /// Encapsulate a shared secret to `ek`.
    ///
    /// With `msg` set the operation is deterministic; otherwise 32 fresh
    /// random bytes are drawn.
    ///
    /// # Errors
    /// - [`Error::InvalidKeyLength`] if `ek` has the wrong length.
    /// - [`Error::InvalidMessageLength`] if `msg` is not 32 bytes.
    /// - [`Error::RandomnessFailure`] if the generator fails.
    /// - [`Error::InvalidEncapsulationKey`] if `ek` fails the modulus check.
    pub fn encap(
        &mut self,
        ek: impl AsRef<[u8]>,
        msg: Option<&[u8]>,
    ) -> Result<(Ciphertext, SharedSecret)> {
        let ek = ek.as_ref();
        let expected = self.params.encapsulation_key_size();
        if ek.len() != expected {
            return Err(Error::InvalidKeyLength {
                expected,
                actual: ek.len(),
            });
        }

        let mut m = [0u8; MESSAGE_SIZE];
        match msg {
            Some(bytes) if bytes.len() != MESSAGE_SIZE => {
                return Err(Error::InvalidMessageLength {
                    expected: MESSAGE_SIZE,
                    actual: bytes.len(),
                });
            }
            Some(bytes) => m.copy_from_slice(bytes),
            None => self.rng.try_fill_bytes(&mut m)?,
        }
        tracing::debug!(
            params = self.params.name(),
            deterministic = msg.is_some(),
            "encapsulating"
        );

        let result = encapsulate_for(&self.params, ek, &m);
        m.zeroize();
        result
    }

    /// Decapsulate the shared secret carried by `ct`.
    ///
    /// Invalid ciphertexts of the right length are not an error: they yield
    /// a pseudorandom key derived from `dk` and `ct`.
    ///
    /// # Errors
    /// - [`Error::InvalidCiphertextLength`] if `ct` has the wrong length.
    /// - [`Error::InvalidKeyLength`] if `dk` has the wrong length.
    pub fn decap(
        &self,
        ct: impl AsRef<[u8]>,
        dk: impl AsRef<[u8]>,
    ) -> Result<SharedSecret> {
        decapsulate_for(&self.params, ct.as_ref(), dk.as_ref())
    }
}
