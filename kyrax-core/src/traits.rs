//! Key encapsulation trait.

use crate::Result;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key Encapsulation Mechanism (KEM) trait.
///
/// Implemented by one marker type per parameter set, so generic code can be
/// written once over all security levels.
///
/// # Example
///
/// ```ignore
/// use kyrax_core::Kem;
///
/// let (dk, ek) = MyKem::keygen(&mut rng)?;
/// let (ct, ss_sender) = MyKem::encaps(&ek, &mut rng)?;
/// let ss_receiver = MyKem::decaps(&dk, &ct)?;
/// ```
pub trait Kem {
    /// Decapsulation key (private key).
    type DecapsulationKey: Zeroize + ZeroizeOnDrop;

    /// Encapsulation key (public key).
    type EncapsulationKey: Clone;

    /// Ciphertext produced by encapsulation.
    type Ciphertext: Clone;

    /// Shared secret produced by encapsulation/decapsulation.
    type SharedSecret: Zeroize + ZeroizeOnDrop + AsRef<[u8]>;

    /// Size of the decapsulation key in bytes.
    const DECAPSULATION_KEY_SIZE: usize;

    /// Size of the encapsulation key in bytes.
    const ENCAPSULATION_KEY_SIZE: usize;

    /// Size of the ciphertext in bytes.
    const CIPHERTEXT_SIZE: usize;

    /// Size of the shared secret in bytes.
    const SHARED_SECRET_SIZE: usize;

    /// Size of the seed accepted by [`Kem::keygen_from_seed`].
    const SEED_SIZE: usize;

    /// Generate a new key pair.
    ///
    /// # Arguments
    ///
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (decapsulation_key, encapsulation_key).
    fn keygen(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Derive a key pair from a seed.
    ///
    /// The same seed always yields byte-identical keys.
    fn keygen_from_seed(
        seed: &[u8],
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)>;

    /// Encapsulate a shared secret using the encapsulation key.
    ///
    /// # Arguments
    ///
    /// * `ek` - The encapsulation (public) key.
    /// * `rng` - A cryptographically secure random number generator.
    ///
    /// # Returns
    ///
    /// A tuple of (ciphertext, shared_secret).
    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)>;

    /// Decapsulate a shared secret using the decapsulation key.
    ///
    /// # Arguments
    ///
    /// * `dk` - The decapsulation (private) key.
    /// * `ct` - The ciphertext to decapsulate.
    ///
    /// # Returns
    ///
    /// The shared secret.
    ///
    /// # Security
    ///
    /// Implementations MUST use implicit rejection to prevent
    /// chosen-ciphertext attacks. Invalid ciphertexts should
    /// produce a pseudorandom shared secret derived from the
    /// private key and ciphertext.
    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret>;
}
