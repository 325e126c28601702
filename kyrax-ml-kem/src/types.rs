//! Key, ciphertext and shared-secret types.
//!
//! Each byte-string type remembers the parameter set it was built for and
//! checks its length against that set on construction.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::params::{ParameterSet, SHARED_SECRET_SIZE};
use core::fmt;
use kyrax_core::{Error, Result};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Encapsulation key (public key): `ByteEncode12(t) || rho`.
#[derive(Clone, PartialEq, Eq)]
pub struct EncapsulationKey {
    params: ParameterSet,
    bytes: Vec<u8>,
}

impl EncapsulationKey {
    /// Create an encapsulation key from bytes.
    ///
    /// Only the length is checked here; the coefficient range of t is
    /// checked on use.
    pub fn from_bytes(params: ParameterSet, bytes: &[u8]) -> Result<Self> {
        let expected = params.encapsulation_key_size();
        if bytes.len() != expected {
            return Err(Error::InvalidKeyLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            params,
            bytes: bytes.to_vec(),
        })
    }

    pub(crate) fn from_vec(params: ParameterSet, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), params.encapsulation_key_size());
        Self { params, bytes }
    }

    /// Parameter set this key belongs to.
    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// Get the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the key and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for EncapsulationKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for EncapsulationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncapsulationKey")
            .field("params", &self.params.name())
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Decapsulation key (secret key): `ByteEncode12(s) || ek || H(ek) || z`.
///
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DecapsulationKey {
    #[zeroize(skip)]
    params: ParameterSet,
    bytes: Vec<u8>,
}

impl DecapsulationKey {
    /// Create a decapsulation key from bytes.
    pub fn from_bytes(params: ParameterSet, bytes: &[u8]) -> Result<Self> {
        let expected = params.decapsulation_key_size();
        if bytes.len() != expected {
            return Err(Error::InvalidKeyLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            params,
            bytes: bytes.to_vec(),
        })
    }

    pub(crate) fn from_vec(params: ParameterSet, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), params.decapsulation_key_size());
        Self { params, bytes }
    }

    /// Parameter set this key belongs to.
    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// Get the key as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The encapsulation key embedded in this decapsulation key.
    pub fn encapsulation_key(&self) -> EncapsulationKey {
        let start = self.params.poly_vec_bytes();
        let end = start + self.params.encapsulation_key_size();
        EncapsulationKey::from_vec(self.params, self.bytes[start..end].to_vec())
    }
}

impl AsRef<[u8]> for DecapsulationKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for DecapsulationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecapsulationKey")
            .field("params", &self.params.name())
            .finish_non_exhaustive()
    }
}

/// Ciphertext: `Compress_du(u) || Compress_dv(v)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Ciphertext {
    params: ParameterSet,
    bytes: Vec<u8>,
}

impl Ciphertext {
    /// Create a ciphertext from bytes.
    pub fn from_bytes(params: ParameterSet, bytes: &[u8]) -> Result<Self> {
        let expected = params.ciphertext_size();
        if bytes.len() != expected {
            return Err(Error::InvalidCiphertextLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            params,
            bytes: bytes.to_vec(),
        })
    }

    pub(crate) fn from_vec(params: ParameterSet, bytes: Vec<u8>) -> Self {
        debug_assert_eq!(bytes.len(), params.ciphertext_size());
        Self { params, bytes }
    }

    /// Parameter set this ciphertext belongs to.
    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// Get the ciphertext as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the ciphertext and return its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Ciphertext {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ciphertext")
            .field("params", &self.params.name())
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// 32-byte shared secret.
///
/// Zeroized on drop. Equality runs in constant time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: [u8; SHARED_SECRET_SIZE],
}

impl SharedSecret {
    /// Wrap raw shared-secret bytes.
    pub fn from_bytes(bytes: [u8; SHARED_SECRET_SIZE]) -> Self {
        Self { bytes }
    }

    /// Get the secret as a byte slice.
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_SIZE] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}
