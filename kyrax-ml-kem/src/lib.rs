//! # ML-KEM (FIPS 203)
//!
//! Implementation of the Module-Lattice-Based Key Encapsulation Mechanism
//! as specified in [FIPS 203](https://csrc.nist.gov/pubs/fips/203/final).
//!
//! ## Parameter Sets
//!
//! | Parameter Set | Security Level | Public Key | Ciphertext | Shared Secret |
//! |---------------|----------------|------------|------------|---------------|
//! | ML-KEM-512    | 1 (128-bit)    | 800 bytes  | 768 bytes  | 32 bytes      |
//! | ML-KEM-768    | 3 (192-bit)    | 1184 bytes | 1088 bytes | 32 bytes      |
//! | ML-KEM-1024   | 5 (256-bit)    | 1568 bytes | 1568 bytes | 32 bytes      |
//!
//! One implementation serves all three sets; the active [`ParameterSet`] is
//! a runtime value held by an [`MlKem`] context.
//!
//! ## Example
//!
//! ```ignore
//! use kyrax_ml_kem::{MlKem, ML_KEM_768};
//! use rand::rngs::OsRng;
//!
//! let mut kem = MlKem::new(ML_KEM_768, OsRng);
//! let (ek, dk) = kem.generate_key_pair()?;
//! let (ct, ss_sender) = kem.encap(&ek, None)?;
//! let ss_receiver = kem.decap(&ct, &dk)?;
//!
//! assert_eq!(ss_sender, ss_receiver);
//! ```
//!
//! The marker types [`MlKem512`], [`MlKem768`] and [`MlKem1024`] expose the
//! same operations through the [`Kem`] trait.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod encode;
mod hash;
mod k_pke;
mod kem;
mod matrix;
mod ntt;
mod params;
mod poly;
mod polyvec;
mod reduce;
mod sample;
mod types;
#[cfg(any(feature = "ml-kem-512", feature = "ml-kem-768", feature = "ml-kem-1024"))]
mod variants;

pub mod inspect;

pub use kem::MlKem;
pub use kyrax_core::{Error, ErrorKind, Kem, Result};
pub use params::{
    ParameterSet, KEYPAIR_SEED_SIZE, MESSAGE_SIZE, ML_KEM_1024, ML_KEM_512, ML_KEM_768,
    SHARED_SECRET_SIZE,
};
pub use types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedSecret};

#[cfg(feature = "ml-kem-1024")]
pub use variants::MlKem1024;
#[cfg(feature = "ml-kem-512")]
pub use variants::MlKem512;
#[cfg(feature = "ml-kem-768")]
pub use variants::MlKem768;
