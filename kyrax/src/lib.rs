//! # Kyrax
//!
//! Post-quantum key encapsulation implementing NIST FIPS 203.
//!
//! ## Features
//!
//! - `std` (default): Enable standard library support
//! - `ml-kem` (default): Enable ML-KEM (FIPS 203) key encapsulation
//!
//! ## Supported Algorithms
//!
//! - **ML-KEM** (FIPS 203): Module-Lattice-Based Key Encapsulation Mechanism
//!   - ML-KEM-512
//!   - ML-KEM-768
//!   - ML-KEM-1024
//!
//! ## Example
//!
//! ```ignore
//! use kyrax_pqc::ml_kem::{MlKem, ML_KEM_768};
//!
//! let mut kem = MlKem::new(ML_KEM_768, rng);
//!
//! // Generate a key pair
//! let (ek, dk) = kem.generate_key_pair()?;
//!
//! // Encapsulate a shared secret
//! let (ct, ss_sender) = kem.encap(&ek, None)?;
//!
//! // Decapsulate the shared secret
//! let ss_receiver = kem.decap(&ct, &dk)?;
//!
//! assert_eq!(ss_sender, ss_receiver);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use kyrax_core::{Error, ErrorKind, Result};

/// Core traits for key encapsulation.
pub mod traits {
    pub use kyrax_core::Kem;
}

/// ML-KEM (FIPS 203) key encapsulation mechanism.
#[cfg(feature = "ml-kem")]
pub mod ml_kem {
    pub use kyrax_core::Kem;
    pub use kyrax_ml_kem::*;
}
