//! # Kyrax Core
//!
//! Core traits and utilities shared by the kyrax crates.
//!
//! This crate provides:
//! - The uniform [`Error`] type and its [`ErrorKind`] categories
//! - The [`Kem`] trait implemented by each ML-KEM parameter set
//! - Secure memory handling with zeroize integration

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod traits;

pub use error::{Error, ErrorKind, Result};
pub use traits::Kem;

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;
