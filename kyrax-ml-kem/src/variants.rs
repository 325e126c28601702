//! Marker types binding each parameter set to the [`Kem`] trait.

use crate::kem::{decapsulate_for, derive_key_pair_for, encapsulate_for};
use crate::params::{KEYPAIR_SEED_SIZE, MESSAGE_SIZE, SHARED_SECRET_SIZE};
use crate::types::{Ciphertext, DecapsulationKey, EncapsulationKey, SharedSecret};
use kyrax_core::{Kem, Result};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

#[cfg(feature = "ml-kem-1024")]
use crate::params::ML_KEM_1024;
#[cfg(feature = "ml-kem-512")]
use crate::params::ML_KEM_512;
#[cfg(feature = "ml-kem-768")]
use crate::params::ML_KEM_768;

macro_rules! define_kem_variant {
    ($(#[$meta:meta])* $name:ident, $params:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            /// The parameter set bound to this type.
            pub const PARAMS: crate::params::ParameterSet = $params;
        }

        impl Kem for $name {
            type DecapsulationKey = DecapsulationKey;
            type EncapsulationKey = EncapsulationKey;
            type Ciphertext = Ciphertext;
            type SharedSecret = SharedSecret;

            const DECAPSULATION_KEY_SIZE: usize = $params.decapsulation_key_size();
            const ENCAPSULATION_KEY_SIZE: usize = $params.encapsulation_key_size();
            const CIPHERTEXT_SIZE: usize = $params.ciphertext_size();
            const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;
            const SEED_SIZE: usize = KEYPAIR_SEED_SIZE;

            fn keygen(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
                let mut seed = [0u8; KEYPAIR_SEED_SIZE];
                rng.try_fill_bytes(&mut seed)?;
                let keys = Self::keygen_from_seed(&seed);
                seed.zeroize();
                keys
            }

            fn keygen_from_seed(
                seed: &[u8],
            ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
                let (ek, dk) = derive_key_pair_for(&$params, seed)?;
                Ok((dk, ek))
            }

            fn encaps(
                ek: &Self::EncapsulationKey,
                rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
                let mut m = [0u8; MESSAGE_SIZE];
                rng.try_fill_bytes(&mut m)?;
                let result = encapsulate_for(&$params, ek.as_bytes(), &m);
                m.zeroize();
                result
            }

            fn decaps(
                dk: &Self::DecapsulationKey,
                ct: &Self::Ciphertext,
            ) -> Result<Self::SharedSecret> {
                decapsulate_for(&$params, ct.as_bytes(), dk.as_bytes())
            }
        }
    };
}

#[cfg(feature = "ml-kem-512")]
define_kem_variant!(
    /// ML-KEM-512 (NIST Security Level 1).
    MlKem512,
    ML_KEM_512
);

#[cfg(feature = "ml-kem-768")]
define_kem_variant!(
    /// ML-KEM-768 (NIST Security Level 3).
    MlKem768,
    ML_KEM_768
);

#[cfg(feature = "ml-kem-1024")]
define_kem_variant!(
    /// ML-KEM-1024 (NIST Security Level 5).
    MlKem1024,
    ML_KEM_1024
);
