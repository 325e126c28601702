//! Fuzz target for ML-KEM key generation.
//!
//! This fuzzer tests that key derivation:
//! 1. Produces correctly sized keys from any seed
//! 2. Produces consistent output (deterministic)
//! 3. Embeds the encapsulation key and its hash in the decapsulation key

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

use kyrax_ml_kem::inspect::KeyInspection;
use kyrax_ml_kem::{MlKem, ParameterSet};

#[derive(Debug, Arbitrary)]
struct KeyGenInput {
    d: [u8; 32],
    z: [u8; 32],
    variant: u8, // 0 = ML-KEM-512, 1 = ML-KEM-768, 2 = ML-KEM-1024
}

fuzz_target!(|input: KeyGenInput| {
    let params = ParameterSet::ALL[input.variant as usize % 3];
    let kem = MlKem::new(params, ChaCha20Rng::from_seed([0u8; 32]));
    let seed = [input.d, input.z].concat();

    let (ek, dk) = kem.derive_key_pair(&seed).unwrap();
    let (ek2, dk2) = kem.derive_key_pair(&seed).unwrap();
    assert_eq!(ek, ek2, "KeyGen should be deterministic");
    assert_eq!(dk.as_bytes(), dk2.as_bytes(), "KeyGen should be deterministic");

    assert_eq!(ek.as_bytes().len(), params.encapsulation_key_size());
    assert_eq!(dk.as_bytes().len(), params.decapsulation_key_size());
    assert_eq!(dk.encapsulation_key(), ek);

    let info = KeyInspection::new(params, ek.as_bytes()).unwrap();
    assert!(info.is_canonical(), "Generated keys must pass the modulus check");
    let hash_at = params.decapsulation_key_size() - 64;
    assert_eq!(&dk.as_bytes()[hash_at..hash_at + 32], info.ek_hash());
    assert_eq!(&dk.as_bytes()[hash_at + 32..], &input.z[..]);
});
