//! Fuzz target for ML-KEM decapsulation.
//!
//! This fuzzer tests that Decaps:
//! 1. Works with valid dk and ct
//! 2. Handles corrupted/malformed ciphertexts gracefully (implicit rejection)
//! 3. Produces consistent output (deterministic)

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

use kyrax_ml_kem::{MlKem, ParameterSet};

#[derive(Debug, Arbitrary)]
struct DecapsInput {
    d: [u8; 32],
    z: [u8; 32],
    m: [u8; 32],
    corrupt_byte: u8,
    corrupt_index: usize,
    variant: u8,
}

fuzz_target!(|input: DecapsInput| {
    let params = ParameterSet::ALL[input.variant as usize % 3];
    let mut kem = MlKem::new(params, ChaCha20Rng::from_seed([0u8; 32]));

    let (ek, dk) = kem.derive_key_pair(&[input.d, input.z].concat()).unwrap();
    let (ct, ss_sender) = kem.encap(&ek, Some(&input.m[..])).unwrap();

    // Test normal decapsulation
    let ss_receiver = kem.decap(&ct, &dk).unwrap();
    assert_eq!(ss_sender, ss_receiver, "Valid decaps should recover shared secret");

    // Test implicit rejection with corrupted ciphertext
    let mut bad = ct.into_bytes();
    let idx = input.corrupt_index % bad.len();
    bad[idx] ^= input.corrupt_byte.wrapping_add(1).max(1);
    let ss_bad = kem.decap(&bad, &dk).unwrap();
    let ss_bad2 = kem.decap(&bad, &dk).unwrap();
    assert_eq!(ss_bad, ss_bad2, "Implicit rejection should be deterministic");
    assert_ne!(ss_bad, ss_sender, "Corrupted ciphertext should not decapsulate");

    // Wrong lengths are reported, never decapsulated
    assert!(kem.decap(&bad[..idx], &dk).is_err());
});
