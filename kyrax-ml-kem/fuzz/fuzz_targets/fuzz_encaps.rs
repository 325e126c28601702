//! Fuzz target for ML-KEM encapsulation.
//!
//! This fuzzer tests that Encaps:
//! 1. Does not panic on arbitrary key bytes
//! 2. Accepts a key exactly when its coefficients are canonical
//! 3. Produces consistent output (deterministic)

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

use kyrax_ml_kem::inspect::KeyInspection;
use kyrax_ml_kem::{ErrorKind, MlKem, ParameterSet};

#[derive(Debug, Arbitrary)]
struct EncapsInput {
    ek: Vec<u8>,
    m: [u8; 32],
    variant: u8,
}

fuzz_target!(|input: EncapsInput| {
    let params = ParameterSet::ALL[input.variant as usize % 3];
    let mut kem = MlKem::new(params, ChaCha20Rng::from_seed([0u8; 32]));

    // Stretch short inputs to the key length so the modulus check is reached.
    let mut ek = input.ek;
    if !ek.is_empty() {
        ek = ek.iter().copied().cycle().take(params.encapsulation_key_size()).collect();
    }

    match kem.encap(&ek, Some(&input.m[..])) {
        Ok((ct, ss)) => {
            let info = KeyInspection::new(params, &ek).unwrap();
            assert!(info.is_canonical(), "Non-canonical key was accepted");
            assert_eq!(ct.as_bytes().len(), params.ciphertext_size());

            let (ct2, ss2) = kem.encap(&ek, Some(&input.m[..])).unwrap();
            assert_eq!(ct, ct2, "Encaps should be deterministic");
            assert_eq!(ss, ss2, "Encaps should be deterministic");
        }
        Err(err) if err.kind() == ErrorKind::KeyValidation => {
            let info = KeyInspection::new(params, &ek).unwrap();
            assert!(!info.is_canonical(), "Canonical key was rejected");
        }
        Err(err) => {
            assert_eq!(err.kind(), ErrorKind::InputLength);
            assert!(ek.is_empty());
        }
    }
});
