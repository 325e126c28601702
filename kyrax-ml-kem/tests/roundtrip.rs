//! Seeded end-to-end trials over every parameter set.
//!
//! Each trial generates a fresh key pair, encapsulates to it and checks that
//! decapsulation recovers the same secret. Under Miri the trial count drops
//! to keep interpretation time reasonable.

use kyrax_ml_kem::{Ciphertext, DecapsulationKey, EncapsulationKey, ErrorKind, MlKem, ParameterSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[cfg(not(miri))]
const TRIALS: usize = 1000;
#[cfg(miri)]
const TRIALS: usize = 2;

#[cfg(not(miri))]
const FLIP_TRIALS: usize = 10_000;
#[cfg(miri)]
const FLIP_TRIALS: usize = 4;

fn run_trials(params: ParameterSet) {
    let mut kem = MlKem::new(params, ChaCha20Rng::seed_from_u64(0x5eed));

    for trial in 0..TRIALS {
        let (ek, dk) = kem.generate_key_pair().unwrap();
        let (ct, ss_sender) = kem.encap(&ek, None).unwrap();
        let ss_receiver = kem.decap(&ct, &dk).unwrap();
        assert_eq!(ss_sender, ss_receiver, "{} trial {}", params, trial);
    }
}

#[test]
fn test_roundtrip_ml_kem_512() {
    run_trials(kyrax_ml_kem::ML_KEM_512);
}

#[test]
fn test_roundtrip_ml_kem_768() {
    run_trials(kyrax_ml_kem::ML_KEM_768);
}

#[test]
fn test_roundtrip_ml_kem_1024() {
    run_trials(kyrax_ml_kem::ML_KEM_1024);
}

/// Flip one random bit of a valid ciphertext per trial. Every flipped
/// ciphertext must decapsulate to a key other than the real one, and to the
/// same key each time.
fn run_bit_flips(params: ParameterSet) {
    let mut kem = MlKem::new(params, ChaCha20Rng::seed_from_u64(0xf11b));
    let (ek, dk) = kem.generate_key_pair().unwrap();
    let (ct, ss) = kem.encap(&ek, None).unwrap();
    let mut flips = ChaCha20Rng::seed_from_u64(0xb17);

    for trial in 0..FLIP_TRIALS {
        let mut tampered = ct.as_bytes().to_vec();
        let index = flips.gen_range(0..tampered.len());
        tampered[index] ^= 1u8 << flips.gen_range(0..8u32);

        let rejected = kem.decap(&tampered, &dk).unwrap();
        assert_ne!(rejected, ss, "{} trial {}: byte {}", params, trial, index);
        assert_eq!(kem.decap(&tampered, &dk).unwrap(), rejected, "{} trial {}", params, trial);
    }
}

#[test]
fn test_bit_flips_ml_kem_512() {
    run_bit_flips(kyrax_ml_kem::ML_KEM_512);
}

#[test]
fn test_bit_flips_ml_kem_768() {
    run_bit_flips(kyrax_ml_kem::ML_KEM_768);
}

#[test]
fn test_bit_flips_ml_kem_1024() {
    run_bit_flips(kyrax_ml_kem::ML_KEM_1024);
}

#[test]
fn test_typed_wrappers_roundtrip() {
    let mut kem = MlKem::new(kyrax_ml_kem::ML_KEM_768, ChaCha20Rng::seed_from_u64(1));
    let (ek, dk) = kem.generate_key_pair().unwrap();

    let ek = EncapsulationKey::from_bytes(ek.params(), &ek.into_bytes()).unwrap();
    let dk = DecapsulationKey::from_bytes(dk.params(), dk.as_bytes()).unwrap();
    let (ct, ss) = kem.encap(&ek, None).unwrap();
    let ct = Ciphertext::from_bytes(ct.params(), ct.as_bytes()).unwrap();

    assert_eq!(kem.decap(&ct, &dk).unwrap(), ss);
}

#[test]
fn test_keys_do_not_cross_parameter_sets() {
    let mut small = MlKem::new(kyrax_ml_kem::ML_KEM_512, ChaCha20Rng::seed_from_u64(2));
    let mut large = MlKem::new(kyrax_ml_kem::ML_KEM_1024, ChaCha20Rng::seed_from_u64(3));
    let (ek, dk) = small.generate_key_pair().unwrap();
    let (ct, _) = small.encap(&ek, None).unwrap();

    assert_eq!(large.encap(&ek, None).unwrap_err().kind(), ErrorKind::InputLength);
    assert_eq!(large.decap(&ct, &dk).unwrap_err().kind(), ErrorKind::InputLength);
}

#[test]
fn test_decap_checks_ciphertext_before_key() {
    let kem = MlKem::new(kyrax_ml_kem::ML_KEM_768, ChaCha20Rng::seed_from_u64(4));
    let err = kem.decap([0u8; 10], [0u8; 10]).unwrap_err();
    assert!(matches!(
        err,
        kyrax_ml_kem::Error::InvalidCiphertextLength { expected: 1088, actual: 10 }
    ));
}
