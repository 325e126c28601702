//! Fuzz target for ML-KEM roundtrip (keygen -> encaps -> decaps).
//!
//! This fuzzer tests the complete flow through the [`Kem`] trait:
//! 1. KeyGen produces valid keys
//! 2. Encaps with those keys produces valid ciphertext
//! 3. Decaps recovers the same shared secret

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

use kyrax_ml_kem::{Kem, MlKem1024, MlKem512, MlKem768};

#[derive(Debug, Arbitrary)]
struct RoundtripInput {
    rng_seed: [u8; 32],
    variant: u8,
}

fn roundtrip<K: Kem>(rng_seed: [u8; 32]) {
    let mut rng = ChaCha20Rng::from_seed(rng_seed);
    let (dk, ek) = K::keygen(&mut rng).unwrap();
    let (ct, ss_sender) = K::encaps(&ek, &mut rng).unwrap();
    let ss_receiver = K::decaps(&dk, &ct).unwrap();

    assert_eq!(
        ss_sender.as_ref(),
        ss_receiver.as_ref(),
        "Roundtrip failed: shared secrets don't match"
    );
}

fuzz_target!(|input: RoundtripInput| {
    match input.variant % 3 {
        0 => roundtrip::<MlKem512>(input.rng_seed),
        1 => roundtrip::<MlKem768>(input.rng_seed),
        _ => roundtrip::<MlKem1024>(input.rng_seed),
    }
});
