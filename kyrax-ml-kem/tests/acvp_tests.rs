// Helpers and structs are unused when every test returns early on missing
// vectors; allow dead_code for that configuration.
#![allow(dead_code, unused_macros, unused_imports)]

//! NIST ACVP (Automated Cryptographic Validation Protocol) tests for ML-KEM.
//!
//! These tests use official NIST test vectors from:
//! https://github.com/usnistgov/ACVP-Server/tree/master/gen-val/json-files
//!
//! Note: These tests are skipped when the test vectors are not present
//! (e.g., when running from crates.io package where they are excluded).

use kyrax_ml_kem::{MlKem, ParameterSet};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Path to the ACVP test vectors directory
const ACVP_DIR: &str = "tests/acvp";

/// Check if ACVP test vectors are available.
/// Returns false when running from crates.io package where vectors are excluded.
fn acvp_vectors_available() -> bool {
    Path::new(ACVP_DIR).exists()
}

/// Macro to skip test if ACVP vectors are not available
macro_rules! skip_if_no_vectors {
    () => {
        if !acvp_vectors_available() {
            eprintln!(
                "Skipping ACVP test: test vectors not available (excluded from crates.io package)"
            );
            return;
        }
    };
}

/// ACVP prompt file structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AcvpPromptFile {
    test_groups: Vec<PromptTestGroup>,
}

/// ACVP expected results file structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AcvpExpectedFile {
    test_groups: Vec<ExpectedTestGroup>,
}

/// Test group in prompt file (has parameterSet)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptTestGroup {
    tg_id: u32,
    parameter_set: String,
    #[serde(default)]
    function: Option<String>,
    tests: Vec<serde_json::Value>,
}

/// Test group in expected results file (no parameterSet)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedTestGroup {
    tg_id: u32,
    tests: Vec<serde_json::Value>,
}

/// KeyGen prompt test case
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyGenPrompt {
    tc_id: u32,
    d: String,
    z: String,
}

/// KeyGen expected result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyGenExpected {
    tc_id: u32,
    ek: String,
    dk: String,
}

/// EncapDecap encapsulation prompt
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncapsPrompt {
    tc_id: u32,
    ek: String,
    m: String,
}

/// EncapDecap encapsulation expected result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncapsExpected {
    tc_id: u32,
    c: String,
    k: String,
}

/// EncapDecap decapsulation prompt
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecapsPrompt {
    tc_id: u32,
    dk: String,
    c: String,
}

/// EncapDecap decapsulation expected result
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DecapsExpected {
    tc_id: u32,
    k: String,
}

fn hex_decode(s: &str) -> Vec<u8> {
    hex::decode(s).expect("Invalid hex string")
}

fn load_prompt_file(path: &str) -> AcvpPromptFile {
    let content = fs::read_to_string(path).expect("Failed to read ACVP prompt file");
    serde_json::from_str(&content).expect("Failed to parse ACVP prompt JSON")
}

fn load_expected_file(path: &str) -> AcvpExpectedFile {
    let content = fs::read_to_string(path).expect("Failed to read ACVP expected file");
    serde_json::from_str(&content).expect("Failed to parse ACVP expected JSON")
}

fn kem(params: ParameterSet) -> MlKem<ChaCha20Rng> {
    MlKem::new(params, ChaCha20Rng::seed_from_u64(0))
}

/// Pair every prompt case of the matching group with its expected result.
///
/// `function` narrows the group for the encapDecap files, which hold one
/// group per (parameter set, function).
fn paired_cases<P, E>(
    prompt_file: &AcvpPromptFile,
    expected_file: &AcvpExpectedFile,
    params: ParameterSet,
    function: Option<&str>,
) -> Vec<(P, E)>
where
    P: serde::de::DeserializeOwned,
    E: serde::de::DeserializeOwned,
{
    let prompt_group = prompt_file
        .test_groups
        .iter()
        .find(|g| {
            g.parameter_set == params.name()
                && (function.is_none() || g.function.as_deref() == function)
        })
        .unwrap_or_else(|| panic!("{} test group not found in prompt", params));

    let expected_group = expected_file
        .test_groups
        .iter()
        .find(|g| g.tg_id == prompt_group.tg_id)
        .expect("Expected test group not found");

    prompt_group
        .tests
        .iter()
        .zip(expected_group.tests.iter())
        .map(|(p, e)| {
            (
                serde_json::from_value(p.clone()).expect("Failed to parse prompt"),
                serde_json::from_value(e.clone()).expect("Failed to parse expected"),
            )
        })
        .collect()
}

// ============================================================================
// KeyGen Tests
// ============================================================================

#[test]
fn test_acvp_keygen() {
    skip_if_no_vectors!();
    let prompt_file = load_prompt_file("tests/acvp/keygen_prompt.json");
    let expected_file = load_expected_file("tests/acvp/keygen_expected.json");

    for params in ParameterSet::ALL {
        let cases: Vec<(KeyGenPrompt, KeyGenExpected)> =
            paired_cases(&prompt_file, &expected_file, params, None);
        let kem = kem(params);

        let mut passed = 0;
        for (prompt, expected) in cases {
            assert_eq!(prompt.tc_id, expected.tc_id, "Test case ID mismatch");

            let seed = [hex_decode(&prompt.d), hex_decode(&prompt.z)].concat();
            let (ek, dk) = kem.derive_key_pair(&seed).unwrap();

            assert_eq!(
                ek.as_bytes(),
                hex_decode(&expected.ek).as_slice(),
                "{} KeyGen tcId={}: ek mismatch",
                params,
                prompt.tc_id
            );
            assert_eq!(
                dk.as_bytes(),
                hex_decode(&expected.dk).as_slice(),
                "{} KeyGen tcId={}: dk mismatch",
                params,
                prompt.tc_id
            );
            passed += 1;
        }
        println!("{} KeyGen: {} ACVP tests passed", params, passed);
    }
}

// ============================================================================
// Encapsulation Tests
// ============================================================================

#[test]
fn test_acvp_encaps() {
    skip_if_no_vectors!();
    let prompt_file = load_prompt_file("tests/acvp/encapdecap_prompt.json");
    let expected_file = load_expected_file("tests/acvp/encapdecap_expected.json");

    for params in ParameterSet::ALL {
        let cases: Vec<(EncapsPrompt, EncapsExpected)> =
            paired_cases(&prompt_file, &expected_file, params, Some("encapsulation"));
        let mut kem = kem(params);

        let mut passed = 0;
        for (prompt, expected) in cases {
            assert_eq!(prompt.tc_id, expected.tc_id);

            let ek = hex_decode(&prompt.ek);
            let m = hex_decode(&prompt.m);
            let (ct, ss) = kem.encap(&ek, Some(&m[..])).unwrap();

            assert_eq!(
                ct.as_bytes(),
                hex_decode(&expected.c).as_slice(),
                "{} Encaps tcId={}: ciphertext mismatch",
                params,
                prompt.tc_id
            );
            assert_eq!(
                ss.as_ref(),
                hex_decode(&expected.k).as_slice(),
                "{} Encaps tcId={}: shared secret mismatch",
                params,
                prompt.tc_id
            );
            passed += 1;
        }
        println!("{} Encaps: {} ACVP tests passed", params, passed);
    }
}

// ============================================================================
// Decapsulation Tests
// ============================================================================

#[test]
fn test_acvp_decaps() {
    skip_if_no_vectors!();
    let prompt_file = load_prompt_file("tests/acvp/encapdecap_prompt.json");
    let expected_file = load_expected_file("tests/acvp/encapdecap_expected.json");

    for params in ParameterSet::ALL {
        let cases: Vec<(DecapsPrompt, DecapsExpected)> =
            paired_cases(&prompt_file, &expected_file, params, Some("decapsulation"));
        let kem = kem(params);

        let mut passed = 0;
        for (prompt, expected) in cases {
            assert_eq!(prompt.tc_id, expected.tc_id);

            let dk = hex_decode(&prompt.dk);
            let c = hex_decode(&prompt.c);
            let ss = kem.decap(&c, &dk).unwrap();

            assert_eq!(
                ss.as_ref(),
                hex_decode(&expected.k).as_slice(),
                "{} Decaps tcId={}: shared secret mismatch",
                params,
                prompt.tc_id
            );
            passed += 1;
        }
        println!("{} Decaps: {} ACVP tests passed", params, passed);
    }
}
