//! ML-KEM Benchmarks
//!
//! Benchmarks for every parameter set using the Criterion framework.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kyrax_ml_kem::{MlKem, ParameterSet};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn kem(params: ParameterSet) -> MlKem<ChaCha20Rng> {
    MlKem::new(params, ChaCha20Rng::seed_from_u64(0xbe4c))
}

/// Benchmark key generation.
fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM KeyGen");
    group.throughput(Throughput::Elements(1));

    for params in ParameterSet::ALL {
        let mut kem = kem(params);
        group.bench_function(BenchmarkId::from_parameter(params), |b| {
            b.iter(|| black_box(kem.generate_key_pair().unwrap()))
        });
    }

    group.finish();
}

/// Benchmark encapsulation, including the encapsulation key check.
fn bench_encaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM Encaps");
    group.throughput(Throughput::Elements(1));

    for params in ParameterSet::ALL {
        let mut kem = kem(params);
        let (ek, _) = kem.generate_key_pair().unwrap();
        group.bench_function(BenchmarkId::from_parameter(params), |b| {
            b.iter(|| black_box(kem.encap(&ek, None).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark decapsulation of valid and of rejected ciphertexts.
///
/// Both paths do the same work, so the two timings should match.
fn bench_decaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM Decaps");
    group.throughput(Throughput::Elements(1));

    for params in ParameterSet::ALL {
        let mut kem = kem(params);
        let (ek, dk) = kem.generate_key_pair().unwrap();
        let (ct, _) = kem.encap(&ek, None).unwrap();
        let mut bad = ct.as_bytes().to_vec();
        bad[0] ^= 1;

        group.bench_function(BenchmarkId::new("valid", params), |b| {
            b.iter(|| black_box(kem.decap(&ct, &dk).unwrap()))
        });
        group.bench_function(BenchmarkId::new("rejected", params), |b| {
            b.iter(|| black_box(kem.decap(&bad, &dk).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark complete roundtrip (keygen + encaps + decaps).
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("ML-KEM Roundtrip");
    group.throughput(Throughput::Elements(1));

    for params in ParameterSet::ALL {
        let mut kem = kem(params);
        group.bench_function(BenchmarkId::from_parameter(params), |b| {
            b.iter(|| {
                let (ek, dk) = kem.generate_key_pair().unwrap();
                let (ct, _ss_sender) = kem.encap(&ek, None).unwrap();
                black_box(kem.decap(&ct, &dk).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keygen,
    bench_encaps,
    bench_decaps,
    bench_roundtrip,
);

criterion_main!(benches);
