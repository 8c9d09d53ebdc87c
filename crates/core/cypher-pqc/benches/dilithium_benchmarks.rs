//! Benchmarks for ML-DSA (Dilithium)
//!
//! Signing time is dominated by the rejection loop, so it is measured over
//! several message sizes to average across attempt counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cypher_pqc::dilithium::{Dilithium2, Dilithium3, Dilithium5};
use cypher_pqc::random::OsRng;
use cypher_pqc::traits::{SeededSignature, Signature};

const MESSAGE_SIZES: [usize; 3] = [32, 1024, 16 * 1024];

fn bench_variant<T: SeededSignature>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(name);
    let mut rng = OsRng::new();
    let (pk, sk) = T::generate_keypair(&mut rng).unwrap();

    group.bench_function("keygen", |b| {
        b.iter(|| black_box(T::generate_keypair(&mut rng).unwrap()))
    });
    group.bench_function("keygen_from_seed", |b| {
        b.iter(|| black_box(T::keypair_from_seed(black_box(&[7u8; 32])).unwrap()))
    });

    for size in MESSAGE_SIZES {
        let message = vec![0x5au8; size];
        let signature = T::sign(&sk, &message, &mut rng).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("sign", size), &message, |b, message| {
            b.iter(|| black_box(T::sign(&sk, black_box(message), &mut rng).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &message, |b, message| {
            b.iter(|| black_box(T::verify(&pk, black_box(message), &signature)))
        });
    }
    group.finish();
}

fn bench_dilithium(c: &mut Criterion) {
    bench_variant::<Dilithium2>(c, "dilithium2");
    bench_variant::<Dilithium3>(c, "dilithium3");
    bench_variant::<Dilithium5>(c, "dilithium5");
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(30);
    targets = bench_dilithium
}
criterion_main!(benches);
