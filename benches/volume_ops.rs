//! Criterion benchmarks for volprep core operations.
//!
//! Run with: cargo bench --bench volume_ops
//!
//! These benchmarks track regression in the hot preprocessing paths:
//! - to_blocks()/from_blocks() partitioning
//! - standardize() and binarize() elementwise passes
//! - replace() label remapping
//! - apply_random_transform() paired warping

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array3;
use volprep::{transforms, LabelMapping, Volume};

/// Create a test volume with the given cubic edge length.
fn create_test_volume(edge: usize) -> Volume {
    Array3::from_shape_fn((edge, edge, edge), |(i, j, k)| {
        ((i * 31 + j * 7 + k) % 256) as f32
    })
    .into_dyn()
    .into()
}

fn create_test_labels(edge: usize) -> Volume {
    Array3::from_shape_fn((edge, edge, edge), |(i, j, k)| ((i + j + k) % 4) as u8)
        .into_dyn()
        .into()
}

fn bench_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocks");

    for &edge in &[64usize, 128] {
        let volume = create_test_volume(edge);
        let label = format!("{}^3 -> 32^3", edge);

        group.throughput(Throughput::Bytes((edge * edge * edge * 4) as u64));
        group.bench_with_input(BenchmarkId::new("to_blocks", &label), &volume, |b, v| {
            b.iter(|| transforms::to_blocks(black_box(v), [32, 32, 32]).unwrap())
        });

        let blocks = transforms::to_blocks(&volume, [32, 32, 32]).unwrap();
        let shape = volume.shape().to_vec();
        group.bench_with_input(BenchmarkId::new("from_blocks", &label), &blocks, |b, bl| {
            b.iter(|| transforms::from_blocks(black_box(bl), &shape).unwrap())
        });
    }

    group.finish();
}

fn bench_elementwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("elementwise");
    let volume = create_test_volume(128);
    group.throughput(Throughput::Bytes((128usize.pow(3) * 4) as u64));

    group.bench_function("standardize_128", |b| {
        b.iter(|| transforms::standardize(black_box(&volume)).unwrap())
    });
    group.bench_function("binarize_128", |b| {
        b.iter(|| transforms::binarize(black_box(&volume)).unwrap())
    });

    let labels = create_test_labels(128);
    let mapping = LabelMapping::from_pairs(&[(0, 0), (1, 10), (2, 20), (3, 10)]).unwrap();
    group.bench_function("replace_128", |b| {
        b.iter(|| transforms::replace(black_box(&labels), &mapping, false).unwrap())
    });

    group.finish();
}

fn bench_augment(c: &mut Criterion) {
    let mut group = c.benchmark_group("augment");
    // Warping is the most expensive op; keep the benchmark volume moderate.
    group.sample_size(20);

    let volume = create_test_volume(64);
    let labels = create_test_labels(64);
    group.bench_function("apply_random_transform_64", |b| {
        b.iter(|| {
            transforms::apply_random_transform(black_box(&volume), black_box(&labels), Some(42))
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_blocks, bench_elementwise, bench_augment);
criterion_main!(benches);
