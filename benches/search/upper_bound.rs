use criterion::{black_box, BenchmarkId, Criterion};
use eytzinger_report::search::eytzinger::{eytzinger, sorted_upper_bound, upper_bound};
use eytzinger_report::search::QueryDistribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generate_test_data(size: usize) -> (Vec<i32>, Vec<i32>, Vec<i32>) {
    let sorted: Vec<i32> = (0..size as i32).collect();
    let layout = eytzinger(&sorted);
    let mut rng = StdRng::seed_from_u64(0xE172);
    let queries = QueryDistribution::Uniform
        .sample_queries(&mut rng, size as i32 - 1, 4096)
        .unwrap();
    (sorted, layout, queries)
}

pub fn bench_upper_bound(c: &mut Criterion) {
    let mut group = c.benchmark_group("upper_bound");

    for exponent in [10u32, 16, 20, 24] {
        let size = 1usize << exponent;
        let (sorted, layout, queries) = generate_test_data(size);

        group.bench_with_input(BenchmarkId::new("binary", size), &queries, |b, queries| {
            let mut cursor = 0;
            b.iter(|| {
                cursor = (cursor + 1) % queries.len();
                sorted_upper_bound(black_box(&sorted), &queries[cursor])
            })
        });

        group.bench_with_input(BenchmarkId::new("eytzinger", size), &queries, |b, queries| {
            let mut cursor = 0;
            b.iter(|| {
                cursor = (cursor + 1) % queries.len();
                upper_bound(black_box(&layout), &queries[cursor])
            })
        });
    }

    group.finish();
}

pub fn bench_build_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_layout");

    for exponent in [10u32, 16, 20] {
        let size = 1usize << exponent;
        let sorted: Vec<i32> = (0..size as i32).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &sorted, |b, sorted| {
            b.iter(|| eytzinger(black_box(sorted)))
        });
    }

    group.finish();
}
