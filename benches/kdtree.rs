use criterion::{criterion_group, criterion_main, Criterion};
use mosaic_index::kdtree::{KDTree, KDTreeIndex};
use mosaic_index::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_points(n: usize) -> Vec<Point<f64, 3>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| Point::new([rng.gen(), rng.gen(), rng.gen()]))
        .collect()
}

fn linear_nearest<'a>(points: &'a [Point<f64, 3>], query: &Point<f64, 3>) -> &'a Point<f64, 3> {
    points
        .iter()
        .min_by(|a, b| {
            query
                .squared_distance(a)
                .total_cmp(&query.squared_distance(b))
        })
        .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let points = generate_points(100_000);
    let queries = generate_points(1_000);

    c.bench_function("construction (kdtree)", |b| {
        b.iter(|| KDTree::from_points(points.iter().copied()))
    });

    let tree = KDTree::from_points(points.iter().copied());

    c.bench_function("nearest (kdtree)", |b| {
        b.iter(|| {
            for query in &queries {
                tree.nearest(query).unwrap();
            }
        })
    });

    c.bench_function("nearest (linear scan, 10 queries)", |b| {
        b.iter(|| {
            for query in &queries[..10] {
                linear_nearest(&points, query);
            }
        })
    });

    c.bench_function("within (kdtree)", |b| {
        b.iter(|| tree.within(&Point::new([0.5, 0.5, 0.5]), 0.05))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
