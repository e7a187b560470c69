use criterion::{AxisScale, BenchmarkGroup, BenchmarkId, Criterion, PlotConfiguration};

use aknn::{
    prelude::*,
    queue::{FixedQueue, HeapQueue, LinearQueue, StdQueue},
    tree::NodeID,
};
use rand::prelude::*;

type Scalar = f32;
const DIM: usize = 3;
const K: usize = 10;

fn random_points(rng: &mut StdRng, n: usize) -> Vec<[Scalar; DIM]> {
    (0..n)
        .map(|_| [0.0; DIM].map(|_: Scalar| rng.gen_range(-5e3..5e3)))
        .collect()
}

/// Points in a few tight clusters, the worst case of split-only trees.
fn clustered_points(rng: &mut StdRng, n: usize) -> Vec<[Scalar; DIM]> {
    let centres = random_points(rng, 8);
    (0..n)
        .map(|i| {
            let c = centres[i % centres.len()];
            c.map(|x| x + rng.gen_range(-1e-2..1e-2))
        })
        .collect()
}

#[inline]
fn bench_queues<C, R>(
    tree: &BbdTree<Scalar, DIM>,
    queries: &[[Scalar; DIM]],
    epsilon: Scalar,
    group: &mut BenchmarkGroup<'_, criterion::measurement::WallTime>,
    suffix: &str,
) where
    C: PriorityQueue<Scalar, NodeID>,
    R: PriorityQueue<Scalar, usize>,
{
    let name = |t: &'static str| {
        t.trim_start_matches("aknn::queue::")
            .split('<')
            .next()
            .unwrap_or_default()
    };
    let id = format!(
        "{}/{}{suffix}",
        name(std::any::type_name::<C>()),
        name(std::any::type_name::<R>())
    );

    group.bench_function(BenchmarkId::new(id, tree.len()), |bencher| {
        bencher.iter(|| {
            for query in queries {
                tree.search_with::<C, R, _>(query, K, epsilon, Budget::Unlimited)
                    .unwrap();
            }
        })
    });
}

fn search_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Search");
    group
        .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic))
        .warm_up_time(std::time::Duration::from_secs(1))
        .measurement_time(std::time::Duration::from_secs(1))
        .sample_size(15);

    let g = &mut group;
    for n in (8..17).step_by(2).map(|i| 2usize.pow(i)) {
        let rng = &mut StdRng::seed_from_u64(1808);
        let points = random_points(rng, n);
        let queries = random_points(rng, 100);
        let tree = BbdTree::from_coordinates(points.clone(), BuildConfig::default()).unwrap();

        g.bench_function(BenchmarkId::new("Linear", n), |bencher| {
            bencher.iter(|| {
                for query in &queries {
                    linear_k_nearest(&points, query, K).unwrap();
                }
            })
        });

        bench_queues::<HeapQueue<Scalar, NodeID>, HeapQueue<Scalar, usize>>(&tree, &queries, 0.0, g, "");
        bench_queues::<HeapQueue<Scalar, NodeID>, FixedQueue<Scalar, usize>>(&tree, &queries, 0.0, g, "");
        bench_queues::<StdQueue<Scalar, NodeID>, FixedQueue<Scalar, usize>>(&tree, &queries, 0.0, g, "");
        bench_queues::<LinearQueue<Scalar, NodeID>, LinearQueue<Scalar, usize>>(&tree, &queries, 0.0, g, "");
        for epsilon in [0.5, 2.0] {
            let suffix = &format!("::{epsilon}");
            bench_queues::<HeapQueue<Scalar, NodeID>, FixedQueue<Scalar, usize>>(&tree, &queries, epsilon, g, suffix);
        }
    }

    group.finish();
}

fn build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    group
        .warm_up_time(std::time::Duration::from_secs(1))
        .measurement_time(std::time::Duration::from_secs(1))
        .sample_size(15);

    let rng = &mut StdRng::seed_from_u64(1808);
    let datasets = [
        ("uniform", random_points(rng, 1 << 14)),
        ("clustered", clustered_points(rng, 1 << 14)),
    ];

    for (name, points) in datasets {
        for decomposition in [Decomposition::Split, Decomposition::SplitShrink] {
            for split_rule in [SplitRule::Midpoint, SplitRule::Fair] {
                let config = BuildConfig::default()
                    .with_decomposition(decomposition)
                    .with_split_rule(split_rule);
                let id = format!("{decomposition:?}::{split_rule:?}");

                group.bench_function(BenchmarkId::new(id, name), |bencher| {
                    bencher.iter(|| BbdTree::from_coordinates(points.clone(), config).unwrap())
                });
            }
        }
    }

    group.finish();
}

criterion::criterion_group!(benches, search_benchmark, build_benchmark);
criterion::criterion_main!(benches);
