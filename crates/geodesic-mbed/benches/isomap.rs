use criterion::*;
use rand::prelude::*;

use geodesic_mbed::{datasets, DistanceMatrix, Isomap, IsomapConfig, NeighborhoodRule};

fn isomap(c: &mut Criterion) {
    let seed = 42;
    let config = IsomapConfig::default()
        .with_neighborhood(NeighborhoodRule::KNearest { k: 10 })
        .with_dimension(2);

    let mut group = c.benchmark_group("isomap-swiss-roll");
    group
        .sample_size(10)
        .sampling_mode(SamplingMode::Flat)
        .plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for cardinality in [100, 200, 400] {
        let mut rng = StdRng::seed_from_u64(seed);
        let (points, _) = datasets::swiss_roll(cardinality, 0.05, &mut rng);
        let Ok(distances) = DistanceMatrix::par_from_points(&points) else {
            continue;
        };

        for parallel in [false, true] {
            let name = if parallel { "par-isomap" } else { "isomap" };
            let config = config.with_parallel(parallel);
            group.bench_with_input(BenchmarkId::new(name, cardinality), &cardinality, |b, _| {
                b.iter_with_large_drop(|| Isomap::new(&distances, config).run());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, isomap);
criterion_main!(benches);
