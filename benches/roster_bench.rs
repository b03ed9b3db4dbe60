//! Criterion benchmarks for u-roster.
//!
//! Runs on the bundled 20-worker, three-week roster with random costs.
//! Set `RUST_LOG=u_roster=debug` to see the search events.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;
use u_roster::config::ConstraintConfig;
use u_roster::cost::CostTable;
use u_roster::lns::{Destroy, LnsConfig, LnsRunner};
use u_roster::neighborhood::Neighborhood;
use u_roster::repair::{DepthFirstConfig, DepthFirstRepair};
use u_roster::vnd::{VndConfig, VndRunner};
use u_roster::{RosterProblem, ScheduleModel};

const FIREFIGHTER_SCHEDULE: &str = include_str!("../data/firefighter.sched");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn firefighter() -> (RosterProblem, ScheduleModel) {
    let config = ConstraintConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let costs = CostTable::from_fn(config.workers, |_, _, _| rng.random_range(0.0..1.0));
    let problem = RosterProblem::new(config, costs).expect("valid problem");
    let schedule = ScheduleModel::from_text(FIREFIGHTER_SCHEDULE).expect("bundled schedule");
    (problem, schedule)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_validate(c: &mut Criterion) {
    let (problem, schedule) = firefighter();
    c.bench_function("validate_firefighter", |b| {
        b.iter(|| black_box(problem.validate(black_box(&schedule))))
    });
}

fn bench_neighborhoods(c: &mut Criterion) {
    let (problem, schedule) = firefighter();
    let mut group = c.benchmark_group("neighbours");
    group.sample_size(10);

    for op in Neighborhood::standard() {
        group.bench_with_input(BenchmarkId::from_parameter(op.name()), &op, |b, op| {
            b.iter(|| black_box(op.neighbours(black_box(&schedule), problem.validator())))
        });
    }
    group.finish();
}

fn bench_vnd(c: &mut Criterion) {
    init_tracing();
    let (problem, schedule) = firefighter();
    let mut group = c.benchmark_group("vnd");
    group.sample_size(10);

    for parallel in [false, true] {
        let config = VndConfig::default().with_parallel(parallel);
        group.bench_with_input(BenchmarkId::new("standard", parallel), &config, |b, config| {
            b.iter(|| {
                let neighborhoods = Neighborhood::standard();
                let result = VndRunner::run(&problem, schedule.clone(), &neighborhoods, config);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_lns(c: &mut Criterion) {
    init_tracing();
    let (problem, schedule) = firefighter();
    let solver = DepthFirstRepair::new(DepthFirstConfig::default().with_max_nodes(100_000));
    let mut group = c.benchmark_group("lns");
    group.sample_size(10);

    for destroy in [
        Destroy::RandomWorkers { count: 1 },
        Destroy::CostliestWorkers { count: 1 },
    ] {
        let config = LnsConfig::default().with_max_iterations(20).with_seed(42);
        let id = BenchmarkId::new("destroy", format!("{destroy:?}"));
        group.bench_with_input(id, &destroy, |b, destroy| {
            b.iter(|| {
                let result = LnsRunner::run(&problem, schedule.clone(), destroy, &solver, &config);
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate, bench_neighborhoods, bench_vnd, bench_lns);
criterion_main!(benches);
