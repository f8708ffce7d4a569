//! Criterion benchmarks for u-shuttle planning stages.
//!
//! Uses synthetic company sets with deterministic counts and distances so
//! runs are comparable across machines.

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_shuttle::evaluation::{CostPolicy, RouteEvaluator};
use u_shuttle::optimizer::RouteOptimizer;
use u_shuttle::sa::SaConfig;
use u_shuttle::schedule::{ScheduleConfig, ScheduleGenerator};

// ===========================================================================
// Synthetic companies
// ===========================================================================

struct Instance {
    route: Vec<String>,
    employees: HashMap<String, u32>,
    distances: HashMap<String, f64>,
}

fn instance(n: usize) -> Instance {
    let route: Vec<String> = (0..n).map(|i| format!("Company{i}")).collect();
    let employees = route
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), 3 + (i as u32 * 7) % 25))
        .collect();
    let distances = route
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), 1.0 + (i as f64 * 2.5) % 30.0))
        .collect();
    Instance {
        route,
        employees,
        distances,
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for &n in &[5, 20, 100] {
        let inst = instance(n);
        let evaluator = RouteEvaluator::new(22);
        group.bench_with_input(BenchmarkId::from_parameter(n), &inst, |b, inst| {
            b.iter(|| black_box(evaluator.evaluate(black_box(&inst.route), &inst.employees)))
        });
    }
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);

    for &n in &[5, 20, 50] {
        let inst = instance(n);
        let config = SaConfig::default().with_seed(42);
        let optimizer = RouteOptimizer::new(CostPolicy::default(), config).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &inst, |b, inst| {
            b.iter(|| {
                let result = optimizer.optimize(black_box(&inst.route), &inst.employees, 22);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule");

    for &trips in &[3, 10, 30] {
        let inst = instance(20);
        let generator = ScheduleGenerator::new(ScheduleConfig::default()).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(trips), &inst, |b, inst| {
            b.iter(|| {
                let schedule = generator.generate(
                    black_box(&inst.route),
                    &inst.employees,
                    &inst.distances,
                    22,
                    trips,
                );
                black_box(schedule)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_optimize, bench_schedule);
criterion_main!(benches);
