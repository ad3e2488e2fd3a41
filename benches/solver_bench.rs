//! Benchmarks for the equilibrium solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use matrix_game_solver::cfr::{EquilibriumSolver, SolverConfig};
use matrix_game_solver::games::classic::skewed_rock_paper_scissors;
use matrix_game_solver::games::{PayoffDistribution, PayoffTable};

fn random_game(size: usize) -> PayoffTable {
    let mut rng = StdRng::seed_from_u64(42);
    PayoffTable::random(size, PayoffDistribution::Uniform, &mut rng).unwrap()
}

fn iteration_benchmark(c: &mut Criterion) {
    let game = random_game(200);

    for (name, config) in [
        ("fp_iteration_200", SolverConfig::fictitious_play()),
        ("cfr_iteration_200", SolverConfig::cfr()),
        ("cfr_plus_iteration_200", SolverConfig::default()),
    ] {
        let mut solver = EquilibriumSolver::new(game.clone(), config);
        c.bench_function(name, |b| {
            b.iter(|| {
                solver.run_iteration();
                black_box(solver.iteration())
            })
        });
    }
}

fn exploitability_benchmark(c: &mut Criterion) {
    let mut solver = EquilibriumSolver::new(random_game(200), SolverConfig::default());
    solver.train(100);

    c.bench_function("exploitability_200", |b| b.iter(|| black_box(solver.exploitability())));
}

fn small_game_benchmark(c: &mut Criterion) {
    c.bench_function("skewed_rps_1000_iterations", |b| {
        b.iter(|| {
            let mut solver = EquilibriumSolver::new(skewed_rock_paper_scissors(), SolverConfig::default());
            solver.train(black_box(1000));
            solver.exploitability()
        })
    });
}

criterion_group!(benches, iteration_benchmark, exploitability_benchmark, small_game_benchmark);
criterion_main!(benches);
