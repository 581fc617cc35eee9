use benches::setup;
use crystal_field::{Direction, neutron_intensity, stevens::StevensBasis, stevens::StevensOperator};
use diol::prelude::*;
use quantum::operators::ProjectionBasis;

fn main() -> eyre::Result<()> {
    let bench = Bench::new(Config::from_args()?);

    bench.register("stevens operators", stevens_operators, [2, 4, 8, 16]);
    bench.register("hamiltonian", hamiltonian, [2, 4, 8, 16]);
    bench.register("solve", solve, [2, 4, 8, 16]);
    bench.register("neutron intensity", neutrons, [2, 4, 8, 16]);

    bench.run()?;
    Ok(())
}

fn stevens_operators(bencher: Bencher, doubled: u32) {
    let problem = setup(doubled);
    let basis = ProjectionBasis::new(problem.ion().spin(), 1.);

    bencher.bench(|| {
        let stevens = StevensBasis::new(&basis);
        let mut operators: Vec<_> = StevensOperator::ALL
            .into_iter()
            .map(|o| stevens.operator(o))
            .collect();

        black_box(&mut operators);
    });
}

fn hamiltonian(bencher: Bencher, doubled: u32) {
    let problem = setup(doubled);

    bencher.bench(|| {
        let mut hamiltonian = problem.hamiltonian();

        black_box(&mut hamiltonian);
    });
}

fn solve(bencher: Bencher, doubled: u32) {
    let problem = setup(doubled);

    bencher.bench(|| {
        let mut ion = problem.solve().unwrap();

        black_box(&mut ion);
    });
}

fn neutrons(bencher: Bencher, doubled: u32) {
    let ion = setup(doubled).solve().unwrap();

    bencher.bench(|| {
        let mut spectrum = neutron_intensity(&ion, 10., Direction::Powder).unwrap();

        black_box(&mut spectrum);
    });
}
