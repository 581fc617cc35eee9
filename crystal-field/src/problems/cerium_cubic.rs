use std::collections::VecDeque;

use crystal_field::{CfArg, CrystalFieldIon, IonProblem};
use quantum::units::energy_units::{Energy, Kelvin, MilliElectronVolt};

pub struct CeriumCubic;

impl CeriumCubic {
    /// Optional arguments are the crystal field list, e.g. `c 10 0.5`.
    pub fn run(args: &mut VecDeque<String>) {
        let mut cf_args: Vec<CfArg> = args
            .drain(..)
            .map(|x| x.parse().expect("infallible parse"))
            .collect();
        if cf_args.is_empty() {
            cf_args = vec!["c".into(), CfArg::Value(10.0)];
        }

        let cerium = IonProblem::from_list("Ce", [0., 0., 0.], &cf_args)
            .and_then(|problem| problem.solve())
            .expect("could not solve cerium problem");

        print!("{}", cerium.cf_params());
        println!();
        print!("{cerium}");
        Self::print_mev(&cerium);
    }

    fn print_mev(cerium: &CrystalFieldIon) {
        println!();
        println!("Energy levels [meV]:");
        for level in cerium.levels() {
            let energy = Energy(level.energy, Kelvin).to(MilliElectronVolt);

            println!("{:.4}\t{}", energy.value(), level.degeneracy);
        }
    }
}
