use crystal_field::{CfCoefficient, CfParams, Direction, IonProblem, Symmetry, neutron_intensity};
use quantum::utility::save_serialize;

pub struct NeutronSpectrumProblem;

impl NeutronSpectrumProblem {
    pub fn run() {
        let cf_params = CfParams::builder()
            .with_symmetry(Symmetry::Hexagonal)
            .with_coefficient(CfCoefficient::B20, 0.6)
            .with_coefficient(CfCoefficient::B40, -3e-3)
            .with_coefficient(CfCoefficient::B66, 5e-6)
            .build();

        let erbium = IonProblem::new("Er", [0., 0., 0.], cf_params)
            .and_then(|problem| problem.solve())
            .expect("could not solve erbium problem");
        println!("{erbium}");

        for temperature in [2., 20., 100.] {
            let spectrum = neutron_intensity(&erbium, temperature, Direction::Powder)
                .expect("could not calculate neutron intensities");

            println!("T = {temperature} K");
            for (jump, intensity) in spectrum.inelastic().filter(|x| x.0 > 0.) {
                println!("dE = {jump:.4} K\tI = {intensity:.4e} barn");
            }

            save_serialize(&format!("erbium_neutrons_{temperature}K"), &spectrum)
                .expect("could not save neutron spectrum");
        }
    }
}
