use crystal_field::{CfParams, IonProblem, Symmetry};
use quantum::params::ion::StevensFactors;

/// Synthetic ion with `2J = doubled` and all orthorhombic coefficients present.
pub fn setup(doubled: u32) -> IonProblem {
    let stevens = StevensFactors {
        alpha: 0.,
        beta: 0.,
        gamma: 0.,
    };
    let cf_params = CfParams::positional(
        Symmetry::Orthorhombic,
        &[0.3, -0.2, 0.01, 0.02, -0.01, 1e-4, 2e-4, -1e-4, 3e-4],
    );

    IonProblem::with_momentum("bench", doubled as f64 / 2., 1.25, stevens, [0.5, 0.2, 1.], cf_params)
        .expect("doubled spin has to be positive")
}
