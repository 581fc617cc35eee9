use std::fmt::Display;

use faer::{Mat, prelude::c64};
use log::debug;
use quantum::{
    params::{
        ion::{Ion, StevensFactors},
        ion_factory::create_ion,
    },
    spins::DoubleSpin,
    units::field_units::{FieldUnit, MagneticField, field_vector_tesla},
};
use serde::Serialize;

use crate::{
    cf_params::{CfArg, CfParams},
    error::{CrystalFieldError, Result},
    hamiltonian::{Hamiltonian, HamiltonianBuilder},
    levels::{Closeness, DegenerateLevels, Direction, Level},
    spectrum::Spectrum,
};

/// Numerical settings of the diagonalization and level clustering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolverConfig {
    pub closeness: Closeness,
    /// Largest accepted imaginary part of an eigenvalue relative to the largest eigenvalue modulus.
    pub imag_tolerance: f64,
    /// Sign of the `J_z` projections ordering the basis.
    pub convention: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            closeness: Closeness::default(),
            imag_tolerance: 1e-9,
            convention: 1.,
        }
    }
}

impl SolverConfig {
    pub fn with_closeness(mut self, closeness: Closeness) -> Self {
        self.closeness = closeness;

        self
    }

    pub fn with_imag_tolerance(mut self, imag_tolerance: f64) -> Self {
        self.imag_tolerance = imag_tolerance;

        self
    }

    pub fn with_convention(mut self, convention: f64) -> Self {
        self.convention = convention;

        self
    }
}

/// Rare-earth ion in a crystal field and a magnetic field, not yet solved.
#[derive(Clone, Debug)]
pub struct IonProblem {
    ion: Ion,
    field: [f64; 3],
    cf_params: CfParams,
    config: SolverConfig,
}

impl IonProblem {
    /// Creates the problem of a tabulated ion, the field is given in Tesla.
    pub fn new(name: &str, field: [f64; 3], cf_params: CfParams) -> Result<Self> {
        let ion = create_ion(name).ok_or_else(|| CrystalFieldError::UnknownIon(name.to_string()))?;

        Ok(Self::with_ion(ion, field, cf_params))
    }

    /// Creates the problem with parameters in the list form `[symmetry, coeff1, coeff2, ...]`.
    pub fn from_list(name: &str, field: [f64; 3], args: &[CfArg]) -> Result<Self> {
        let cf_params = CfParams::from_args(args)?;

        Self::new(name, field, cf_params)
    }

    /// Creates the problem of an ion outside the table from its total angular momentum `j`,
    /// Lande factor and Stevens factors.
    pub fn with_momentum(
        name: &str,
        j: f64,
        gj: f64,
        stevens: StevensFactors,
        field: [f64; 3],
        cf_params: CfParams,
    ) -> Result<Self> {
        let spin = DoubleSpin::try_from(j)?;

        Ok(Self::with_ion(Ion::new(name, spin, gj, stevens), field, cf_params))
    }

    pub fn with_ion(ion: Ion, field: [f64; 3], cf_params: CfParams) -> Self {
        Self {
            ion,
            field,
            cf_params,
            config: SolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;

        self
    }

    pub fn with_field<U: FieldUnit>(mut self, field: [MagneticField<U>; 3]) -> Self {
        self.field = field_vector_tesla(field);

        self
    }

    pub fn ion(&self) -> &Ion {
        &self.ion
    }

    pub fn field(&self) -> [f64; 3] {
        self.field
    }

    pub fn cf_params(&self) -> &CfParams {
        &self.cf_params
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn hamiltonian(&self) -> Hamiltonian {
        HamiltonianBuilder::new(&self.ion, &self.cf_params)
            .with_field(self.field)
            .with_convention(self.config.convention)
            .build()
    }

    /// Builds and diagonalizes the Hamiltonian and groups the degenerate levels.
    pub fn solve(&self) -> Result<CrystalFieldIon> {
        let hamiltonian = self.hamiltonian();
        let spectrum = Spectrum::solve(&hamiltonian, self.ion.gj(), self.config.imag_tolerance)?;

        let squared = spectrum.j_ops().each_ref().map(|j| j.abs_squared());
        let degenerate = DegenerateLevels::new(
            spectrum.energies(),
            squared.each_ref(),
            self.config.closeness,
        );
        debug!(
            "solved {} with {} levels, splitting {:.4} K",
            self.ion.name(),
            degenerate.len(),
            spectrum.energies().last().copied().unwrap_or_default()
        );

        Ok(CrystalFieldIon {
            problem: self.clone(),
            hamiltonian,
            spectrum,
            squared,
            degenerate,
        })
    }
}

/// Solved crystal field problem of a single ion.
#[derive(Clone, Debug)]
pub struct CrystalFieldIon {
    problem: IonProblem,
    hamiltonian: Hamiltonian,
    spectrum: Spectrum,
    squared: [Mat<f64>; 3],
    degenerate: DegenerateLevels,
}

impl CrystalFieldIon {
    /// Solves the problem of a tabulated ion with the default configuration.
    pub fn new(name: &str, field: [f64; 3], cf_params: CfParams) -> Result<Self> {
        IonProblem::new(name, field, cf_params)?.solve()
    }

    pub fn problem(&self) -> &IonProblem {
        &self.problem
    }

    pub fn ion(&self) -> &Ion {
        &self.problem.ion
    }

    pub fn name(&self) -> &str {
        self.problem.ion.name()
    }

    pub fn j(&self) -> f64 {
        self.problem.ion.j()
    }

    pub fn gj(&self) -> f64 {
        self.problem.ion.gj()
    }

    pub fn j2p1(&self) -> usize {
        self.problem.ion.j2p1()
    }

    pub fn cf_params(&self) -> &CfParams {
        &self.problem.cf_params
    }

    /// Magnetic field in Tesla.
    pub fn field(&self) -> [f64; 3] {
        self.problem.field
    }

    pub fn field_size(&self) -> f64 {
        self.problem.field.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Unit vector along the field, `None` for zero field.
    pub fn field_direction(&self) -> Option<[f64; 3]> {
        let size = self.field_size();

        (size > 0.).then(|| self.problem.field.map(|x| x / size))
    }

    pub fn hamiltonian(&self) -> &Mat<c64> {
        self.hamiltonian.matrix()
    }

    pub fn raw_energies(&self) -> &[f64] {
        self.spectrum.raw_energies()
    }

    /// Ascending energies of all states in Kelvin with the ground state at zero.
    pub fn energies(&self) -> &[f64] {
        self.spectrum.energies()
    }

    pub fn eigenvectors(&self) -> &Mat<c64> {
        self.spectrum.vectors()
    }

    pub fn jx(&self) -> &Mat<c64> {
        &self.spectrum.j_ops()[0]
    }

    pub fn jy(&self) -> &Mat<c64> {
        &self.spectrum.j_ops()[1]
    }

    pub fn jz(&self) -> &Mat<c64> {
        &self.spectrum.j_ops()[2]
    }

    /// `|<a| J_i |b>|^2` between eigenstates for `i = x, y, z`.
    pub fn j_squared(&self) -> &[Mat<f64>; 3] {
        &self.squared
    }

    pub fn moments(&self) -> &[[f64; 3]] {
        self.spectrum.moments()
    }

    pub fn levels(&self) -> &[Level] {
        self.degenerate.levels()
    }

    pub fn degenerate(&self) -> &DegenerateLevels {
        &self.degenerate
    }

    /// Squared transition matrix between degenerate levels.
    pub fn degenerate_transitions(&self, direction: Direction) -> &Mat<f64> {
        self.degenerate.transitions(direction)
    }

    pub fn level_scheme(&self) -> LevelScheme {
        LevelScheme {
            ion: self.name().to_string(),
            field: self.field(),
            cf_params: self.cf_params().clone(),
            levels: self.levels().to_vec(),
            energies: self.energies().to_vec(),
            moments: self.moments().to_vec(),
        }
    }
}

impl Display for CrystalFieldIon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Energy levels:")?;
        for (i, level) in self.levels().iter().enumerate() {
            writeln!(
                f,
                "E({i}) =\t{:.4}\t{:2}fold-degenerated",
                level.energy, level.degeneracy
            )?;
        }

        Ok(())
    }
}

/// Serializable summary of a solved ion.
#[derive(Clone, Debug, Serialize)]
pub struct LevelScheme {
    pub ion: String,
    pub field: [f64; 3],
    pub cf_params: CfParams,
    pub levels: Vec<Level>,
    pub energies: Vec<f64>,
    pub moments: Vec<[f64; 3]>,
}

#[cfg(test)]
mod test {
    use quantum::{
        assert_approx_eq,
        params::ion::StevensFactors,
        units::field_units::{Gauss, MagneticField},
    };

    use crate::{
        cf_params::{CfArg, CfParams, Symmetry},
        consts::Consts,
        error::CrystalFieldError,
    };

    use super::{CrystalFieldIon, IonProblem, SolverConfig};

    #[test]
    fn cubic_cerium() {
        let args: Vec<CfArg> = vec!["c".into(), CfArg::Value(10.0)];
        let ce = IonProblem::from_list("Ce", [0., 0., 0.], &args)
            .unwrap()
            .solve()
            .unwrap();

        assert_eq!(ce.levels().len(), 2);
        assert_eq!(ce.levels()[0].degeneracy, 2);
        assert_eq!(ce.levels()[1].degeneracy, 4);
        assert_approx_eq!(ce.levels()[1].energy, 3600., 1e-9);

        let rendered = ce.to_string();
        assert!(rendered.starts_with("Energy levels:\nE(0) =\t0.0000\t 2fold-degenerated\n"));
        assert!(rendered.ends_with("E(1) =\t3600.0000\t 4fold-degenerated\n"));
        assert!(ce.field_direction().is_none());
    }

    #[test]
    fn unknown_ion() {
        let err = IonProblem::new("Xx", [0.; 3], CfParams::default()).unwrap_err();
        assert_eq!(err, CrystalFieldError::UnknownIon("Xx".into()));

        let err = IonProblem::from_list("Ce", [0.; 3], &[CfArg::Token(String::new())]).unwrap_err();
        assert!(matches!(err, CrystalFieldError::MalformedList(_)));
    }

    #[test]
    fn field_units() {
        let problem = IonProblem::new("Er", [0.; 3], CfParams::default())
            .unwrap()
            .with_field([
                MagneticField(0., Gauss),
                MagneticField(3e4, Gauss),
                MagneticField(4e4, Gauss),
            ]);
        let er = problem.solve().unwrap();

        assert_eq!(er.field(), [0., 3., 4.]);
        assert_approx_eq!(er.field_size(), 5., 1e-12);
        let direction = er.field_direction().unwrap();
        assert_approx_eq!(direction[1], 0.6, 1e-12);
        assert_approx_eq!(direction[2], 0.8, 1e-12);

        // pure Zeeman splitting of 16 equidistant states
        assert_eq!(er.levels().len(), 16);
        assert_eq!(er.j2p1(), 16);
    }

    #[test]
    fn opposite_convention() {
        let cfp = CfParams::positional(Symmetry::Hexagonal, &[1.2, -0.01, 0.003, 1e-5]);
        let standard = CrystalFieldIon::new("Dy", [0.5, 0., 1.], cfp.clone()).unwrap();
        let reversed = IonProblem::new("Dy", [0.5, 0., 1.], cfp)
            .unwrap()
            .with_config(SolverConfig::default().with_convention(-1.))
            .solve()
            .unwrap();

        for (a, b) in standard.energies().iter().zip(reversed.energies()) {
            assert!((a - b).abs() < 1e-8);
        }
        assert_eq!(standard.levels().len(), reversed.levels().len());
    }

    #[test]
    fn custom_momentum() {
        let stevens = StevensFactors {
            alpha: 0.,
            beta: 0.,
            gamma: 0.,
        };

        let err = IonProblem::with_momentum("X", 1.3, 2., stevens, [0.; 3], CfParams::default()).unwrap_err();
        assert_eq!(err, CrystalFieldError::InvalidMomentum(1.3));
        let err = IonProblem::with_momentum("X", -0.5, 2., stevens, [0.; 3], CfParams::default()).unwrap_err();
        assert_eq!(err, CrystalFieldError::InvalidMomentum(-0.5));

        // free spin 1/2 in 1 T splits by g mu_B B
        let spin = IonProblem::with_momentum("X", 0.5, 2., stevens, [0., 0., 1.], CfParams::default())
            .unwrap()
            .solve()
            .unwrap();
        assert_eq!(spin.j2p1(), 2);
        assert_eq!(spin.name(), "X");
        assert_approx_eq!(spin.energies()[1], 2. * Consts::BOHR_MAG, 1e-9);
    }
}
