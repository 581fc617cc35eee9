use faer::{Mat, prelude::c64};
use log::debug;
use quantum::{
    operators::{JOperators, Operator, ProjectionBasis},
    params::ion::Ion,
};

use crate::{
    cf_params::{CfCoefficient, CfParams},
    consts::Consts,
    error::{CrystalFieldError, Result},
    stevens::{StevensBasis, StevensOperator, linear_combination},
};

/// Builds the crystal field and Zeeman Hamiltonian of a single ion multiplet
///
/// `H = sum_kq B_kq O_kq + mu_B g_J (J_x H_x + J_y H_y + J_z H_z)`
/// in Kelvin, with the field in Tesla.
#[derive(Clone, Debug)]
pub struct HamiltonianBuilder<'a> {
    ion: &'a Ion,
    cf_params: &'a CfParams,
    field: [f64; 3],
    convention: f64,
    bohr_magneton: f64,
}

impl<'a> HamiltonianBuilder<'a> {
    pub fn new(ion: &'a Ion, cf_params: &'a CfParams) -> Self {
        Self {
            ion,
            cf_params,
            field: [0.; 3],
            convention: 1.,
            bohr_magneton: Consts::BOHR_MAG,
        }
    }

    pub fn with_field(mut self, field: [f64; 3]) -> Self {
        self.field = field;

        self
    }

    pub fn with_convention(mut self, convention: f64) -> Self {
        self.convention = convention;

        self
    }

    pub fn with_custom_bohr_magneton(mut self, bohr_magneton: f64) -> Self {
        self.bohr_magneton = bohr_magneton;

        self
    }

    pub fn build(self) -> Hamiltonian {
        let basis = ProjectionBasis::new(self.ion.spin(), self.convention);
        let stevens = StevensBasis::new(&basis);

        let cf_terms: Vec<(f64, Operator<Mat<c64>>)> = CfCoefficient::ALL
            .into_iter()
            .map(|c| (self.cf_params.get(c), c))
            .filter(|(value, _)| *value != 0.)
            .map(|(value, c)| (value, stevens.operator(StevensOperator::from(c))))
            .collect();

        let zeeman_prop = self.bohr_magneton * self.ion.gj();
        let j_ops = [
            JOperators::proj_x(&basis),
            JOperators::proj_y(&basis),
            JOperators::proj_z(&basis),
        ];

        let mut terms: Vec<(f64, &Mat<c64>)> = cf_terms.iter().map(|(b, o)| (*b, &**o)).collect();
        for (j_op, h) in j_ops.iter().zip(self.field) {
            if h != 0. {
                terms.push((zeeman_prop * h, &**j_op));
            }
        }

        let dim = basis.dim();
        let matrix = if terms.is_empty() {
            Mat::zeros(dim, dim)
        } else {
            linear_combination(&terms)
        };

        debug!(
            "built {dim}x{dim} Hamiltonian of {} with {} crystal field terms",
            self.ion.name(),
            cf_terms.len()
        );

        Hamiltonian {
            basis,
            operator: Operator::new(matrix),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Hamiltonian {
    basis: ProjectionBasis,
    operator: Operator<Mat<c64>>,
}

impl Hamiltonian {
    /// Wraps an arbitrary matrix over `basis`, e.g. a custom operator.
    pub fn custom(basis: ProjectionBasis, matrix: Mat<c64>) -> Result<Self> {
        if matrix.nrows() != basis.dim() || matrix.ncols() != basis.dim() {
            return Err(CrystalFieldError::ShapeMismatch {
                expected: basis.dim(),
                got: (matrix.nrows(), matrix.ncols()),
            });
        }

        Ok(Self {
            basis,
            operator: Operator::new(matrix),
        })
    }

    pub fn basis(&self) -> &ProjectionBasis {
        &self.basis
    }

    pub fn operator(&self) -> &Operator<Mat<c64>> {
        &self.operator
    }

    pub fn matrix(&self) -> &Mat<c64> {
        &self.operator
    }

    pub fn dim(&self) -> usize {
        self.basis.dim()
    }
}

#[cfg(test)]
mod test {
    use faer::{Mat, prelude::c64};
    use quantum::{
        assert_approx_eq, operators::ProjectionBasis, params::ion_factory::create_ion,
        spins::DoubleSpin,
    };

    use crate::{
        cf_params::{CfCoefficient, CfParams, Symmetry},
        consts::Consts,
        error::CrystalFieldError,
    };

    use super::{Hamiltonian, HamiltonianBuilder};

    #[test]
    fn empty_hamiltonian() {
        let ion = create_ion("Ce").unwrap();
        let cfp = CfParams::default();

        let hamiltonian = HamiltonianBuilder::new(&ion, &cfp).build();
        assert_eq!(hamiltonian.dim(), 6);
        assert_approx_eq!(mat => hamiltonian.matrix(), Mat::<c64>::zeros(6, 6), 0.);
    }

    #[test]
    fn zeeman_along_z() {
        let ion = create_ion("Ce").unwrap();
        let cfp = CfParams::default();

        let hamiltonian = HamiltonianBuilder::new(&ion, &cfp)
            .with_field([0., 0., 2.])
            .build();

        let factor = 2. * Consts::BOHR_MAG * 6. / 7.;
        for (i, m) in [2.5, 1.5, 0.5, -0.5, -1.5, -2.5].into_iter().enumerate() {
            assert_approx_eq!(hamiltonian.matrix()[(i, i)].re, factor * m, 1e-12);
        }
        assert_approx_eq!(hamiltonian.matrix()[(0, 1)].norm(), 0., 1e-12);
    }

    #[test]
    fn crystal_field_terms() {
        let ion = create_ion("Ho").unwrap();
        let cfp = CfParams::named(
            Symmetry::Tetragonal,
            &[(CfCoefficient::B20, 0.5), (CfCoefficient::B44, -0.01)],
        );

        let hamiltonian = HamiltonianBuilder::new(&ion, &cfp)
            .with_field([1., 0., 0.])
            .build();
        let matrix = hamiltonian.matrix();

        let adjoint = hamiltonian.operator().adjoint();
        assert_approx_eq!(mat => matrix, &*adjoint, 1e-9);

        // <8| H |8> = B20 (3 * 64 - 72)
        assert_approx_eq!(matrix[(0, 0)].re, 0.5 * 120., 1e-12);
        // <8| H |4> = B44 / 2 <8| J_+^4 |4>
        let ladder: f64 = [4., 5., 6., 7.]
            .iter()
            .map(|m: &f64| (72. - m * (m + 1.)).sqrt())
            .product();
        assert_approx_eq!(matrix[(0, 4)].re, -0.005 * ladder, 1e-12);
    }

    #[test]
    fn custom_bohr_magneton() {
        let ion = create_ion("Er").unwrap();
        let cfp = CfParams::positional(Symmetry::Hexagonal, &[0.6, -3e-3]);

        let standard = HamiltonianBuilder::new(&ion, &cfp)
            .with_field([0.3, 0., 1.])
            .build();
        let doubled = HamiltonianBuilder::new(&ion, &cfp)
            .with_field([0.3, 0., 1.])
            .with_custom_bohr_magneton(2. * Consts::BOHR_MAG)
            .build();
        let field_free = HamiltonianBuilder::new(&ion, &cfp)
            .with_field([0.3, 0., 1.])
            .with_custom_bohr_magneton(0.)
            .build();

        // the Zeeman part scales with the magneton, the crystal field part does not
        let expected = Mat::from_fn(16, 16, |i, j| {
            2. * standard.matrix()[(i, j)] - field_free.matrix()[(i, j)]
        });
        assert_approx_eq!(mat => doubled.matrix(), &expected, 1e-12);

        let crystal_field = HamiltonianBuilder::new(&ion, &cfp).build();
        assert_approx_eq!(mat => field_free.matrix(), crystal_field.matrix(), 1e-12);
    }

    #[test]
    fn custom_matrix_shape() {
        let basis = ProjectionBasis::new(DoubleSpin::new(1.).unwrap(), 1.);

        let err = Hamiltonian::custom(basis.clone(), Mat::zeros(2, 2)).unwrap_err();
        assert_eq!(
            err,
            CrystalFieldError::ShapeMismatch {
                expected: 3,
                got: (2, 2)
            }
        );
        assert!(Hamiltonian::custom(basis.clone(), Mat::zeros(3, 2)).is_err());

        let hamiltonian = Hamiltonian::custom(basis, Mat::identity(3, 3)).unwrap();
        assert_eq!(hamiltonian.dim(), 3);
        assert_eq!(hamiltonian.operator()[(1, 1)], c64::new(1., 0.));
    }
}
