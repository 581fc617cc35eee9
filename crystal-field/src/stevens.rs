use faer::{Mat, prelude::c64};
use quantum::operators::{JOperators, Operator, ProjectionBasis};
use serde::Serialize;

use crate::cf_params::CfCoefficient;

/// Stevens operator equivalents `O_k^q` of rank `k` and order `q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StevensOperator {
    O20,
    O22,
    O40,
    O42,
    O43,
    O44,
    O60,
    O62,
    O63,
    O64,
    O66,
}

impl StevensOperator {
    pub const ALL: [StevensOperator; 11] = [
        Self::O20,
        Self::O22,
        Self::O40,
        Self::O42,
        Self::O43,
        Self::O44,
        Self::O60,
        Self::O62,
        Self::O63,
        Self::O64,
        Self::O66,
    ];

    pub fn rank(self) -> u32 {
        match self {
            Self::O20 | Self::O22 => 2,
            Self::O40 | Self::O42 | Self::O43 | Self::O44 => 4,
            Self::O60 | Self::O62 | Self::O63 | Self::O64 | Self::O66 => 6,
        }
    }

    pub fn order(self) -> u32 {
        match self {
            Self::O20 | Self::O40 | Self::O60 => 0,
            Self::O22 | Self::O42 | Self::O62 => 2,
            Self::O43 | Self::O63 => 3,
            Self::O44 | Self::O64 => 4,
            Self::O66 => 6,
        }
    }

    pub fn build(self, basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        StevensBasis::new(basis).operator(self)
    }
}

impl From<CfCoefficient> for StevensOperator {
    fn from(value: CfCoefficient) -> Self {
        match value {
            CfCoefficient::B20 => Self::O20,
            CfCoefficient::B22 => Self::O22,
            CfCoefficient::B40 => Self::O40,
            CfCoefficient::B42 => Self::O42,
            CfCoefficient::B44 => Self::O44,
            CfCoefficient::B60 => Self::O60,
            CfCoefficient::B62 => Self::O62,
            CfCoefficient::B64 => Self::O64,
            CfCoefficient::B66 => Self::O66,
        }
    }
}

/// Angular momentum matrices shared by the Stevens operators of one multiplet.
pub struct StevensBasis {
    casimir: f64,
    identity: Mat<c64>,
    proj_z: Operator<Mat<c64>>,
    ladder_plus: Operator<Mat<c64>>,
    ladder_minus: Operator<Mat<c64>>,
}

impl StevensBasis {
    pub fn new(basis: &ProjectionBasis) -> Self {
        Self {
            casimir: basis.spin().casimir(),
            identity: JOperators::identity(basis).into_backed(),
            proj_z: JOperators::proj_z(basis),
            ladder_plus: JOperators::ladder_plus(basis),
            ladder_minus: JOperators::ladder_minus(basis),
        }
    }

    pub fn operator(&self, operator: StevensOperator) -> Operator<Mat<c64>> {
        let jj = self.casimir;
        let e = &self.identity;

        let mat = match operator {
            StevensOperator::O20 => linear_combination(&[(3., &self.jz(2)), (-jj, e)]),
            StevensOperator::O22 => linear_combination(&[(0.5, &self.ladders(2))]),
            StevensOperator::O40 => linear_combination(&[
                (35., &self.jz(4)),
                (25. - 30. * jj, &self.jz(2)),
                (jj * (3. * jj - 6.), e),
            ]),
            StevensOperator::O42 => {
                let m1 = linear_combination(&[(7., &self.jz(2)), (-(jj + 5.), e)]);

                symmetrized(&m1, &self.ladders(2))
            }
            StevensOperator::O43 => symmetrized(&self.jz(1), &self.ladders(3)),
            StevensOperator::O44 => linear_combination(&[(0.5, &self.ladders(4))]),
            StevensOperator::O60 => linear_combination(&[
                (231., &self.jz(6)),
                (735. - 315. * jj, &self.jz(4)),
                (105. * jj * jj - 525. * jj + 294., &self.jz(2)),
                (-5. * jj.powi(3) + 40. * jj * jj - 60. * jj, e),
            ]),
            StevensOperator::O62 => {
                let m1 = linear_combination(&[
                    (33., &self.jz(4)),
                    (-(18. * jj + 123.), &self.jz(2)),
                    (jj * jj + 10. * jj + 102., e),
                ]);

                symmetrized(&m1, &self.ladders(2))
            }
            StevensOperator::O63 => {
                let m1 = linear_combination(&[(11., &self.jz(3)), (-(59. + 3. * jj), &self.jz(1))]);

                symmetrized(&m1, &self.ladders(3))
            }
            StevensOperator::O64 => {
                let m1 = linear_combination(&[(11., &self.jz(2)), (-(jj + 38.), e)]);

                symmetrized(&m1, &self.ladders(4))
            }
            StevensOperator::O66 => linear_combination(&[(0.5, &self.ladders(6))]),
        };

        Operator::new(mat)
    }

    fn jz(&self, n: u32) -> Mat<c64> {
        self.proj_z.pow(n).into_backed()
    }

    /// `J_+^n + J_-^n`
    fn ladders(&self, n: u32) -> Mat<c64> {
        let plus = self.ladder_plus.pow(n).into_backed();
        let minus = self.ladder_minus.pow(n).into_backed();

        linear_combination(&[(1., &plus), (1., &minus)])
    }
}

/// `(M_1 M_2 + M_2 M_1) / 4`
fn symmetrized(m1: &Mat<c64>, m2: &Mat<c64>) -> Mat<c64> {
    let first = m1 * m2;
    let second = m2 * m1;

    linear_combination(&[(0.25, &first), (0.25, &second)])
}

/// Returns `sum_i c_i M_i` of equally shaped matrices.
pub(crate) fn linear_combination(terms: &[(f64, &Mat<c64>)]) -> Mat<c64> {
    let (nrows, ncols) = terms
        .first()
        .map_or((0, 0), |(_, m)| (m.nrows(), m.ncols()));

    Mat::from_fn(nrows, ncols, |i, j| {
        terms
            .iter()
            .fold(c64::new(0., 0.), |acc, (c, m)| acc + m[(i, j)] * *c)
    })
}
