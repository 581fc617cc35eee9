use std::ops::Deref;

use faer::{Mat, MatRef, prelude::c64};

use crate::spins::DoubleSpin;

#[derive(Debug, Clone)]
pub struct Operator<M> {
    backed: M,
}

impl<M> Operator<M> {
    pub fn new(mat: M) -> Self {
        Self { backed: mat }
    }

    pub fn into_backed(self) -> M {
        self.backed
    }
}

impl Operator<Mat<c64>> {
    /// Creates the operator from the matrix elements `<m_bra| O |m_ket>`
    /// over the projection basis of `basis`.
    pub fn from_mel<F>(basis: &ProjectionBasis, mut mat_element: F) -> Self
    where
        F: FnMut(f64, f64) -> c64,
    {
        let ms = basis.projections();
        let mat = Mat::from_fn(ms.len(), ms.len(), |i, j| mat_element(ms[i], ms[j]));

        Self { backed: mat }
    }

    /// Creates the diagonal operator from the elements `<m| O |m>`.
    pub fn from_diagonal_mel<F>(basis: &ProjectionBasis, mut mat_element: F) -> Self
    where
        F: FnMut(f64) -> c64,
    {
        Self::from_mel(basis, |m_bra, m_ket| {
            if m_bra == m_ket {
                mat_element(m_ket)
            } else {
                c64::new(0., 0.)
            }
        })
    }

    /// Expresses the operator in the basis given by the columns of `vectors`, `U^† O U`.
    pub fn transformed(&self, vectors: MatRef<c64>) -> Self {
        let mat = vectors.adjoint() * (self.backed.as_ref() * vectors);

        Self { backed: mat }
    }

    /// Returns `[self, other] = self * other - other * self`.
    pub fn commutator(&self, other: &Self) -> Self {
        let mat = &self.backed * &other.backed - &other.backed * &self.backed;

        Self { backed: mat }
    }

    /// Returns the conjugate transpose of the operator.
    pub fn adjoint(&self) -> Self {
        Self {
            backed: self.backed.adjoint().to_owned(),
        }
    }

    /// Returns `self^n`, the identity for `n = 0`.
    pub fn pow(&self, n: u32) -> Self {
        let dim = self.backed.nrows();
        let mut mat = Mat::<c64>::identity(dim, dim);
        for _ in 0..n {
            mat = &mat * &self.backed;
        }

        Self { backed: mat }
    }

    /// Returns the element-wise squared modulus `|O_ij|^2`.
    pub fn abs_squared(&self) -> Mat<f64> {
        Mat::from_fn(self.backed.nrows(), self.backed.ncols(), |i, j| {
            self.backed[(i, j)].norm_sqr()
        })
    }

    /// Returns real parts of the diagonal elements.
    pub fn diagonal_re(&self) -> Vec<f64> {
        (0..self.backed.nrows()).map(|i| self.backed[(i, i)].re).collect()
    }
}

impl<M> Deref for Operator<M> {
    type Target = M;

    fn deref(&self) -> &Self::Target {
        &self.backed
    }
}

/// Basis of the `2J + 1` projection states of a single multiplet.
///
/// Index `k` holds `m_k = convention * (J - k)`, so for the default
/// convention `+1` the states are ordered from `m = J` down to `m = -J`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionBasis {
    spin: DoubleSpin,
    convention: f64,
    projections: Vec<f64>,
}

impl ProjectionBasis {
    /// Creates the basis, any negative `convention` is taken as `-1`.
    pub fn new(spin: DoubleSpin, convention: f64) -> Self {
        let convention = if convention < 0. { -1. } else { 1. };
        let projections = spin.projections().map(|m| convention * m).collect();

        Self {
            spin,
            convention,
            projections,
        }
    }

    pub fn spin(&self) -> DoubleSpin {
        self.spin
    }

    pub fn convention(&self) -> f64 {
        self.convention
    }

    pub fn projections(&self) -> &[f64] {
        &self.projections
    }

    pub fn dim(&self) -> usize {
        self.projections.len()
    }
}

/// Standard angular momentum operators of a single multiplet.
pub struct JOperators;

impl JOperators {
    pub fn identity(basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        Operator::from_diagonal_mel(basis, |_| c64::new(1., 0.))
    }

    pub fn proj_z(basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        Operator::from_diagonal_mel(basis, |m| c64::new(m, 0.))
    }

    pub fn ladder_plus(basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        let casimir = basis.spin().casimir();

        Operator::from_mel(basis, |m_bra, m_ket| {
            if m_bra == m_ket + 1. {
                c64::new((casimir - m_ket * (m_ket + 1.)).sqrt(), 0.)
            } else {
                c64::new(0., 0.)
            }
        })
    }

    pub fn ladder_minus(basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        Self::ladder_plus(basis).adjoint()
    }

    /// `J_x = (J_+ + J_-) / 2`
    pub fn proj_x(basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        let plus = Self::ladder_plus(basis);
        let minus = Self::ladder_minus(basis);

        let mat = Mat::from_fn(basis.dim(), basis.dim(), |i, j| {
            (plus[(i, j)] + minus[(i, j)]) * 0.5
        });

        Operator::new(mat)
    }

    /// `J_y = (J_+ - J_-) / 2i`
    pub fn proj_y(basis: &ProjectionBasis) -> Operator<Mat<c64>> {
        let plus = Self::ladder_plus(basis);
        let minus = Self::ladder_minus(basis);
        let factor = c64::new(0., -0.5);

        let mat = Mat::from_fn(basis.dim(), basis.dim(), |i, j| {
            (plus[(i, j)] - minus[(i, j)]) * factor
        });

        Operator::new(mat)
    }
}
