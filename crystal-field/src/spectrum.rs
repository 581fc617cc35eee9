use faer::{Mat, prelude::c64};
use log::debug;
use quantum::operators::{JOperators, Operator};

use crate::{
    error::{CrystalFieldError, Result},
    hamiltonian::Hamiltonian,
};

/// Eigen decomposition of the Hamiltonian ordered by energy.
///
/// Energies are shifted so that the ground state lies at zero,
/// angular momentum operators are expressed in the ordered eigenbasis.
#[derive(Clone, Debug)]
pub struct Spectrum {
    raw_energies: Vec<f64>,
    energies: Vec<f64>,
    vectors: Mat<c64>,
    j_ops: [Operator<Mat<c64>>; 3],
    moments: Vec<[f64; 3]>,
}

impl Spectrum {
    /// Diagonalizes `hamiltonian`, failing if any eigenvalue has imaginary part
    /// above `imag_tolerance` relative to the largest eigenvalue modulus.
    pub fn solve(hamiltonian: &Hamiltonian, lande: f64, imag_tolerance: f64) -> Result<Self> {
        let eigen = hamiltonian
            .matrix()
            .as_ref()
            .eigen()
            .map_err(|err| CrystalFieldError::Diagonalization(format!("{err:?}")))?;

        let values: Vec<c64> = eigen.S().column_vector().iter().copied().collect();
        let raw_vectors = eigen.U().to_owned();

        let max_imag = values.iter().fold(0., |acc: f64, x| acc.max(x.im.abs()));
        let scale = values.iter().fold(0., |acc: f64, x| acc.max(x.norm()));
        let threshold = if scale > 0. { imag_tolerance * scale } else { imag_tolerance };
        if max_imag > threshold {
            return Err(CrystalFieldError::ComplexEnergies { max_imag });
        }
        if max_imag > 0. {
            debug!("discarding imaginary parts of eigenvalues up to {max_imag:e}");
        }

        let raw_energies: Vec<f64> = values.iter().map(|x| x.re).collect();
        let ground = raw_energies.iter().copied().fold(f64::INFINITY, f64::min);

        let mut order: Vec<usize> = (0..raw_energies.len()).collect();
        order.sort_by(|&a, &b| raw_energies[a].total_cmp(&raw_energies[b]));

        let energies = order.iter().map(|&i| raw_energies[i] - ground).collect();

        let mut vectors = Mat::from_fn(raw_vectors.nrows(), order.len(), |i, j| {
            raw_vectors[(i, order[j])]
        });
        orthonormalize(&mut vectors);
        normalize_signs(&mut vectors);

        let basis = hamiltonian.basis();
        let j_ops = [
            JOperators::proj_x(basis).transformed(vectors.as_ref()),
            JOperators::proj_y(basis).transformed(vectors.as_ref()),
            JOperators::proj_z(basis).transformed(vectors.as_ref()),
        ];

        let diagonals = j_ops.each_ref().map(|j| j.diagonal_re());
        let moments = (0..vectors.ncols())
            .map(|i| diagonals.each_ref().map(|d| -lande * d[i]))
            .collect();

        Ok(Self {
            raw_energies,
            energies,
            vectors,
            j_ops,
            moments,
        })
    }

    /// Eigenvalues in the order returned by the diagonalization, not shifted.
    pub fn raw_energies(&self) -> &[f64] {
        &self.raw_energies
    }

    /// Ascending energies with the ground state at zero.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Eigenvectors as columns, ordered as [`Spectrum::energies`].
    pub fn vectors(&self) -> &Mat<c64> {
        &self.vectors
    }

    /// `J_x`, `J_y` and `J_z` in the eigenbasis.
    pub fn j_ops(&self) -> &[Operator<Mat<c64>>; 3] {
        &self.j_ops
    }

    /// Magnetic moments `-g_J <i| J_a |i>` of every eigenstate along `x`, `y` and `z`.
    pub fn moments(&self) -> &[[f64; 3]] {
        &self.moments
    }

    pub fn dim(&self) -> usize {
        self.energies.len()
    }
}

/// Modified Gram-Schmidt over the columns in their order.
///
/// Eigenvectors of distinct levels are already orthogonal,
/// so this only mixes vectors inside degenerate subspaces.
fn orthonormalize(vectors: &mut Mat<c64>) {
    let (nrows, ncols) = (vectors.nrows(), vectors.ncols());

    for j in 0..ncols {
        for k in 0..j {
            let overlap = (0..nrows).fold(c64::new(0., 0.), |acc, i| {
                acc + vectors[(i, k)].conj() * vectors[(i, j)]
            });

            for i in 0..nrows {
                let projected = vectors[(i, k)] * overlap;
                vectors[(i, j)] -= projected;
            }
        }

        let norm = (0..nrows)
            .map(|i| vectors[(i, j)].norm_sqr())
            .sum::<f64>()
            .sqrt();
        if norm > 0. {
            for i in 0..nrows {
                vectors[(i, j)] /= norm;
            }
        }
    }
}

/// Flips every eigenvector whose component sum has negative real part,
/// or zero real part and negative imaginary part.
fn normalize_signs(vectors: &mut Mat<c64>) {
    for j in 0..vectors.ncols() {
        let sum = (0..vectors.nrows()).fold(c64::new(0., 0.), |acc, i| acc + vectors[(i, j)]);

        if sum.re < 0. || (sum.re == 0. && sum.im < 0.) {
            for i in 0..vectors.nrows() {
                vectors[(i, j)] = -vectors[(i, j)];
            }
        }
    }
}
