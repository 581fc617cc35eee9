use quantum::spins::SpinError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrystalFieldError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CrystalFieldError {
    #[error("ion '{0}' is not tabulated")]
    UnknownIon(String),

    #[error("angular momentum has to be a positive multiple of 1/2, got {0}")]
    InvalidMomentum(f64),

    #[error("matrix of shape {got:?} does not match the basis dimension {expected}")]
    ShapeMismatch { expected: usize, got: (usize, usize) },

    #[error("Hamiltonian has complex eigenvalues, largest imaginary part {max_imag:e}")]
    ComplexEnergies { max_imag: f64 },

    #[error("diagonalization failed: {0}")]
    Diagonalization(String),

    #[error("susceptibility is undefined for zero magnetic field")]
    ZeroField,

    #[error("temperature has to be positive and finite, got {0}")]
    InvalidTemperature(f64),

    #[error("unknown crystal field parameter '{0}'")]
    UnknownParameter(String),

    #[error("malformed crystal field parameter list: {0}")]
    MalformedList(String),
}

impl From<SpinError> for CrystalFieldError {
    fn from(value: SpinError) -> Self {
        match value {
            SpinError::InvalidMomentum(j) => Self::InvalidMomentum(j),
        }
    }
}
