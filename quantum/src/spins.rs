use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SpinError {
    #[error("angular momentum has to be a positive multiple of 1/2, got {0}")]
    InvalidMomentum(f64),
}

/// Total angular momentum stored as the number of halves, `J = 0.5 * doubled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DoubleSpin(u32);

impl DoubleSpin {
    /// Creates a total angular momentum from its doubled value, `2J`.
    pub fn from_doubled(doubled: u32) -> Result<Self, SpinError> {
        if doubled == 0 {
            return Err(SpinError::InvalidMomentum(0.));
        }

        Ok(Self(doubled))
    }

    /// Creates a total angular momentum from `J`, which has to be a positive multiple of 1/2.
    pub fn new(j: f64) -> Result<Self, SpinError> {
        let doubled = 2. * j;
        if !j.is_finite() || j <= 0. || doubled.fract() != 0. || doubled > u32::MAX as f64 {
            return Err(SpinError::InvalidMomentum(j));
        }

        Ok(Self(doubled as u32))
    }

    pub fn doubled(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f64 {
        self.0 as f64 / 2.
    }

    /// Dimension of the multiplet, `2J + 1`.
    pub fn dim(self) -> usize {
        self.0 as usize + 1
    }

    /// Value of `J(J + 1)`.
    pub fn casimir(self) -> f64 {
        let j = self.value();

        j * (j + 1.)
    }

    /// Magnetic quantum numbers from `J` down to `-J`.
    pub fn projections(self) -> impl Iterator<Item = f64> {
        let doubled = self.0 as i64;

        (0..=doubled).map(move |k| (doubled - 2 * k) as f64 / 2.)
    }
}

impl Display for DoubleSpin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}/2", self.0)
        }
    }
}

impl TryFrom<f64> for DoubleSpin {
    type Error = SpinError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
