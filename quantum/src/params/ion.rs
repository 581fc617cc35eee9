use std::fmt::Display;

use serde::Serialize;

use crate::spins::DoubleSpin;

/// Stevens multiplicative factors of the rank 2, 4 and 6 operator equivalents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StevensFactors {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

/// Ground multiplet properties of a rare-earth ion.
/// To create a tabulated ion use [`crate::params::ion_factory`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ion {
    name: String,
    spin: DoubleSpin,
    lande: f64,
    stevens: StevensFactors,
}

impl Ion {
    pub fn new(name: &str, spin: DoubleSpin, lande: f64, stevens: StevensFactors) -> Self {
        Self {
            name: name.to_string(),
            spin,
            lande,
            stevens,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spin(&self) -> DoubleSpin {
        self.spin
    }

    /// Total angular momentum `J`.
    pub fn j(&self) -> f64 {
        self.spin.value()
    }

    /// Number of states in the ground multiplet, `2J + 1`.
    pub fn j2p1(&self) -> usize {
        self.spin.dim()
    }

    /// Landé g-factor.
    pub fn gj(&self) -> f64 {
        self.lande
    }

    pub fn stevens(&self) -> StevensFactors {
        self.stevens
    }
}

impl Display for Ion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} energy levels, J = {}, gJ = {}",
            self.j2p1(),
            self.j(),
            self.lande
        )?;
        write!(
            f,
            "alpha = {}, beta = {}, gamma = {}",
            self.stevens.alpha, self.stevens.beta, self.stevens.gamma
        )
    }
}
