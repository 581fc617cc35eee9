use std::{convert::Infallible, fmt::Display, str::FromStr};

use faer::Mat;
use log::debug;
use serde::Serialize;

/// Closeness of two energies, `|reference - value| <= atol + rtol * |value|`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Closeness {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Closeness {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Closeness {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    pub fn is_close(&self, reference: f64, value: f64) -> bool {
        (reference - value).abs() <= self.atol + self.rtol * value.abs()
    }
}

/// Degenerate energy level with its multiplicity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Level {
    pub energy: f64,
    pub degeneracy: usize,
}

/// Direction of the transition matrix elements, `Powder` is the polycrystal average.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    X,
    Y,
    Z,
    #[default]
    Powder,
}

impl Direction {
    /// Parses `x`, `y` or `z`, anything else is the powder average.
    pub fn from_token(token: &str) -> Self {
        match token {
            "x" => Self::X,
            "y" => Self::Y,
            "z" => Self::Z,
            _ => Self::Powder,
        }
    }
}

impl FromStr for Direction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::X => write!(f, "x"),
            Direction::Y => write!(f, "y"),
            Direction::Z => write!(f, "z"),
            Direction::Powder => write!(f, "powder"),
        }
    }
}

/// Groups ascending energies into degenerate levels.
///
/// A new level starts whenever the energy is not close to the first energy of the current level.
pub fn cluster_levels(energies: &[f64], closeness: Closeness) -> Vec<Level> {
    let mut levels: Vec<Level> = Vec::new();

    for &energy in energies {
        match levels.last_mut() {
            Some(level) if closeness.is_close(level.energy, energy) => level.degeneracy += 1,
            _ => levels.push(Level {
                energy,
                degeneracy: 1,
            }),
        }
    }

    levels
}

/// Squared transition matrix elements summed over degenerate levels.
#[derive(Clone, Debug)]
pub struct DegenerateLevels {
    levels: Vec<Level>,
    transitions: [Mat<f64>; 3],
    powder: Mat<f64>,
}

impl DegenerateLevels {
    /// Clusters `energies` and sums `|<a| J_i |b>|^2` given by `squared`
    /// over all states `a`, `b` of every pair of levels.
    pub fn new(energies: &[f64], squared: [&Mat<f64>; 3], closeness: Closeness) -> Self {
        let levels = cluster_levels(energies, closeness);
        debug!(
            "found {} degenerate levels out of {} states",
            levels.len(),
            energies.len()
        );

        let transitions = squared.map(|x| block_sums(x, &levels));
        let n = levels.len();
        let powder = Mat::from_fn(n, n, |i, j| {
            2. / 3. * (transitions[0][(i, j)] + transitions[1][(i, j)] + transitions[2][(i, j)])
        });

        Self {
            levels,
            transitions,
            powder,
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn energies(&self) -> Vec<f64> {
        self.levels.iter().map(|x| x.energy).collect()
    }

    pub fn degeneracies(&self) -> Vec<usize> {
        self.levels.iter().map(|x| x.degeneracy).collect()
    }

    /// Squared transition matrix between degenerate levels along `direction`.
    pub fn transitions(&self, direction: Direction) -> &Mat<f64> {
        match direction {
            Direction::X => &self.transitions[0],
            Direction::Y => &self.transitions[1],
            Direction::Z => &self.transitions[2],
            Direction::Powder => &self.powder,
        }
    }
}

fn block_sums(squared: &Mat<f64>, levels: &[Level]) -> Mat<f64> {
    let mut starts = Vec::with_capacity(levels.len());
    let mut start = 0;
    for level in levels {
        starts.push(start);
        start += level.degeneracy;
    }

    Mat::from_fn(levels.len(), levels.len(), |i, j| {
        let rows = starts[i]..starts[i] + levels[i].degeneracy;

        rows.flat_map(|a| (starts[j]..starts[j] + levels[j].degeneracy).map(move |b| (a, b)))
            .map(|(a, b)| squared[(a, b)])
            .sum()
    })
}
