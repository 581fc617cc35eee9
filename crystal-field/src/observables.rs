use std::f64::consts::PI;

use serde::Serialize;

use crate::{
    consts::Consts,
    error::{CrystalFieldError, Result},
    ion::CrystalFieldIon,
    levels::Direction,
};

fn check_temperature(temperature: f64) -> Result<()> {
    if temperature.is_finite() && temperature > 0. {
        Ok(())
    } else {
        Err(CrystalFieldError::InvalidTemperature(temperature))
    }
}

/// Crystal field susceptibility in `mu_B / T` at `temperature` in Kelvin.
///
/// Thermal average of the state moments projected on the field direction
/// divided by the field magnitude, the field cannot be zero.
pub fn susceptibility(ion: &CrystalFieldIon, temperature: f64) -> Result<f64> {
    check_temperature(temperature)?;
    let direction = ion.field_direction().ok_or(CrystalFieldError::ZeroField)?;

    let weights: Vec<f64> = ion
        .energies()
        .iter()
        .map(|e| (-e / temperature).exp())
        .collect();
    let partition: f64 = weights.iter().sum();

    let mut moment = [0.; 3];
    for (w, state_moment) in weights.iter().zip(ion.moments()) {
        for (m, s) in moment.iter_mut().zip(state_moment) {
            *m += w / partition * s;
        }
    }

    let projection: f64 = moment.iter().zip(direction).map(|(m, d)| m * d).sum();

    Ok(projection / ion.field_size())
}

/// Susceptibility at every temperature in the order given.
pub fn susceptibility_curve(ion: &CrystalFieldIon, temperatures: &[f64]) -> Result<Vec<f64>> {
    temperatures
        .iter()
        .map(|&t| susceptibility(ion, t))
        .collect()
}

/// Neutron transitions between degenerate levels sorted by energy transfer.
#[derive(Clone, Debug, Serialize)]
pub struct NeutronSpectrum {
    pub temperature: f64,
    pub direction: Direction,
    /// Energy transfers `E_final - E_initial` in Kelvin, ascending.
    pub jumps: Vec<f64>,
    /// Transition intensities in barn.
    pub intensities: Vec<f64>,
}

impl NeutronSpectrum {
    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    /// Transitions with nonzero energy transfer.
    pub fn inelastic(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.jumps
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
            .filter(|(jump, _)| *jump != 0.)
    }
}

/// Neutron transition intensities at `temperature` in Kelvin
/// for momentum transfer along `direction`.
pub fn neutron_intensity(
    ion: &CrystalFieldIon,
    temperature: f64,
    direction: Direction,
) -> Result<NeutronSpectrum> {
    check_temperature(temperature)?;

    let levels = ion.levels();
    let transitions = ion.degenerate_transitions(direction);
    let prefactor = PI * Consts::NEUTRON_R0.powi(2) * Consts::M2_TO_BARN * ion.gj().powi(2);

    let weights: Vec<f64> = levels
        .iter()
        .map(|l| (-l.energy / temperature).exp())
        .collect();
    let partition: f64 = weights
        .iter()
        .zip(levels)
        .map(|(w, l)| w * l.degeneracy as f64)
        .sum();

    let n = levels.len();
    let mut transfers = Vec::with_capacity(n * n);
    for (i, initial) in levels.iter().enumerate() {
        let population = weights[i] / partition;

        for (j, target) in levels.iter().enumerate() {
            let intensity = transitions[(i, j)] * population * prefactor;

            transfers.push((target.energy - initial.energy, intensity));
        }
    }
    transfers.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (jumps, intensities) = transfers.into_iter().unzip();

    Ok(NeutronSpectrum {
        temperature,
        direction,
        jumps,
        intensities,
    })
}
