use super::{Au, Unit};

pub trait EnergyUnit: Unit {}

/// Struct for representing energy unit values
/// # Examples
/// ```
/// use quantum::units::energy_units::{Energy, Kelvin, MilliElectronVolt};
/// let energy_kelvin = Energy(11.604518, Kelvin);
/// let energy_mev = energy_kelvin.to(MilliElectronVolt);
/// assert!((energy_mev.value() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct Energy<U: EnergyUnit>(pub f64, pub U);

impl<U: EnergyUnit> Energy<U> {
    pub fn to_au(&self) -> f64 {
        self.1.to_au(self.0)
    }

    pub fn to<V: EnergyUnit>(&self, unit: V) -> Energy<V> {
        Energy(self.1.to_au(self.0) / unit.to_au(1.0), unit)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn unit(&self) -> U {
        self.1
    }
}

impl EnergyUnit for Au {}

#[derive(Copy, Clone, Debug)]
pub struct Kelvin;

impl Unit for Kelvin {
    const TO_AU_MUL: f64 = 3.1668105e-6;
}
impl EnergyUnit for Kelvin {}

#[derive(Copy, Clone, Debug)]
pub struct MilliElectronVolt;

impl Unit for MilliElectronVolt {
    // 1 meV = 11.604518 K
    const TO_AU_MUL: f64 = 11.604518 * 3.1668105e-6;
}
impl EnergyUnit for MilliElectronVolt {}

#[derive(Copy, Clone, Debug)]
pub struct CmInv;

impl Unit for CmInv {
    const TO_AU_MUL: f64 = 4.5563352812e-6;
}
impl EnergyUnit for CmInv {}

#[derive(Copy, Clone, Debug)]
pub struct GHz;

impl Unit for GHz {
    const TO_AU_MUL: f64 = 1.51982850071586e-07;
}
impl EnergyUnit for GHz {}
