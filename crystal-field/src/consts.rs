pub struct Consts;

impl Consts {
    /// The Bohr magneton in Kelvin / Tesla
    pub const BOHR_MAG: f64 = 0.6717138840811654;

    /// Magnetic neutron scattering length `gamma * r_e / 2` in meters
    pub const NEUTRON_R0: f64 = -5.390841372421595e-15;

    /// Conversion from square meters to barns
    pub const M2_TO_BARN: f64 = 1e28;
}
