use quantum::problems_impl;

use self::{
    cerium_cubic::CeriumCubic, field_scan::FieldScan, holmium_tetragonal::HolmiumTetragonal,
    neutron_spectrum::NeutronSpectrumProblem,
};

mod cerium_cubic;
mod field_scan;
mod holmium_tetragonal;
mod neutron_spectrum;

pub struct Problems;

problems_impl!(Problems, "crystal field",
    "holmium tetragonal" => |_| HolmiumTetragonal::run(),
    "cerium cubic" => CeriumCubic::run,
    "neutron spectrum" => |_| NeutronSpectrumProblem::run(),
    "field scan" => |_| FieldScan::run(),
);
