pub mod cf_params;
pub mod consts;
pub mod error;
pub mod hamiltonian;
pub mod ion;
pub mod levels;
pub mod observables;
pub mod spectrum;
pub mod stevens;

pub use cf_params::{CfArg, CfCoefficient, CfParams, Symmetry};
pub use error::{CrystalFieldError, Result};
pub use ion::{CrystalFieldIon, IonProblem, SolverConfig};
pub use levels::{Closeness, Direction, Level};
pub use observables::{NeutronSpectrum, neutron_intensity, susceptibility, susceptibility_curve};
