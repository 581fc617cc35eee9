pub mod params;
pub mod problem_selector;
pub mod spins;
pub mod units;
pub mod utility;

#[cfg(feature = "faer")]
pub mod operators;
