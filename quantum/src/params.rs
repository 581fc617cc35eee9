pub mod ion;
pub mod ion_factory;
