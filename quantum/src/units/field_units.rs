use super::Unit;

pub trait FieldUnit: Unit {}

/// Struct for representing magnetic field values.
///
/// Tesla is the reference unit, there is no atomic unit of field in use here.
/// # Examples
/// ```
/// use quantum::units::field_units::{MagneticField, Gauss, Tesla};
/// let field = MagneticField(5000.0, Gauss).to(Tesla);
/// assert_eq!(field.value(), 0.5);
/// ```
#[derive(Debug, Copy, Clone)]
pub struct MagneticField<U: FieldUnit>(pub f64, pub U);

impl<U: FieldUnit> MagneticField<U> {
    pub fn to_tesla(&self) -> f64 {
        self.1.to_au(self.0)
    }

    pub fn to<V: FieldUnit>(&self, unit: V) -> MagneticField<V> {
        MagneticField(self.1.to_au(self.0) / unit.to_au(1.0), unit)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn unit(&self) -> U {
        self.1
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Tesla;

impl Unit for Tesla {
    const TO_AU_MUL: f64 = 1.0;
}
impl FieldUnit for Tesla {}

#[derive(Copy, Clone, Debug)]
pub struct Gauss;

impl Unit for Gauss {
    const TO_AU_MUL: f64 = 1e-4;
}
impl FieldUnit for Gauss {}

/// Converts every component of a field vector to tesla.
pub fn field_vector_tesla<U: FieldUnit>(field: [MagneticField<U>; 3]) -> [f64; 3] {
    field.map(|x| x.to_tesla())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_units() {
        let field = MagneticField(1.0, Tesla).to(Gauss);
        assert_eq!(field.value(), 1e4);

        let vector = field_vector_tesla([
            MagneticField(1e4, Gauss),
            MagneticField(0.0, Gauss),
            MagneticField(-2e4, Gauss),
        ]);
        assert_eq!(vector, [1.0, 0.0, -2.0]);
    }
}
