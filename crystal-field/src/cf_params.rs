use std::{convert::Infallible, fmt::Display, str::FromStr};

use log::warn;
use serde::Serialize;

use crate::error::{CrystalFieldError, Result};

/// Point symmetry of the ion surroundings restricting the non-zero Stevens coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Symmetry {
    Cubic,
    Hexagonal,
    Tetragonal,
    #[default]
    Orthorhombic,
}

impl Symmetry {
    /// Parses a symmetry token, only its first character counts:
    /// `c`, `h` and `t` give cubic, hexagonal and tetragonal, anything else orthorhombic.
    pub fn from_token(token: &str) -> Self {
        match token.chars().next() {
            Some('c') => Self::Cubic,
            Some('h') => Self::Hexagonal,
            Some('t') => Self::Tetragonal,
            _ => Self::Orthorhombic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Symmetry::Cubic => "cubic",
            Symmetry::Hexagonal => "hexagonal",
            Symmetry::Tetragonal => "tetragonal",
            Symmetry::Orthorhombic => "orthorhombic",
        }
    }

    /// Coefficients allowed by the symmetry in positional and rendering order.
    pub fn coefficients(self) -> &'static [CfCoefficient] {
        use CfCoefficient::*;

        match self {
            Symmetry::Cubic => &[B40, B60, B44, B64],
            Symmetry::Hexagonal => &[B20, B40, B44, B66],
            Symmetry::Tetragonal => &[B20, B40, B44, B60, B64],
            Symmetry::Orthorhombic => &CfCoefficient::ALL,
        }
    }

    pub fn allows(self, coefficient: CfCoefficient) -> bool {
        self.coefficients().contains(&coefficient)
    }
}

impl FromStr for Symmetry {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Stevens crystal field coefficient `B_k^q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CfCoefficient {
    B20,
    B22,
    B40,
    B42,
    B44,
    B60,
    B62,
    B64,
    B66,
}

impl CfCoefficient {
    pub const ALL: [CfCoefficient; 9] = [
        Self::B20,
        Self::B22,
        Self::B40,
        Self::B42,
        Self::B44,
        Self::B60,
        Self::B62,
        Self::B64,
        Self::B66,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::B20 => "B20",
            Self::B22 => "B22",
            Self::B40 => "B40",
            Self::B42 => "B42",
            Self::B44 => "B44",
            Self::B60 => "B60",
            Self::B62 => "B62",
            Self::B64 => "B64",
            Self::B66 => "B66",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for CfCoefficient {
    type Err = CrystalFieldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CrystalFieldError::UnknownParameter(s.to_string()))
    }
}

impl Display for CfCoefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Item of the positional list form `[symmetry, coeff1, coeff2, ...]`.
#[derive(Clone, Debug, PartialEq)]
pub enum CfArg {
    Token(String),
    Value(f64),
}

impl From<&str> for CfArg {
    fn from(value: &str) -> Self {
        Self::Token(value.to_string())
    }
}

impl From<f64> for CfArg {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl FromStr for CfArg {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().parse::<f64>() {
            Ok(value) => Ok(Self::Value(value)),
            Err(_) => Ok(Self::Token(s.trim().to_string())),
        }
    }
}

/// Symmetry constrained set of crystal field coefficients in Kelvin.
///
/// Coefficients not allowed by the symmetry always read as zero,
/// for cubic symmetry `B44 = 5 B40` and `B64 = -21 B60` hold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CfParams {
    symmetry: Symmetry,
    values: [f64; 9],
}

impl CfParams {
    pub fn builder() -> CfParamsBuilder {
        CfParamsBuilder::default()
    }

    /// Creates the parameters from named coefficients.
    pub fn named(symmetry: Symmetry, named: &[(CfCoefficient, f64)]) -> Self {
        let mut values = [0.; 9];
        for &(coefficient, value) in named {
            values[coefficient.index()] = value;
        }

        Self::constrained(symmetry, values)
    }

    /// Creates the parameters from coefficients given in the symmetry order,
    /// see [`Symmetry::coefficients`]. Values beyond that order are ignored.
    pub fn positional(symmetry: Symmetry, positional: &[f64]) -> Self {
        let order = symmetry.coefficients();
        if positional.len() > order.len() {
            warn!(
                "ignoring {} positional coefficients beyond the {symmetry} order",
                positional.len() - order.len()
            );
        }

        let mut values = [0.; 9];
        for (coefficient, &value) in order.iter().zip(positional) {
            values[coefficient.index()] = value;
        }

        Self::constrained(symmetry, values)
    }

    /// Creates the parameters from the list form `[symmetry, coeff1, coeff2, ...]`.
    /// The first token sets the symmetry, orthorhombic if there is none.
    pub fn from_args(args: &[CfArg]) -> Result<Self> {
        let mut symmetry = None;
        let mut positional = Vec::new();

        for arg in args {
            match arg {
                CfArg::Token(token) if token.is_empty() => {
                    return Err(CrystalFieldError::MalformedList("empty symmetry token".into()));
                }
                CfArg::Token(token) => {
                    if symmetry.is_none() {
                        symmetry = Some(Symmetry::from_token(token))
                    }
                }
                CfArg::Value(value) if !value.is_finite() => {
                    return Err(CrystalFieldError::MalformedList(format!(
                        "coefficient {value} is not finite"
                    )));
                }
                CfArg::Value(value) => positional.push(*value),
            }
        }

        Ok(Self::positional(symmetry.unwrap_or_default(), &positional))
    }

    fn constrained(symmetry: Symmetry, mut values: [f64; 9]) -> Self {
        for coefficient in CfCoefficient::ALL {
            let value = &mut values[coefficient.index()];
            if !symmetry.allows(coefficient) && *value != 0. {
                warn!("{coefficient} = {value} is not allowed by {symmetry} symmetry, setting to 0");
                *value = 0.;
            }
        }

        if symmetry == Symmetry::Cubic {
            values[CfCoefficient::B44.index()] = 5. * values[CfCoefficient::B40.index()];
            values[CfCoefficient::B64.index()] = -21. * values[CfCoefficient::B60.index()];
        }

        Self { symmetry, values }
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn get(&self, coefficient: CfCoefficient) -> f64 {
        self.values[coefficient.index()]
    }

    /// Coefficients relevant to the symmetry in its order.
    pub fn iter(&self) -> impl Iterator<Item = (CfCoefficient, f64)> + '_ {
        self.symmetry
            .coefficients()
            .iter()
            .map(|&c| (c, self.get(c)))
    }
}

impl Default for CfParams {
    fn default() -> Self {
        Self::named(Symmetry::default(), &[])
    }
}

impl Display for CfParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Set of CF parameters for {} symmetry:", self.symmetry)?;
        for (coefficient, value) in self.iter() {
            writeln!(f, "{coefficient} = {value:.4}")?;
        }

        Ok(())
    }
}

/// Collects named and positional coefficients.
///
/// Once any named coefficient is given the positional ones are ignored.
#[derive(Clone, Debug, Default)]
pub struct CfParamsBuilder {
    symmetry: Symmetry,
    named: Vec<(CfCoefficient, f64)>,
    positional: Vec<f64>,
}

impl CfParamsBuilder {
    pub fn with_symmetry(mut self, symmetry: Symmetry) -> Self {
        self.symmetry = symmetry;

        self
    }

    pub fn with_coefficient(mut self, coefficient: CfCoefficient, value: f64) -> Self {
        self.named.push((coefficient, value));

        self
    }

    /// Adds a named coefficient by its name, e.g. `"B40"`.
    pub fn with_named(self, name: &str, value: f64) -> Result<Self> {
        let coefficient = name.parse()?;

        Ok(self.with_coefficient(coefficient, value))
    }

    pub fn with_positional(mut self, values: &[f64]) -> Self {
        self.positional.extend_from_slice(values);

        self
    }

    pub fn build(self) -> CfParams {
        if self.named.is_empty() {
            return CfParams::positional(self.symmetry, &self.positional);
        }

        if !self.positional.is_empty() {
            warn!(
                "named coefficients given, ignoring {} positional ones",
                self.positional.len()
            );
        }

        CfParams::named(self.symmetry, &self.named)
    }
}

#[cfg(test)]
mod test {
    use quantum::assert_approx_eq;

    use crate::error::CrystalFieldError;

    use super::{CfArg, CfCoefficient, CfParams, Symmetry};

    #[test]
    fn symmetry_tokens() {
        assert_eq!(Symmetry::from_token("c"), Symmetry::Cubic);
        assert_eq!(Symmetry::from_token("cubic"), Symmetry::Cubic);
        assert_eq!(Symmetry::from_token("hex"), Symmetry::Hexagonal);
        assert_eq!(Symmetry::from_token("t"), Symmetry::Tetragonal);
        assert_eq!(Symmetry::from_token("o"), Symmetry::Orthorhombic);
        assert_eq!(Symmetry::from_token("monoclinic"), Symmetry::Orthorhombic);
        assert_eq!(Symmetry::from_token(""), Symmetry::Orthorhombic);
    }

    #[test]
    fn cubic_relations() {
        let cfp = CfParams::named(Symmetry::Cubic, &[(CfCoefficient::B40, 10.)]);
        assert_eq!(cfp.get(CfCoefficient::B44), 50.);
        assert_eq!(cfp.get(CfCoefficient::B64), 0.);

        let cfp = CfParams::positional(Symmetry::Cubic, &[10., 1.]);
        assert_eq!(cfp.get(CfCoefficient::B40), 10.);
        assert_eq!(cfp.get(CfCoefficient::B60), 1.);
        assert_eq!(cfp.get(CfCoefficient::B44), 50.);
        assert_eq!(cfp.get(CfCoefficient::B64), -21.);

        assert_eq!(
            cfp.to_string(),
            "Set of CF parameters for cubic symmetry:\n\
             B40 = 10.0000\n\
             B60 = 1.0000\n\
             B44 = 50.0000\n\
             B64 = -21.0000\n"
        );
    }

    #[test]
    fn forbidden_coefficients() {
        let cfp = CfParams::named(
            Symmetry::Hexagonal,
            &[(CfCoefficient::B22, 3.), (CfCoefficient::B66, 2.)],
        );
        assert_eq!(cfp.get(CfCoefficient::B22), 0.);
        assert_eq!(cfp.get(CfCoefficient::B66), 2.);

        for symmetry in [Symmetry::Cubic, Symmetry::Hexagonal, Symmetry::Tetragonal] {
            let cfp = CfParams::positional(Symmetry::Orthorhombic, &[1.; 9]);
            let cfp = CfParams::named(symmetry, &cfp.iter().collect::<Vec<_>>());

            for coefficient in CfCoefficient::ALL {
                if !symmetry.allows(coefficient) {
                    assert_eq!(cfp.get(coefficient), 0.);
                }
            }
        }
    }

    #[test]
    fn positional_order() {
        let cfp = CfParams::positional(Symmetry::Tetragonal, &[1., 2., 3., 4., 5., 6.]);
        let values: Vec<f64> = cfp.iter().map(|x| x.1).collect();
        assert_eq!(values, vec![1., 2., 3., 4., 5.]);
        assert_eq!(cfp.get(CfCoefficient::B44), 3.);
        assert_eq!(cfp.get(CfCoefficient::B64), 5.);

        let cfp = CfParams::positional(Symmetry::Orthorhombic, &[0.5]);
        assert_approx_eq!(cfp.get(CfCoefficient::B20), 0.5, 1e-15);
        assert_eq!(cfp.iter().count(), 9);
    }

    #[test]
    fn named_precedence() {
        let cfp = CfParams::builder()
            .with_symmetry(Symmetry::Tetragonal)
            .with_positional(&[1., 2.])
            .with_named("B60", 0.25)
            .unwrap()
            .build();

        assert_eq!(cfp.get(CfCoefficient::B20), 0.);
        assert_eq!(cfp.get(CfCoefficient::B40), 0.);
        assert_eq!(cfp.get(CfCoefficient::B60), 0.25);

        let cfp = CfParams::builder()
            .with_symmetry(Symmetry::Tetragonal)
            .with_positional(&[1., 2.])
            .build();
        assert_eq!(cfp.get(CfCoefficient::B40), 2.);

        let err = CfParams::builder().with_named("B21", 1.).unwrap_err();
        assert_eq!(err, CrystalFieldError::UnknownParameter("B21".into()));
    }

    #[test]
    fn list_form() {
        let args: Vec<CfArg> = vec!["c".into(), CfArg::Value(10.0), "t".into(), CfArg::Value(1.0)];
        let cfp = CfParams::from_args(&args).unwrap();
        assert_eq!(cfp.symmetry(), Symmetry::Cubic);
        assert_eq!(cfp.get(CfCoefficient::B60), 1.);
        assert_eq!(cfp.get(CfCoefficient::B64), -21.);

        let args: Vec<CfArg> = ["2.5", "orthorhombic", "-1"]
            .iter()
            .map(|x| x.parse().unwrap())
            .collect();
        let cfp = CfParams::from_args(&args).unwrap();
        assert_eq!(cfp.symmetry(), Symmetry::Orthorhombic);
        assert_eq!(cfp.get(CfCoefficient::B20), 2.5);
        assert_eq!(cfp.get(CfCoefficient::B22), -1.);

        assert!(matches!(
            CfParams::from_args(&[CfArg::Token(String::new())]),
            Err(CrystalFieldError::MalformedList(_))
        ));
        assert!(matches!(
            CfParams::from_args(&[CfArg::Value(f64::NAN)]),
            Err(CrystalFieldError::MalformedList(_))
        ));
    }
}
