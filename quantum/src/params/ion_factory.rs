use crate::spins::DoubleSpin;

use super::ion::{Ion, StevensFactors};

/// Tabulated trivalent rare-earth ions as `(symbol, 2J, gJ, alpha, beta, gamma)`.
const RARE_EARTHS: [(&str, u32, f64, f64, f64, f64); 12] = [
    ("Ce", 5, 6. / 7., -2. / 35., 2. / 315., 0.),
    ("Pr", 8, 4. / 5., -52. / 2475., -4. / 5445., 272. / 4459455.),
    ("Nd", 9, 8. / 11., -7. / 1089., -136. / 467181., -1615. / 42513471.),
    ("Pm", 8, 3. / 5., 14. / 9075., 952. / 2335905., 2584. / 42513471.),
    ("Sm", 5, 2. / 7., 13. / 315., 26. / 10395., 0.),
    ("Gd", 7, 2., 0., 0., 0.),
    ("Tb", 12, 3. / 2., -1. / 99., 2. / 16335., -1. / 891891.),
    ("Dy", 15, 4. / 3., -2. / 315., -8. / 135135., 4. / 3864861.),
    ("Ho", 16, 5. / 4., -1. / 450., -1. / 30030., -5. / 50243193.),
    ("Er", 15, 6. / 5., 4. / 1575., 2. / 45045., 8. / 3864861.),
    ("Tm", 12, 7. / 6., 1. / 99., 8. / 49005., -5. / 891891.),
    ("Yb", 7, 8. / 7., 2. / 63., -2. / 1155., 4. / 27027.),
];

/// Looks up a trivalent rare-earth ion by its element symbol.
///
/// The symbol is case insensitive and may carry a charge suffix,
/// e.g. `"Ho"`, `"ho3+"`, `"HO+3"` and `"Ho3"` all give holmium.
pub fn create_ion(name: &str) -> Option<Ion> {
    let name = name.trim();
    let split = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    let (symbol, charge) = name.split_at(split);

    if !matches!(charge, "" | "3" | "3+" | "+3") {
        return None;
    }

    let &(symbol, doubled_j, lande, alpha, beta, gamma) = RARE_EARTHS
        .iter()
        .find(|x| x.0.eq_ignore_ascii_case(symbol))?;

    let spin = DoubleSpin::from_doubled(doubled_j).ok()?;
    let stevens = StevensFactors { alpha, beta, gamma };

    Some(Ion::new(symbol, spin, lande, stevens))
}

/// Element symbols of all tabulated ions.
pub fn available_ions() -> impl Iterator<Item = &'static str> {
    RARE_EARTHS.iter().map(|x| x.0)
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;

    use super::{available_ions, create_ion};

    #[test]
    fn ion_lookup() {
        let ion = create_ion("Ho").unwrap();
        assert_eq!(ion.name(), "Ho");
        assert_eq!(ion.j(), 8.);
        assert_eq!(ion.j2p1(), 17);
        assert_eq!(ion.gj(), 1.25);

        let stevens = ion.stevens();
        assert_approx_eq!(stevens.alpha, -0.0022222222222222222, 1e-12);
        assert_approx_eq!(stevens.beta, -3.330003330003329e-05, 1e-12);
        assert_approx_eq!(stevens.gamma, -9.951596826260624e-08, 1e-12);

        let ce = create_ion("ce3+").unwrap();
        assert_eq!(ce.j(), 2.5);
        assert_eq!(ce.j2p1(), 6);
        assert_eq!(create_ion(" HO+3 ").unwrap().name(), "Ho");
        assert_eq!(create_ion("Yb3").unwrap().j2p1(), 8);
    }

    #[test]
    fn missing_ions() {
        assert!(create_ion("Non existing ion").is_none());
        assert!(create_ion("Eu").is_none());
        assert!(create_ion("Ho2+").is_none());
        assert!(create_ion("").is_none());
    }

    #[test]
    fn all_ions_tabulated() {
        for name in available_ions() {
            let ion = create_ion(name).unwrap();
            assert!(ion.j() > 0.);
            assert!(ion.gj() > 0.);
        }

        assert_eq!(available_ions().count(), 12);
    }

    #[test]
    fn ion_summary() {
        let ion = create_ion("Gd").unwrap();
        assert_eq!(
            ion.to_string(),
            "8 energy levels, J = 3.5, gJ = 2\nalpha = 0, beta = 0, gamma = 0"
        );
    }
}
