use std::{
    fs::{File, create_dir_all},
    io::Write,
    path::{Path, PathBuf},
};

use num::complex::Complex64;
use serde::Serialize;

pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }

    let mut result = Vec::with_capacity(n);
    let step = (end - start) / (n as f64 - 1.0);

    for i in 0..n {
        result.push(start + (i as f64) * step);
    }

    result
}

pub fn logspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }

    let mut result = Vec::with_capacity(n);
    let step = (end - start) / (n as f64 - 1.0);

    for i in 0..n {
        result.push((10.0f64).powf(start + (i as f64) * step));
    }

    result
}

/// Magnitude used by [`approx_eq!`] to compare real and complex values alike.
pub trait ApproxNorm {
    fn approx_norm(self) -> f64;
}

impl ApproxNorm for f64 {
    fn approx_norm(self) -> f64 {
        self.abs()
    }
}

impl ApproxNorm for Complex64 {
    fn approx_norm(self) -> f64 {
        self.norm()
    }
}

/// Relative comparison `|a - b| <= tol * max(|a|, |b|)`,
/// falling back to the absolute one when both values are zero.
#[macro_export]
macro_rules! approx_eq {
    ($a:expr, $b:expr, $tol:expr) => {{
        use $crate::utility::ApproxNorm;
        let a = $a;
        let b = $b;
        let diff = (a - b).approx_norm();
        let scale = a.approx_norm().max(b.approx_norm());

        if scale == 0.0 { diff <= $tol } else { diff <= $tol * scale }
    }};
}

/// Asserts [`approx_eq!`] for values or, in the `mat =>` form,
/// absolute element-wise closeness of two equally shaped matrices.
#[macro_export]
macro_rules! assert_approx_eq {
    (mat => $a:expr, $b:expr, $tol:expr) => {{
        use $crate::utility::ApproxNorm;
        let a = $a;
        let b = $b;
        assert_eq!(a.nrows(), b.nrows(), "matrices have different number of rows");
        assert_eq!(a.ncols(), b.ncols(), "matrices have different number of columns");

        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                let diff = (a[(i, j)] - b[(i, j)]).approx_norm();
                assert!(
                    diff <= $tol,
                    "matrices differ at ({}, {}): {:?} != {:?}",
                    i, j, a[(i, j)], b[(i, j)]
                );
            }
        }
    }};
    ($a:expr, $b:expr, $tol:expr) => {{
        let a = $a;
        let b = $b;
        assert!($crate::approx_eq!(a, b, $tol), "Expected: {:?}, Got: {:?}", b, a);
    }};
}

fn data_path(filename: &str, extension: &str) -> Result<PathBuf, std::io::Error> {
    let mut path = std::env::current_dir()?;
    path.push("data");
    path.push(filename);
    path.set_extension(extension);

    if let Some(filepath) = path.parent() {
        if !Path::new(filepath).exists() {
            create_dir_all(filepath)?;
            log::info!("created path {}", filepath.display());
        }
    }

    Ok(path)
}

/// Saves columns of `data` as a tab separated table under `data/<filename>.dat`.
pub fn save_data(filename: &str, header: &str, data: &[Vec<f64>]) -> Result<(), std::io::Error> {
    let n = data.first().map_or(0, |x| x.len());
    for values in data {
        assert!(values.len() == n, "Same length data allowed only")
    }

    let mut buf = header.to_string();
    for i in 0..n {
        let line = data
            .iter()
            .fold(String::new(), |s, val| s + &format!("\t{:e}", val[i]));

        buf.push_str(&format!("\n{}", line.trim()));
    }

    let path = data_path(filename, "dat")?;
    let mut file = File::create(&path)?;
    file.write_all(buf.as_bytes())?;

    log::info!("saved data on {}", path.display());
    Ok(())
}

/// Saves `data` as json under `data/<filename>.json`.
pub fn save_serialize(filename: &str, data: &impl Serialize) -> Result<(), std::io::Error> {
    let buf = serde_json::to_string(data)?;

    let path = data_path(filename, "json")?;
    let mut file = File::create(&path)?;
    file.write_all(buf.as_bytes())?;

    log::info!("saved data on {}", path.display());
    Ok(())
}
