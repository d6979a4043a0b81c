use super::filters::{moving_average, moving_minimum};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

const POLYNOMIAL_DEGREE: usize = 3;

/// Background-estimation strategy applied before smoothing and peak search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMethod {
    /// Morphological minimum filter of the configured radius followed by a mean
    /// filter of half that radius. Robust against broad continuum shapes.
    #[default]
    RollingBall,
    /// Cubic least-squares fit against the sample index.
    Polynomial,
    /// No background; subtraction becomes a no-op.
    None,
}

/// Estimates the background under a spectrum with the chosen method.
pub fn estimate_background(spectrum: &[f64], method: BackgroundMethod, radius: usize) -> Vec<f64> {
    match method {
        BackgroundMethod::RollingBall => {
            moving_average(&moving_minimum(spectrum, radius), radius / 2)
        }
        BackgroundMethod::Polynomial => polynomial_background(spectrum),
        BackgroundMethod::None => vec![0.0; spectrum.len()],
    }
}

/// Estimates and subtracts the background, clamping the result at zero.
///
/// Returns `(background, corrected)` as parallel arrays.
pub fn subtract_background(
    spectrum: &[f64],
    method: BackgroundMethod,
    radius: usize,
) -> (Vec<f64>, Vec<f64>) {
    let background = estimate_background(spectrum, method, radius);
    let corrected = spectrum
        .iter()
        .zip(&background)
        .map(|(&value, &bkg)| (value - bkg).max(0.0))
        .collect();
    (background, corrected)
}

fn polynomial_background(spectrum: &[f64]) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }
    let design = DMatrix::from_fn(n, POLYNOMIAL_DEGREE + 1, |row, col| {
        (row as f64).powi(col as i32)
    });
    let observations = DVector::from_column_slice(spectrum);
    let coefficients: Vec<f64> = design
        .svd(true, true)
        .solve(&observations, f64::EPSILON)
        .unwrap_or_else(|_| DVector::zeros(POLYNOMIAL_DEGREE + 1))
        .iter()
        .copied()
        .collect();

    (0..n)
        .map(|i| {
            let x = i as f64;
            coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
        })
        .collect()
}
