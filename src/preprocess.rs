//! Appearance preprocessing.
//!
//! The tracker treats preprocessing as an opaque, shape-preserving,
//! deterministic function of a grayscale crop. [`LogHannPreprocessor`] is the
//! default; any `Fn(&DMatrix<f64>) -> DMatrix<f64>` can stand in for it.

use nalgebra::DMatrix;
use std::f64::consts::TAU;

pub trait Preprocess {
    fn preprocess(&self, crop: &DMatrix<f64>) -> DMatrix<f64>;
}

impl<F> Preprocess for F
where
    F: Fn(&DMatrix<f64>) -> DMatrix<f64>,
{
    fn preprocess(&self, crop: &DMatrix<f64>) -> DMatrix<f64> {
        self(crop)
    }
}

/// `ln(p + 1)`, then zero mean / unit deviation, then a separable Hann
/// taper towards the crop edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogHannPreprocessor {
    /// Added to the standard deviation before dividing.
    pub eps: f64,
}

impl Default for LogHannPreprocessor {
    fn default() -> Self {
        Self { eps: 1e-5 }
    }
}

impl Preprocess for LogHannPreprocessor {
    fn preprocess(&self, crop: &DMatrix<f64>) -> DMatrix<f64> {
        let logged = log_transform(crop);
        let normalized = standardize(&logged, self.eps);
        let window = hann_window(crop.nrows(), crop.ncols());
        normalized.component_mul(&window)
    }
}

pub fn log_transform(crop: &DMatrix<f64>) -> DMatrix<f64> {
    crop.map(|p| (p + 1.0).ln())
}

/// `(v - mean) / (std + eps)` with the population standard deviation.
pub fn standardize(values: &DMatrix<f64>, eps: f64) -> DMatrix<f64> {
    if values.is_empty() {
        return values.clone();
    }
    let n = values.len() as f64;
    let mean = values.sum() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt() + eps;
    values.map(|v| (v - mean) / std)
}

/// Outer product of two 1D Hann windows.
pub fn hann_window(rows: usize, cols: usize) -> DMatrix<f64> {
    let wy = hann(rows);
    let wx = hann(cols);
    DMatrix::from_fn(rows, cols, |y, x| wy[y] * wx[x])
}

fn hann(n: usize) -> Vec<f64> {
    match n {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }
    let span = (n - 1) as f64;
    (0..n)
        .map(|i| 0.5 * (1.0 - (TAU * i as f64 / span).cos()))
        .collect()
}
