//! Fixed-size 2D DFT by dense matrix multiplication.
//!
//! The tracking window never changes size, so the Fourier kernels are built
//! once per track and every transform is two complex matrix products:
//!
//! ```text
//! forward(X) = W_H . X . W_W
//! inverse(Y) = conj(W_H) . Y . conj(W_W) / (H * W)
//! ```
//!
//! where `W_N[k, n] = exp(-2 pi i k n / N)`. This costs
//! `O(H W (H + W))` per transform instead of an FFT's
//! `O(H W log(H W))`, and has no size restrictions.

use crate::complex::ComplexPlane;
use crate::error::TrackError;
use nalgebra::DMatrix;
use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct FourierBasis {
    rows: ComplexPlane,
    cols: ComplexPlane,
    rows_inv: ComplexPlane,
    cols_inv: ComplexPlane,
}

impl FourierBasis {
    /// Builds the kernels for a `height` x `width` window.
    pub fn new(height: usize, width: usize) -> Result<Self, TrackError> {
        if height == 0 || width == 0 {
            return Err(TrackError::InvalidBoundingBox(format!(
                "Fourier basis needs a non-empty window, got {}x{}",
                width, height
            )));
        }
        let rows = fourier_matrix(height)?;
        let cols = fourier_matrix(width)?;
        let rows_inv = rows.conjugate();
        let cols_inv = cols.conjugate();
        Ok(Self {
            rows,
            cols,
            rows_inv,
            cols_inv,
        })
    }

    /// `(rows, cols)` of the planes this basis transforms.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.shape().0, self.cols.shape().0)
    }

    pub fn forward(&self, plane: &ComplexPlane) -> Result<ComplexPlane, TrackError> {
        TrackError::check_shape(self.shape(), plane.shape())?;
        self.rows.matmul(plane)?.matmul(&self.cols)
    }

    pub fn forward_real(
        &self,
        real: &DMatrix<f64>,
    ) -> Result<ComplexPlane, TrackError> {
        TrackError::check_shape(self.shape(), real.shape())?;
        // W_H . X for a real X needs only two real products
        let left = ComplexPlane::new(
            self.rows.re() * real,
            self.rows.im() * real,
        )?;
        left.matmul(&self.cols)
    }

    pub fn inverse(&self, plane: &ComplexPlane) -> Result<ComplexPlane, TrackError> {
        TrackError::check_shape(self.shape(), plane.shape())?;
        let (h, w) = self.shape();
        let unscaled = self.rows_inv.matmul(plane)?.matmul(&self.cols_inv)?;
        Ok(unscaled.scale(1.0 / (h * w) as f64))
    }
}

/// `n x n` forward DFT kernel. The exponent is reduced modulo `n` before
/// the trig evaluation so large `k * m` products keep full precision.
fn fourier_matrix(n: usize) -> Result<ComplexPlane, TrackError> {
    let angle = |k: usize, m: usize| -TAU * ((k * m) % n) as f64 / n as f64;
    let re = DMatrix::from_fn(n, n, |k, m| angle(k, m).cos());
    let im = DMatrix::from_fn(n, n, |k, m| angle(k, m).sin());
    ComplexPlane::new(re, im)
}
