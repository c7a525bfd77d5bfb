//! Elementwise complex arithmetic over paired real/imaginary planes.
//!
//! A [`ComplexPlane`] is a frequency-domain signal over the fixed tracking
//! window. Every operation returns a fresh plane; operands are never
//! modified.

use crate::error::TrackError;
use nalgebra::DMatrix;

/// Denominators at or below this squared magnitude are treated as zero.
pub const DEFAULT_DEGENERACY_EPS: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexPlane {
    re: DMatrix<f64>,
    im: DMatrix<f64>,
}

impl ComplexPlane {
    pub fn new(re: DMatrix<f64>, im: DMatrix<f64>) -> Result<Self, TrackError> {
        TrackError::check_shape(re.shape(), im.shape())?;
        Ok(Self { re, im })
    }

    /// Lifts a real plane; the imaginary part is zero.
    pub fn from_real(re: DMatrix<f64>) -> Self {
        let im = DMatrix::zeros(re.nrows(), re.ncols());
        Self { re, im }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            re: DMatrix::zeros(rows, cols),
            im: DMatrix::zeros(rows, cols),
        }
    }

    #[inline(always)]
    pub fn re(&self) -> &DMatrix<f64> {
        &self.re
    }

    #[inline(always)]
    pub fn im(&self) -> &DMatrix<f64> {
        &self.im
    }

    /// `(rows, cols)`
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        self.re.shape()
    }

    pub fn into_parts(self) -> (DMatrix<f64>, DMatrix<f64>) {
        (self.re, self.im)
    }

    /// `(a_r b_r - a_i b_i, a_r b_i + a_i b_r)`
    pub fn multiply(&self, other: &ComplexPlane) -> Result<Self, TrackError> {
        TrackError::check_shape(self.shape(), other.shape())?;
        let re = self.re.component_mul(&other.re)
            - self.im.component_mul(&other.im);
        let im = self.re.component_mul(&other.im)
            + self.im.component_mul(&other.re);
        Ok(Self { re, im })
    }

    /// Elementwise quotient `self / other`.
    ///
    /// Cells where `|other|^2 <= eps` are degenerate: their quotient is
    /// defined as zero and they are counted in the second return value.
    pub fn divide(
        &self,
        other: &ComplexPlane,
        eps: f64,
    ) -> Result<(Self, usize), TrackError> {
        TrackError::check_shape(self.shape(), other.shape())?;
        let (rows, cols) = self.shape();
        let mut re = DMatrix::zeros(rows, cols);
        let mut im = DMatrix::zeros(rows, cols);
        let mut degenerate = 0;

        for c in 0..cols {
            for r in 0..rows {
                let (ar, ai) = (self.re[(r, c)], self.im[(r, c)]);
                let (br, bi) = (other.re[(r, c)], other.im[(r, c)]);
                let denom = br * br + bi * bi;
                if denom <= eps {
                    degenerate += 1;
                    continue;
                }
                re[(r, c)] = (ar * br + ai * bi) / denom;
                im[(r, c)] = (ai * br - ar * bi) / denom;
            }
        }

        Ok((Self { re, im }, degenerate))
    }

    pub fn conjugate(&self) -> Self {
        Self {
            re: self.re.clone(),
            im: -&self.im,
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            re: &self.re * factor,
            im: &self.im * factor,
        }
    }

    pub fn add(&self, other: &ComplexPlane) -> Result<Self, TrackError> {
        TrackError::check_shape(self.shape(), other.shape())?;
        Ok(Self {
            re: &self.re + &other.re,
            im: &self.im + &other.im,
        })
    }

    /// Complex matrix product `self * other` (not elementwise).
    pub fn matmul(&self, other: &ComplexPlane) -> Result<Self, TrackError> {
        if self.re.ncols() != other.re.nrows() {
            return Err(TrackError::ShapeMismatch {
                expected: (self.re.ncols(), other.re.ncols()),
                found: other.shape(),
            });
        }
        let re = &self.re * &other.re - &self.im * &other.im;
        let im = &self.re * &other.im + &self.im * &other.re;
        Ok(Self { re, im })
    }

    /// Squared magnitude per cell.
    pub fn norm_sqr(&self) -> DMatrix<f64> {
        self.re.component_mul(&self.re) + self.im.component_mul(&self.im)
    }

    /// Largest per-cell distance to `other`, used for tolerance checks.
    pub fn max_abs_diff(&self, other: &ComplexPlane) -> Result<f64, TrackError> {
        TrackError::check_shape(self.shape(), other.shape())?;
        let d_re = &self.re - &other.re;
        let d_im = &self.im - &other.im;
        Ok(d_re
            .iter()
            .zip(d_im.iter())
            .map(|(r, i)| (r * r + i * i).sqrt())
            .fold(0.0, f64::max))
    }
}
