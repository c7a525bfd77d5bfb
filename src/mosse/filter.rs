//! The MOSSE accumulators.
//!
//! The filter is kept as a numerator `Ai` and denominator `Bi` in the
//! frequency domain; the transfer function is their elementwise quotient.

use crate::complex::ComplexPlane;
use crate::error::TrackError;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    numerator: ComplexPlane,
    denominator: ComplexPlane,
}

impl FilterState {
    /// First estimate from the initial frame.
    ///
    /// # Arguments
    /// * `target` - DFT of the desired Gaussian response `G`
    /// * `processed` - DFT of the preprocessed crop
    /// * `raw` - DFT of the raw grayscale crop
    /// * `learning_rate` - `eta`
    ///
    /// `Ai = eta (G . conj(F_proc))`, `Bi = eta (F_raw . conj(F_raw))`.
    /// The denominator is seeded from the raw crop, the numerator from the
    /// preprocessed one.
    pub fn initial(
        target: &ComplexPlane,
        processed: &ComplexPlane,
        raw: &ComplexPlane,
        learning_rate: f64,
    ) -> Result<Self, TrackError> {
        let numerator =
            target.multiply(&processed.conjugate())?.scale(learning_rate);
        let denominator = raw.multiply(&raw.conjugate())?.scale(learning_rate);
        TrackError::check_shape(numerator.shape(), denominator.shape())?;
        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[inline(always)]
    pub fn numerator(&self) -> &ComplexPlane {
        &self.numerator
    }

    #[inline(always)]
    pub fn denominator(&self) -> &ComplexPlane {
        &self.denominator
    }

    pub fn shape(&self) -> (usize, usize) {
        self.numerator.shape()
    }

    /// `Hi = Ai / Bi`, with the count of cells whose denominator fell at
    /// or below `eps`.
    pub fn transfer(&self, eps: f64) -> Result<(ComplexPlane, usize), TrackError> {
        self.numerator.divide(&self.denominator, eps)
    }

    /// EMA step towards the appearance `observed` (DFT of a preprocessed
    /// crop). Both accumulators use the same appearance.
    pub fn blended(
        &self,
        target: &ComplexPlane,
        observed: &ComplexPlane,
        learning_rate: f64,
    ) -> Result<Self, TrackError> {
        let keep = 1.0 - learning_rate;
        let conj = observed.conjugate();
        let numerator = target
            .multiply(&conj)?
            .scale(learning_rate)
            .add(&self.numerator.scale(keep))?;
        let denominator = observed
            .multiply(&conj)?
            .scale(learning_rate)
            .add(&self.denominator.scale(keep))?;
        Ok(Self {
            numerator,
            denominator,
        })
    }
}
