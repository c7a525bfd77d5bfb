//! Single-channel frames.
//!
//! The tracker only ever sees grayscale intensities. Acquisition and colour
//! handling stay with the caller; the constructors here cover the common
//! packed 8-bit layouts.

use crate::bbox::BoundingBox;
use crate::error::TrackError;
use nalgebra::DMatrix;

/* -----------------------------------------------------------------------------
 * BT.601 luma weights
 * ----------------------------------------------------------------------------- */
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// A grayscale frame. Row `y`, column `x` of `pixels` is the intensity at
/// image coordinate `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayFrame {
    pixels: DMatrix<f64>,
}

impl GrayFrame {
    pub fn from_matrix(pixels: DMatrix<f64>) -> Result<Self, TrackError> {
        if pixels.nrows() == 0 || pixels.ncols() == 0 {
            return Err(TrackError::InvalidFrame(format!(
                "frame must be non-empty, got {}x{}",
                pixels.ncols(),
                pixels.nrows()
            )));
        }
        Ok(Self { pixels })
    }

    /// Row-major 8-bit luma buffer.
    pub fn from_luma(
        width: usize,
        height: usize,
        data: &[u8],
    ) -> Result<Self, TrackError> {
        check_len(width, height, 1, data.len())?;
        let pixels = DMatrix::from_fn(height, width, |y, x| {
            data[y * width + x] as f64
        });
        Self::from_matrix(pixels)
    }

    /// Row-major packed RGB buffer, three bytes per pixel.
    pub fn from_rgb(
        width: usize,
        height: usize,
        data: &[u8],
    ) -> Result<Self, TrackError> {
        Self::from_packed(width, height, 3, data)
    }

    /// Row-major packed RGBA buffer. Alpha is ignored.
    pub fn from_rgba(
        width: usize,
        height: usize,
        data: &[u8],
    ) -> Result<Self, TrackError> {
        Self::from_packed(width, height, 4, data)
    }

    fn from_packed(
        width: usize,
        height: usize,
        channels: usize,
        data: &[u8],
    ) -> Result<Self, TrackError> {
        check_len(width, height, channels, data.len())?;
        let pixels = DMatrix::from_fn(height, width, |y, x| {
            let i = (y * width + x) * channels;
            LUMA_R * data[i] as f64
                + LUMA_G * data[i + 1] as f64
                + LUMA_B * data[i + 2] as f64
        });
        Self::from_matrix(pixels)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn pixels(&self) -> &DMatrix<f64> {
        &self.pixels
    }

    /// Copies out the pixels under `bbox` as a `(height, width)` matrix.
    pub fn crop(&self, bbox: &BoundingBox) -> Result<DMatrix<f64>, TrackError> {
        bbox.validate_within(self.width(), self.height())?;
        Ok(self
            .pixels
            .view((bbox.y(), bbox.x()), bbox.shape())
            .into_owned())
    }
}

fn check_len(
    width: usize,
    height: usize,
    channels: usize,
    len: usize,
) -> Result<(), TrackError> {
    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or_else(|| {
            TrackError::InvalidFrame(format!(
                "{}x{} with {} channel(s) overflows the address space",
                width, height, channels
            ))
        })?;
    if len != expected {
        return Err(TrackError::InvalidFrame(format!(
            "buffer holds {} bytes, {}x{} with {} channel(s) needs {}",
            len, width, height, channels, expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearly_eq::assert_nearly_eq;

    #[test]
    fn test_from_luma_layout() {
        let data: Vec<u8> = (0..12).collect();
        let frame = GrayFrame::from_luma(4, 3, &data).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        // row 1, column 2
        assert_eq!(frame.pixels()[(1, 2)], 6.0);
    }

    #[test]
    fn test_from_luma_rejects_short_buffer() {
        let res = GrayFrame::from_luma(4, 3, &[0u8; 11]);
        assert!(matches!(res, Err(TrackError::InvalidFrame(_))));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        for res in [
            GrayFrame::from_luma(usize::MAX, 2, &[]),
            GrayFrame::from_rgb(usize::MAX / 2, 1, &[]),
            GrayFrame::from_rgba(usize::MAX / 4 + 1, 2, &[0u8; 4]),
        ] {
            assert!(matches!(res, Err(TrackError::InvalidFrame(_))));
        }
    }

    #[test]
    fn test_empty_frame_rejected() {
        let res = GrayFrame::from_luma(0, 3, &[]);
        assert!(matches!(res, Err(TrackError::InvalidFrame(_))));
    }

    #[test]
    fn test_rgb_and_rgba_conversion() {
        let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 10, 10, 10];
        let frame = GrayFrame::from_rgb(2, 2, &rgb).unwrap();
        assert_nearly_eq!(frame.pixels()[(0, 0)], 0.299 * 255.0, 1e-9);
        assert_nearly_eq!(frame.pixels()[(0, 1)], 0.587 * 255.0, 1e-9);
        assert_nearly_eq!(frame.pixels()[(1, 0)], 0.114 * 255.0, 1e-9);
        assert_nearly_eq!(frame.pixels()[(1, 1)], 10.0, 1e-9);

        let rgba = [255u8, 0, 0, 7, 0, 255, 0, 7];
        let frame = GrayFrame::from_rgba(2, 1, &rgba).unwrap();
        assert_nearly_eq!(frame.pixels()[(0, 0)], 0.299 * 255.0, 1e-9);
        assert_nearly_eq!(frame.pixels()[(0, 1)], 0.587 * 255.0, 1e-9);
    }

    #[test]
    fn test_crop() {
        let frame = GrayFrame::from_matrix(DMatrix::from_fn(6, 8, |y, x| {
            (y * 10 + x) as f64
        }))
        .unwrap();
        let crop = frame.crop(&BoundingBox::new(2, 1, 3, 2)).unwrap();
        assert_eq!(crop.shape(), (2, 3));
        assert_eq!(crop[(0, 0)], 12.0);
        assert_eq!(crop[(1, 2)], 24.0);

        let res = frame.crop(&BoundingBox::new(6, 0, 3, 2));
        assert!(matches!(res, Err(TrackError::InvalidBoundingBox(_))));
    }
}
