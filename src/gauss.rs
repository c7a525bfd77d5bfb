use crate::bbox::BoundingBox;
use crate::error::TrackError;
use nalgebra::DMatrix;

/// Width of the desired filter response.
pub const DEFAULT_SIGMA: f64 = 100.0;

/// Unnormalised 2D Gaussian over a `(rows, cols)` grid:
/// `exp(-((y - cy)^2 + (x - cx)^2) / (2 sigma^2))`.
pub fn gaussian(shape: (usize, usize), center: (f64, f64), sigma: f64) -> DMatrix<f64> {
    let (cy, cx) = center;
    let denom = 2.0 * sigma * sigma;
    DMatrix::from_fn(shape.0, shape.1, |y, x| {
        let dy = y as f64 - cy;
        let dx = x as f64 - cx;
        (-(dy * dy + dx * dx) / denom).exp()
    })
}

/// The desired response for `bbox`: a Gaussian centred on the box's
/// centroid, evaluated over the whole frame and cropped to the box so the
/// peak keeps its position relative to the window's offset in the frame.
pub fn gaussian_response(
    frame_shape: (usize, usize),
    bbox: &BoundingBox,
    sigma: f64,
) -> Result<DMatrix<f64>, TrackError> {
    let (frame_height, frame_width) = frame_shape;
    bbox.validate_within(frame_width, frame_height)?;
    let full = gaussian(frame_shape, bbox.center(), sigma);
    Ok(full.view((bbox.y(), bbox.x()), bbox.shape()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearly_eq::assert_nearly_eq;

    #[test]
    fn test_peak_is_one_at_center() {
        let g = gaussian((9, 11), (4.0, 5.0), 2.0);
        assert_nearly_eq!(g[(4, 5)], 1.0, 1e-12);
        let max = g.iter().cloned().fold(f64::MIN, f64::max);
        assert_nearly_eq!(max, 1.0, 1e-12);
    }

    #[test]
    fn test_value_off_center() {
        let g = gaussian((5, 5), (0.0, 0.0), 1.0);
        // d^2 = 2, 2 sigma^2 = 2
        assert_nearly_eq!(g[(1, 1)], (-1.0f64).exp(), 1e-12);
    }

    #[test]
    fn test_symmetry_per_axis() {
        let (cy, cx) = (10.0, 12.0);
        let g = gaussian((21, 25), (cy, cx), 3.5);
        for d in 1..=8usize {
            let (yc, xc) = (cy as usize, cx as usize);
            // vertical
            assert_nearly_eq!(g[(yc - d, xc)], g[(yc + d, xc)], 1e-12);
            // horizontal
            assert_nearly_eq!(g[(yc, xc - d)], g[(yc, xc + d)], 1e-12);
            // each axis independently
            assert_nearly_eq!(g[(yc - d, xc + 3)], g[(yc + d, xc + 3)], 1e-12);
            assert_nearly_eq!(g[(yc + 2, xc - d)], g[(yc + 2, xc + d)], 1e-12);
        }
    }

    #[test]
    fn test_response_crop_tracks_window_offset() {
        let bbox = BoundingBox::new(30, 20, 10, 6);
        let g = gaussian_response((64, 80), &bbox, 2.0).unwrap();
        assert_eq!(g.shape(), (6, 10));
        // centroid (23, 35) lands on window cell (3, 5)
        assert_nearly_eq!(g[(3, 5)], 1.0, 1e-12);
        let full = gaussian((64, 80), (23.0, 35.0), 2.0);
        assert_nearly_eq!(g[(0, 0)], full[(20, 30)], 1e-12);
        assert_nearly_eq!(g[(5, 9)], full[(25, 39)], 1e-12);
    }

    #[test]
    fn test_response_rejects_box_outside_frame() {
        let bbox = BoundingBox::new(75, 0, 10, 6);
        assert!(gaussian_response((64, 80), &bbox, 2.0).is_err());
    }
}
