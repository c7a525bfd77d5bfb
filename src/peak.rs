use nalgebra::DMatrix;

/// Signed target motion in pixels; positive means down / right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Displacement {
    pub dy: isize,
    pub dx: isize,
}

/// Linear rescale to `[0, 1]`. A flat surface maps to all zeros.
pub fn normalize(surface: &DMatrix<f64>) -> DMatrix<f64> {
    let (lo, hi) = surface
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    if !(range > 0.0) || !range.is_finite() {
        return DMatrix::zeros(surface.nrows(), surface.ncols());
    }
    surface.map(|v| (v - lo) / range)
}

/// Mean `(row, col)` of every cell exactly equal to the maximum, and how
/// many cells tied. `None` for an empty surface.
pub fn peak_position(surface: &DMatrix<f64>) -> Option<((f64, f64), usize)> {
    let max = surface.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut sum_row = 0.0;
    let mut sum_col = 0.0;
    let mut count = 0usize;
    for c in 0..surface.ncols() {
        for r in 0..surface.nrows() {
            if surface[(r, c)] == max {
                sum_row += r as f64;
                sum_col += c as f64;
                count += 1;
            }
        }
    }
    if count == 0 {
        return None;
    }
    Some(((sum_row / count as f64, sum_col / count as f64), count))
}

/// Normalises `response` and converts its peak into an offset from the
/// surface centre `(H / 2, W / 2)`. Halves round to even, so a flat
/// response gives zero motion.
pub fn locate_peak(response: &DMatrix<f64>) -> Displacement {
    let normalized = normalize(response);
    let Some(((row, col), _)) = peak_position(&normalized) else {
        return Displacement::default();
    };
    let half_h = response.nrows() as f64 / 2.0;
    let half_w = response.ncols() as f64 / 2.0;
    Displacement {
        dy: (row - half_h).round_ties_even() as isize,
        dx: (col - half_w).round_ties_even() as isize,
    }
}
