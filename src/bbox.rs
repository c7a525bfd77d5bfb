use crate::error::TrackError;

/* ------------------------------------------------------------------------------
 * BoundingBox struct
 * ------------------------------------------------------------------------------ */

/// Axis-aligned tracking window in pixel coordinates, relative to the
/// top-left corner of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    xmin: usize,
    ymin: usize,
    width: usize,
    height: usize,
}

impl BoundingBox {
    pub fn new(xmin: usize, ymin: usize, width: usize, height: usize) -> Self {
        Self {
            xmin,
            ymin,
            width,
            height,
        }
    }

    #[inline(always)]
    pub fn x(&self) -> usize {
        self.xmin
    }

    #[inline(always)]
    pub fn y(&self) -> usize {
        self.ymin
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, cols)` of the window, the shape every crop of it has.
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Image-space centroid as `(cy, cx)`.
    pub fn center(&self) -> (f64, f64) {
        (
            self.ymin as f64 + self.height as f64 / 2.0,
            self.xmin as f64 + self.width as f64 / 2.0,
        )
    }

    /// Get bounding box as [x1, y1, x2, y2] format, saturating at
    /// `usize::MAX`.
    pub fn get_xyxy(&self) -> [usize; 4] {
        [
            self.xmin,
            self.ymin,
            self.xmin.saturating_add(self.width),
            self.ymin.saturating_add(self.height),
        ]
    }

    pub fn fits_within(&self, frame_width: usize, frame_height: usize) -> bool {
        let right = self.xmin.checked_add(self.width);
        let bottom = self.ymin.checked_add(self.height);
        matches!(
            (right, bottom),
            (Some(r), Some(b)) if r <= frame_width && b <= frame_height
        )
    }

    /// Rejects empty boxes.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.width == 0 || self.height == 0 {
            return Err(TrackError::InvalidBoundingBox(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Like [`validate`](Self::validate), and additionally requires the box
    /// to lie inside a `frame_width` x `frame_height` frame.
    pub fn validate_within(
        &self,
        frame_width: usize,
        frame_height: usize,
    ) -> Result<(), TrackError> {
        self.validate()?;
        if !self.fits_within(frame_width, frame_height) {
            return Err(TrackError::InvalidBoundingBox(format!(
                "box {:?} exceeds frame {}x{}",
                self.get_xyxy(),
                frame_width,
                frame_height
            )));
        }
        Ok(())
    }

    /// Clamps the box into the frame by moving its origin into
    /// `[0, frame]` and cutting width/height at the frame edge. The result
    /// may be smaller than `self`, or empty when the origin lands on the
    /// far edge.
    pub fn clamp_to_frame(&self, frame_width: usize, frame_height: usize) -> Self {
        let xmin = self.xmin.min(frame_width);
        let ymin = self.ymin.min(frame_height);
        Self::new(
            xmin,
            ymin,
            self.width.min(frame_width - xmin),
            self.height.min(frame_height - ymin),
        )
    }

    /// Moves the box by `(dy, dx)` and then applies
    /// [`clamp_to_frame`](Self::clamp_to_frame).
    pub fn translate_clamped(
        &self,
        dy: isize,
        dx: isize,
        frame_width: usize,
        frame_height: usize,
    ) -> Self {
        let xmin = offset_clamped(self.xmin, dx, frame_width);
        let ymin = offset_clamped(self.ymin, dy, frame_height);
        Self::new(xmin, ymin, self.width, self.height)
            .clamp_to_frame(frame_width, frame_height)
    }

    /// Moves the box by `(dy, dx)` and slides it back inside the frame so
    /// that its size is kept whenever the frame is large enough to hold it.
    pub fn translate_shifted(
        &self,
        dy: isize,
        dx: isize,
        frame_width: usize,
        frame_height: usize,
    ) -> Self {
        let xmin =
            offset_clamped(self.xmin, dx, frame_width.saturating_sub(self.width));
        let ymin = offset_clamped(
            self.ymin,
            dy,
            frame_height.saturating_sub(self.height),
        );
        Self::new(xmin, ymin, self.width, self.height)
            .clamp_to_frame(frame_width, frame_height)
    }
}

fn offset_clamped(origin: usize, delta: isize, upper: usize) -> usize {
    let moved = origin as i128 + delta as i128;
    moved.clamp(0, upper as i128) as usize
}
