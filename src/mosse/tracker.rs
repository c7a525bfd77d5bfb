//! Single-target MOSSE tracker.
//!
//! A track is initialised from one frame and a user-supplied window, then
//! fed one frame at a time. Every call to [`MosseTracker::next`] correlates
//! the learned filter with the appearance under the current window, moves
//! the window to the response peak and adapts the filter to the new
//! appearance.

use super::config::TrackerConfig;
use super::filter::FilterState;
use crate::bbox::BoundingBox;
use crate::complex::ComplexPlane;
use crate::dft::FourierBasis;
use crate::error::TrackError;
use crate::frame::GrayFrame;
use crate::gauss::gaussian_response;
use crate::peak::{locate_peak, Displacement};
use crate::preprocess::{LogHannPreprocessor, Preprocess};
use nalgebra::DMatrix;
use tracing::{debug, trace};

/// Constants fixed for the lifetime of a track.
#[derive(Debug, Clone)]
struct TrackTemplate {
    basis: FourierBasis,
    /// DFT of the desired Gaussian response.
    target: ComplexPlane,
}

/// Replaced as a whole on every successful update.
#[derive(Debug, Clone)]
struct TrackState {
    filter: FilterState,
    bbox: BoundingBox,
}

#[derive(Debug, Clone)]
pub struct MosseTracker<P = LogHannPreprocessor> {
    config: TrackerConfig,
    preprocessor: P,
    template: TrackTemplate,
    state: TrackState,
    frame_count: usize,
}

impl MosseTracker<LogHannPreprocessor> {
    /// Starts a track on `bbox` with the default configuration.
    ///
    /// # Example
    /// ```
    /// use mossetrack_rs::{BoundingBox, GrayFrame, MosseTracker};
    ///
    /// let pixels: Vec<u8> = (0..64 * 64).map(|i| (i % 251) as u8).collect();
    /// let frame = GrayFrame::from_luma(64, 64, &pixels).unwrap();
    /// let mut tracker =
    ///     MosseTracker::init(&frame, BoundingBox::new(20, 20, 16, 16)).unwrap();
    /// let bbox = tracker.next(&frame).unwrap();
    /// assert_eq!(bbox.shape(), (16, 16));
    /// ```
    pub fn init(frame: &GrayFrame, bbox: BoundingBox) -> Result<Self, TrackError> {
        Self::init_with(frame, bbox, TrackerConfig::default(), LogHannPreprocessor::default())
    }

    pub fn init_with_config(
        frame: &GrayFrame,
        bbox: BoundingBox,
        config: TrackerConfig,
    ) -> Result<Self, TrackError> {
        Self::init_with(frame, bbox, config, LogHannPreprocessor::default())
    }
}

impl<P: Preprocess> MosseTracker<P> {
    /// Starts a track with an explicit configuration and preprocessor.
    ///
    /// # Arguments
    /// * `frame` - First frame of the sequence
    /// * `bbox` - Target window; must be non-empty and inside `frame`
    /// * `config` - Tracker tunables, validated here
    /// * `preprocessor` - Applied to every crop before it is transformed
    pub fn init_with(
        frame: &GrayFrame,
        bbox: BoundingBox,
        config: TrackerConfig,
        preprocessor: P,
    ) -> Result<Self, TrackError> {
        config.validate()?;
        bbox.validate_within(frame.width(), frame.height())?;

        let (raw, processed) = appearance(&preprocessor, frame, &bbox)?;
        let desired = gaussian_response(
            (frame.height(), frame.width()),
            &bbox,
            config.sigma,
        )?;

        let (height, width) = bbox.shape();
        let basis = FourierBasis::new(height, width)?;
        let target = basis.forward_real(&desired)?;
        let filter = FilterState::initial(
            &target,
            &basis.forward_real(&processed)?,
            &basis.forward_real(&raw)?,
            config.learning_rate,
        )?;

        debug!(
            width,
            height,
            x = bbox.x(),
            y = bbox.y(),
            sigma = config.sigma,
            learning_rate = config.learning_rate,
            "MOSSE track initialised"
        );

        Ok(Self {
            config,
            preprocessor,
            template: TrackTemplate { basis, target },
            state: TrackState { filter, bbox },
            frame_count: 1,
        })
    }

    /// Locates the target in `frame` and adapts the filter to it.
    ///
    /// On error the tracker is left exactly as it was before the call.
    pub fn next(&mut self, frame: &GrayFrame) -> Result<BoundingBox, TrackError> {
        let current = self.state.bbox;
        let motion = self.displacement(frame, &current)?;

        let moved = self.config.boundary.apply(
            &current,
            motion,
            frame.width(),
            frame.height(),
        );
        moved.validate()?;

        let (_, processed) = appearance(&self.preprocessor, frame, &moved)?;
        let observed = self.template.basis.forward_real(&processed)?;
        let filter = self.state.filter.blended(
            &self.template.target,
            &observed,
            self.config.learning_rate,
        )?;

        self.state = TrackState {
            filter,
            bbox: moved,
        };
        self.frame_count += 1;
        trace!(
            frame = self.frame_count,
            dy = motion.dy,
            dx = motion.dx,
            x = moved.x(),
            y = moved.y(),
            "MOSSE track updated"
        );
        Ok(moved)
    }

    /// Real part of the filter's correlation with the appearance under
    /// `bbox`, before normalisation. Does not change the tracker.
    pub fn response(
        &self,
        frame: &GrayFrame,
        bbox: &BoundingBox,
    ) -> Result<DMatrix<f64>, TrackError> {
        let (_, processed) = appearance(&self.preprocessor, frame, bbox)?;
        let (transfer, degenerate) =
            self.state.filter.transfer(self.config.degeneracy_eps)?;
        if degenerate > 0 {
            debug!(degenerate, "zeroed degenerate filter cells");
        }
        let spectrum = transfer.multiply(&self.template.basis.forward_real(&processed)?)?;
        let (real, _) = self.template.basis.inverse(&spectrum)?.into_parts();
        Ok(real)
    }

    fn displacement(
        &self,
        frame: &GrayFrame,
        bbox: &BoundingBox,
    ) -> Result<Displacement, TrackError> {
        Ok(locate_peak(&self.response(frame, bbox)?))
    }

    #[inline(always)]
    pub fn bbox(&self) -> BoundingBox {
        self.state.bbox
    }

    #[inline(always)]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Frames consumed so far, the initial one included.
    #[inline(always)]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// `(rows, cols)` of the tracking window, fixed at initialisation.
    pub fn window_shape(&self) -> (usize, usize) {
        self.template.basis.shape()
    }

    pub fn filter(&self) -> &FilterState {
        &self.state.filter
    }

    pub fn preprocessor(&self) -> &P {
        &self.preprocessor
    }
}

/// Raw crop under `bbox` and its preprocessed form.
fn appearance<P: Preprocess>(
    preprocessor: &P,
    frame: &GrayFrame,
    bbox: &BoundingBox,
) -> Result<(DMatrix<f64>, DMatrix<f64>), TrackError> {
    let raw = frame.crop(bbox)?;
    let processed = preprocessor.preprocess(&raw);
    TrackError::check_shape(raw.shape(), processed.shape())?;
    Ok((raw, processed))
}
