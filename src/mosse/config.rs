use crate::bbox::BoundingBox;
use crate::complex::DEFAULT_DEGENERACY_EPS;
use crate::error::TrackError;
use crate::gauss::DEFAULT_SIGMA;
use crate::peak::Displacement;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEARNING_RATE: f64 = 0.125;

/* ------------------------------------------------------------------------------
 * BoundaryPolicy
 * ------------------------------------------------------------------------------ */

/// What happens when a displacement would push the window past the frame
/// edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Clamp the origin into the frame and cut the size at the frame edge.
    /// A window that shrinks no longer matches the track's Fourier basis,
    /// so the update fails and the previous state is kept.
    Clamp,
    /// Slide the window back inside the frame, keeping its size.
    #[default]
    Shift,
}

impl BoundaryPolicy {
    pub fn apply(
        self,
        bbox: &BoundingBox,
        motion: Displacement,
        frame_width: usize,
        frame_height: usize,
    ) -> BoundingBox {
        match self {
            BoundaryPolicy::Clamp => bbox.translate_clamped(
                motion.dy,
                motion.dx,
                frame_width,
                frame_height,
            ),
            BoundaryPolicy::Shift => bbox.translate_shifted(
                motion.dy,
                motion.dx,
                frame_width,
                frame_height,
            ),
        }
    }
}

/* ------------------------------------------------------------------------------
 * TrackerConfig
 * ------------------------------------------------------------------------------ */

/// Tunables of a MOSSE track. Missing fields take their defaults when
/// deserialised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Width of the desired Gaussian response.
    pub sigma: f64,
    /// EMA blend factor for the filter accumulators, in `(0, 1]`.
    pub learning_rate: f64,
    pub boundary: BoundaryPolicy,
    /// Squared-magnitude threshold below which a filter denominator is
    /// treated as zero.
    pub degeneracy_eps: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            learning_rate: DEFAULT_LEARNING_RATE,
            boundary: BoundaryPolicy::default(),
            degeneracy_eps: DEFAULT_DEGENERACY_EPS,
        }
    }
}

impl TrackerConfig {
    pub fn with_sigma(self, sigma: f64) -> Self {
        Self { sigma, ..self }
    }

    pub fn with_learning_rate(self, learning_rate: f64) -> Self {
        Self {
            learning_rate,
            ..self
        }
    }

    pub fn with_boundary(self, boundary: BoundaryPolicy) -> Self {
        Self { boundary, ..self }
    }

    pub fn with_degeneracy_eps(self, degeneracy_eps: f64) -> Self {
        Self {
            degeneracy_eps,
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(TrackError::InvalidConfig(format!(
                "sigma must be positive and finite, got {}",
                self.sigma
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(TrackError::InvalidConfig(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !(self.degeneracy_eps.is_finite() && self.degeneracy_eps >= 0.0) {
            return Err(TrackError::InvalidConfig(format!(
                "degeneracy_eps must be non-negative and finite, got {}",
                self.degeneracy_eps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.sigma, 100.0);
        assert_eq!(config.learning_rate, 0.125);
        assert_eq!(config.boundary, BoundaryPolicy::Shift);
        assert_eq!(config.degeneracy_eps, 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = TrackerConfig::default()
            .with_sigma(2.0)
            .with_learning_rate(0.5)
            .with_boundary(BoundaryPolicy::Clamp)
            .with_degeneracy_eps(0.0);
        assert_eq!(config.sigma, 2.0);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.degeneracy_eps, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = TrackerConfig::default();
        for config in [
            base.with_sigma(0.0),
            base.with_sigma(f64::NAN),
            base.with_learning_rate(0.0),
            base.with_learning_rate(1.5),
            base.with_learning_rate(f64::NAN),
            base.with_degeneracy_eps(-1.0),
            base.with_degeneracy_eps(f64::INFINITY),
        ] {
            assert!(matches!(
                config.validate(),
                Err(TrackError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_partial_json() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"learning_rate": 0.2, "boundary": "clamp"}"#)
                .unwrap();
        assert_eq!(config.learning_rate, 0.2);
        assert_eq!(config.boundary, BoundaryPolicy::Clamp);
        assert_eq!(config.sigma, 100.0);

        let json = serde_json::to_string(&TrackerConfig::default()).unwrap();
        assert!(json.contains("\"boundary\":\"shift\""));
    }

    #[test]
    fn test_policies_at_right_edge() {
        let bbox = BoundingBox::new(90, 40, 20, 20);
        let motion = Displacement { dy: 0, dx: 5 };
        assert_eq!(
            BoundaryPolicy::Clamp.apply(&bbox, motion, 120, 120),
            BoundingBox::new(95, 40, 20, 20)
        );
        assert_eq!(
            BoundaryPolicy::Shift.apply(&bbox, motion, 120, 120),
            BoundingBox::new(95, 40, 20, 20)
        );

        let motion = Displacement { dy: 0, dx: 12 };
        assert_eq!(
            BoundaryPolicy::Clamp.apply(&bbox, motion, 120, 120),
            BoundingBox::new(102, 40, 18, 20)
        );
        assert_eq!(
            BoundaryPolicy::Shift.apply(&bbox, motion, 120, 120),
            BoundingBox::new(100, 40, 20, 20)
        );
    }
}
