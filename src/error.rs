use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    /// Operands disagree in `(rows, cols)`.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl TrackError {
    pub(crate) fn check_shape(
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Result<(), TrackError> {
        if expected != found {
            return Err(TrackError::ShapeMismatch { expected, found });
        }
        Ok(())
    }
}
