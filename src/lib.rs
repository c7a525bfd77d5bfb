pub mod bbox;
pub mod complex;
pub mod dft;
pub mod error;
pub mod frame;
pub mod gauss;
pub mod mosse;
pub mod peak;
pub mod preprocess;

pub use bbox::BoundingBox;
pub use complex::ComplexPlane;
pub use dft::FourierBasis;
pub use error::TrackError;
pub use frame::GrayFrame;
pub use mosse::{BoundaryPolicy, FilterState, MosseTracker, TrackerConfig};
pub use peak::Displacement;
pub use preprocess::{LogHannPreprocessor, Preprocess};
