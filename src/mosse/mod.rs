//! MOSSE (Minimum Output Sum of Squared Error) correlation-filter tracking.

pub mod config;
pub mod filter;
mod tracker;

pub use config::{BoundaryPolicy, TrackerConfig, DEFAULT_LEARNING_RATE};
pub use filter::FilterState;
pub use tracker::MosseTracker;
