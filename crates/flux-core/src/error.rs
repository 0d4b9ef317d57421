//! Error types for flux-core.

use thiserror::Error;

/// Error type for flux-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0}. Must be finite and at least {min}", min = crate::MIN_SAMPLE_RATE)]
    InvalidSampleRate(f64),

    #[error("Invalid slice count: {0}. Must be between 1 and {max}", max = crate::MAX_SLICES)]
    InvalidSliceCount(usize),

    #[error("Invalid slice length range: min={min_ms}ms, max={max_ms}ms")]
    InvalidSliceLength { min_ms: f32, max_ms: f32 },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
