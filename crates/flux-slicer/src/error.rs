//! Error types.

use thiserror::Error;

/// Error type for slicer construction.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected configuration.
    #[error(transparent)]
    Config(#[from] flux_core::Error),

    /// DSP stage could not be built.
    #[error("DSP error: {0}")]
    Dsp(#[from] flux_dsp::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
