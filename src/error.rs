//! Centralized error type for the flux umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] flux_core::Error),

    #[error("Slicer: {0}")]
    Slicer(#[from] flux_slicer::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
