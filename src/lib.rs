//! # Flux - Sample-and-Hold Slicer
//!
//! Real-time audio slicer built from modular crates.
//!
//! ## Architecture
//!
//! Flux is an umbrella crate that coordinates:
//! - **flux-core** - Runtime kernel (config, lock-free controls, smoothing, parameter curves)
//! - **flux-dsp** - DSP blocks (one-pole, LFO, fractional delay, envelope follower, lo-fi chain)
//! - **flux-slicer** - Slice capture, playback sequencing, stutter/shuffle, crossfades
//!
//! ## Quick Start
//!
//! ```
//! use flux::prelude::*;
//!
//! let mut engine = FluxEngine::builder()
//!     .sample_rate(48_000.0)
//!     .build()?;
//!
//! let controls = engine.controls();
//! controls.set_slice_count(0.2);
//! controls.set_mode(SliceMode::RandomDirection);
//!
//! let input = [0.0f32; 64];
//! let (mut left, mut right) = ([0.0f32; 64], [0.0f32; 64]);
//! engine.process_block(&input, &mut left, &mut right);
//! # Ok::<(), flux::Error>(())
//! ```

/// Re-export of flux-core for direct access
pub use flux_core as core;

/// Re-export of flux-dsp for direct access
pub use flux_dsp as dsp;

/// Re-export of flux-slicer for direct access
pub use flux_slicer as slicer;

pub use flux_core::{
    AudioUnit, CrushPosition, FeedbackTap, MixCurve, SliceGeometry, SlicerConfig, MAX_SLICES,
};
pub use flux_slicer::{
    ControlSnapshot, Direction, EnvelopeDirection, SliceMode, SlicerControls, SlicerUnit,
};

mod error;
pub use error::{Error, Result};

mod builder;
pub use builder::FluxEngineBuilder;

mod engine;
pub use engine::FluxEngine;

pub mod prelude {
    //! Everything needed to build and drive an engine.
    pub use crate::{
        ControlSnapshot, CrushPosition, EnvelopeDirection, FeedbackTap, FluxEngine,
        FluxEngineBuilder, MixCurve, SliceMode, SlicerConfig, SlicerControls,
    };
    pub use flux_core::AudioUnit;
}
