//! Sample-and-hold slicer.
//!
//! Captures the incoming signal into a ring of slice buffers, closing each
//! slice on a zero crossing, and plays the captured slices back with
//! mode-driven ordering, stutter repeats, random shuffles and a click-free
//! fade envelope.
//!
//! # Example
//!
//! ```
//! use flux_core::SlicerConfig;
//! use flux_slicer::{SlicerControls, SlicerUnit, SliceMode};
//!
//! let controls = SlicerControls::default();
//! let mut unit = SlicerUnit::new(SlicerConfig::default(), controls.clone()).unwrap();
//!
//! controls.set_mode(SliceMode::Reverse);
//! controls.set_stutter(0.5);
//!
//! let input = [0.0f32; 512];
//! let (mut left, mut right) = ([0.0f32; 512], [0.0f32; 512]);
//! unit.process_block(&input, &mut left, &mut right);
//! ```

mod error;
pub use error::{Error, Result};

pub mod random;
pub use random::{engine_rng, RandomSource};

pub mod mode;
pub use mode::{Direction, SliceMode};

pub mod store;
pub use store::{Slice, SliceStore};

pub mod capture;
pub use capture::{CaptureCursor, CaptureEngine, CaptureState, FinalizedSlice};

pub mod stutter;
pub use stutter::StutterPolicy;

pub mod crossfade;
pub use crossfade::SliceEnvelope;

pub mod playback;
pub use playback::{PlaybackContext, PlaybackCursor, PlaybackSequencer};

pub mod mapper;
pub use mapper::{EngineParams, EnvelopeDirection, ParameterMapper};

pub mod controls;
pub use controls::{ControlSnapshot, SlicerControls};

mod unit;
pub use unit::{SampleTap, SlicerUnit};
