//! Runtime kernel for the Flux slicer.
//!
//! # Primary API
//!
//! - [`SlicerConfig`] / [`SliceGeometry`]: platform constants and the sample counts derived from them
//! - [`AtomicFloat`], [`AtomicFlag`], [`AtomicSelector`]: scalars crossing the control/audio boundary
//! - [`SmoothedValue`], [`OnePoleSmoother`]: zipper-free parameter changes
//! - [`ParameterRange`]: normalized knob value to engine value
//!
//! The DSP graph types come from fundsp and are re-exported so downstream
//! crates implement [`AudioUnit`] against a single version.

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{
    CrushPosition, FeedbackTap, MixCurve, SliceGeometry, SlicerConfig, MAX_SLICES,
    MIN_SAMPLE_RATE,
};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat, AtomicSelector};

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

pub mod smooth;
pub use smooth::{OnePoleSmoother, SmoothedValue};

pub mod dsp {
    //! Re-export of fundsp::prelude for DSP building blocks.
    pub use fundsp::prelude::*;
}

pub use fundsp::prelude::{AudioUnit, BufferMut, BufferRef};
pub use fundsp::signal::SignalFrame;
