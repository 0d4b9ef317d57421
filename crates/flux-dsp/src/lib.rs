//! RT-safe DSP building blocks for the slicer: filters, modulation sources,
//! a fractional delay line, and the lo-fi degradation chain.
//!
//! Everything here is allocation-free after construction and processes one
//! sample per call.

mod error;
pub use error::{Error, Result};

mod one_pole;
pub use one_pole::OnePole;

mod lfo;
pub use lfo::Lfo;

mod delay_line;
pub use delay_line::FractionalDelay;

mod envelope_follower;
pub use envelope_follower::EnvelopeFollower;

mod mix;
pub use mix::DryWetMix;

pub mod lofi;
pub use lofi::{Dust, LofiChain, LofiSettings, RateReducer, Wobble};
