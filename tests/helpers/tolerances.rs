//! Tolerance constants for audio testing.
//!
//! Different checks require different precision levels.

/// Floating point rounding errors (for passthrough, exact gain).
/// Use for operations that should be mathematically exact.
pub const FLOAT_EPSILON: f32 = 1e-6;

/// DSP processing tolerance (filters, interpolation may have slight variations).
pub const DSP_EPSILON: f32 = 1e-4;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;

/// Absolute tolerance on an observed probability over ~10k seeded draws.
pub const DISTRIBUTION_TOLERANCE: f32 = 0.025;
