//! Parameter ranges and response curves for normalized knob controls.
//!
//! Every control arrives as a normalized `0.0..=1.0` value. A [`ParameterRange`]
//! maps it onto the engine's real domain and always returns a value inside
//! `[min, max]`.
//!
//! # Example
//!
//! ```
//! use flux_core::ParameterRange;
//!
//! // Slice length: 100ms to 500ms with the log10 knob taper
//! let length = ParameterRange::knob_log(100.0, 500.0, 300.0);
//! assert!((length.denormalize(0.0) - 100.0).abs() < 1e-3);
//! assert!((length.denormalize(1.0) - 500.0).abs() < 1e-3);
//! ```

/// How a normalized value is shaped before being spread over the range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParameterScale {
    /// `real = min + n * (max - min)`
    #[default]
    Linear,

    /// Log10 knob taper: `real = min + log10(1 + 9n) * (max - min)`.
    ///
    /// Front-loads resolution at the low end while still hitting both endpoints
    /// exactly (`log10(1) = 0`, `log10(10) = 1`).
    KnobLog,

    /// `real = min + n^2 * (max - min)`
    Squared,

    /// Evenly sized buckets of integers: `real = min + floor(n * (span + 1 - eps))`.
    ///
    /// Every integer in `[min, max]` gets an equal share of knob travel.
    Stepped,
}

/// Range with a response curve for one normalized control.
#[derive(Debug, Clone)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Default real value
    pub default: f32,
    /// Response curve
    pub scale: ParameterScale,
}

const STEP_EPSILON: f32 = 0.001;

impl ParameterRange {
    pub fn new(min: f32, max: f32, default: f32, scale: ParameterScale) -> Self {
        debug_assert!(max >= min, "max must not be below min");

        Self {
            min,
            max,
            default: default.clamp(min, max),
            scale,
        }
    }

    pub fn linear(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Linear)
    }

    pub fn knob_log(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::KnobLog)
    }

    pub fn squared(min: f32, max: f32, default: f32) -> Self {
        Self::new(min, max, default, ParameterScale::Squared)
    }

    pub fn stepped(min: u32, max: u32, default: u32) -> Self {
        Self::new(
            min as f32,
            max as f32,
            default as f32,
            ParameterScale::Stepped,
        )
    }

    /// Convert a normalized value (0.0-1.0) to a real value. NaN maps to `min`.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let span = self.span();

        let real = match self.scale {
            ParameterScale::Linear => self.min + n * span,
            ParameterScale::KnobLog => {
                self.min + (9.0 * n).ln_1p() / core::f32::consts::LN_10 * span
            }
            ParameterScale::Squared => self.min + n * n * span,
            ParameterScale::Stepped => self.min + (n * (span + 1.0 - STEP_EPSILON)).floor(),
        };

        self.clamp(real)
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}
