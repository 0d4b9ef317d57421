//! Smoothed parameter values for zipper-free control changes.
//!
//! Two flavors:
//! - [`SmoothedValue`]: linear ramp to the target over a fixed time.
//! - [`OnePoleSmoother`]: exponential approach with a per-sample coefficient.
//!   Never quite lands on the target, which suits slowly drifting quantities
//!   such as the slice-length target.
//!
//! # Example
//!
//! ```
//! use flux_core::SmoothedValue;
//!
//! // 10ms smoothing at 48kHz
//! let mut mix = SmoothedValue::new(0.5, 0.010, 48000.0);
//! mix.set_target(1.0);
//!
//! # let mut buffer = [0.0f32; 512];
//! for sample in buffer.iter_mut() {
//!     *sample *= mix.next_sample();
//! }
//! ```

/// Linear ramp smoothing. Call [`next_sample()`](SmoothedValue::next_sample) once per sample.
#[derive(Debug, Clone)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    step: f32,
    samples_remaining: u32,
    smooth_samples: u32,
}

impl SmoothedValue {
    pub fn new(initial: f32, smooth_time_secs: f32, sample_rate: f32) -> Self {
        let smooth_samples = (smooth_time_secs * sample_rate).max(1.0) as u32;

        Self {
            current: initial,
            target: initial,
            step: 0.0,
            samples_remaining: 0,
            smooth_samples,
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() < f32::EPSILON {
            return;
        }

        self.target = target;
        self.samples_remaining = self.smooth_samples;
        self.step = (self.target - self.current) / self.samples_remaining as f32;
    }

    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.samples_remaining = 0;
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.samples_remaining > 0 {
            self.current += self.step;
            self.samples_remaining -= 1;

            // Snap to avoid drift
            if self.samples_remaining == 0 {
                self.current = self.target;
            }
        }

        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.samples_remaining > 0
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(0.0, 0.010, 48000.0)
    }
}

/// One-pole (exponential) smoother: `current += coeff * (target - current)`.
#[derive(Debug, Clone)]
pub struct OnePoleSmoother {
    current: f32,
    coeff: f32,
}

impl OnePoleSmoother {
    /// `coeff` is clamped to `(0, 1]`; 1.0 means no smoothing.
    pub fn new(initial: f32, coeff: f32) -> Self {
        Self {
            current: initial,
            coeff: coeff.clamp(f32::MIN_POSITIVE, 1.0),
        }
    }

    #[inline]
    pub fn next(&mut self, target: f32) -> f32 {
        self.current += self.coeff * (target - self.current);
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
    }

    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}
