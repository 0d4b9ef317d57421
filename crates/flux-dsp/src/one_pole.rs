//! Single-pole low-pass filter.

use core::f32::consts::TAU;

/// `y += a * (x - y)` with `a = 1 - exp(-2π fc / fs)`.
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
    cutoff: f32,
    sample_rate: f32,
}

impl OnePole {
    pub fn new(cutoff_hz: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 1.0,
            cutoff: 0.0,
            sample_rate,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    /// Cutoff is at least 1 Hz and below Nyquist whenever the rate allows.
    /// Recomputes only when it actually moves.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        let cutoff = cutoff_hz.min(self.sample_rate * 0.49).max(1.0);
        if cutoff == self.cutoff {
            return;
        }
        self.cutoff = cutoff;
        self.coeff = 1.0 - (-TAU * cutoff / self.sample_rate).exp();
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state += self.coeff * (input - self.state);
        self.state
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
