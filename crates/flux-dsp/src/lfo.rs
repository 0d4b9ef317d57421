//! Free-running sine low frequency oscillator.

/// Sine at `phase` in `[0, 1)`, returning `[-1, 1]`.
#[inline]
fn sine(phase: f32) -> f32 {
    (phase * core::f32::consts::TAU).sin()
}

#[derive(Debug, Clone)]
pub struct Lfo {
    frequency: f32,
    phase: f32,
    sample_rate: f32,
}

impl Lfo {
    pub fn new(frequency_hz: f32, sample_rate: f32) -> Self {
        Self {
            frequency: frequency_hz,
            phase: 0.0,
            sample_rate,
        }
    }

    #[inline]
    pub fn set_frequency(&mut self, frequency_hz: f32) {
        self.frequency = frequency_hz.max(0.0);
    }

    #[inline]
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current value, then advance one sample.
    #[inline]
    pub fn next(&mut self) -> f32 {
        let value = sine(self.phase);

        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        value
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
