//! Tape-style pitch wobble: an LFO sweeping a short delay line.

use crate::{FractionalDelay, Lfo};
use flux_core::ParameterRange;

const CENTER_DELAY_MS: f32 = 5.0;
const BUFFER_MS: f32 = 12.0;

#[derive(Debug, Clone)]
pub struct Wobble {
    /// LFO rate: 0.5 Hz to 6 Hz on a squared curve.
    rate: ParameterRange,
    /// Wet share of the output, capped at 50%.
    mix: ParameterRange,
    lfo: Lfo,
    line: FractionalDelay,
    samples_per_ms: f32,
}

impl Wobble {
    pub fn new(sample_rate: f32) -> Self {
        let samples_per_ms = sample_rate * 0.001;
        Self {
            rate: ParameterRange::squared(0.5, 6.0, 0.5),
            mix: ParameterRange::squared(0.0, 0.5, 0.0),
            lfo: Lfo::new(1.0, sample_rate),
            line: FractionalDelay::new((BUFFER_MS * samples_per_ms).ceil() as usize + 2),
            samples_per_ms,
        }
    }

    #[inline]
    pub fn rate_hz(&self, amount: f32) -> f32 {
        self.rate.denormalize(amount)
    }

    #[inline]
    pub fn wet_mix(&self, amount: f32) -> f32 {
        self.mix.denormalize(amount)
    }

    /// At `amount <= 0` the input is returned untouched.
    #[inline]
    pub fn process(&mut self, input: f32, amount: f32) -> f32 {
        if !(amount > 0.0) {
            return input;
        }
        let w = amount.min(1.0);

        let rate = self.rate_hz(w);
        self.lfo.set_frequency(rate);
        let depth_ms = 2.0 + w * 6.0;
        let delay_ms = CENTER_DELAY_MS + self.lfo.next() * depth_ms * 0.5;

        self.line.write(input);
        let wobbled = self.line.read(delay_ms * self.samples_per_ms);

        let mix = self.wet_mix(w);
        input * (1.0 - mix) + wobbled * mix
    }

    pub fn reset(&mut self) {
        self.lfo.reset();
        self.line.clear();
    }
}
