//! Sample-and-hold rate reduction with an anti-alias low-pass.

use crate::OnePole;

const MIN_CUTOFF_HZ: f32 = 500.0;
const MAX_CUTOFF_HZ: f32 = 18_000.0;
const MAX_HOLD: f32 = 31.0;

#[derive(Debug, Clone)]
pub struct RateReducer {
    hold: f32,
    counter: u32,
    filter: OnePole,
    sample_rate: f32,
    filter_ratio: f32,
}

/// `1 + floor(amount^2 * 31)`: samples each held value is repeated for.
#[inline]
pub fn downsample_factor(amount: f32) -> u32 {
    let amount = if amount.is_nan() { 0.0 } else { amount.clamp(0.0, 1.0) };
    1 + (amount * amount * MAX_HOLD).floor() as u32
}

impl RateReducer {
    /// `filter_ratio` places the low-pass at that fraction of the reduced Nyquist.
    pub fn new(sample_rate: f32, filter_ratio: f32) -> Self {
        Self {
            hold: 0.0,
            counter: 0,
            filter: OnePole::new(MAX_CUTOFF_HZ, sample_rate),
            sample_rate,
            filter_ratio: filter_ratio.clamp(0.01, 1.0),
        }
    }

    /// Cutoff the tracking filter uses for a given amount.
    #[inline]
    pub fn cutoff_for(&self, amount: f32) -> f32 {
        let nyquist = self.sample_rate / downsample_factor(amount) as f32 * 0.5;
        (nyquist * self.filter_ratio).clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ)
    }

    /// At `amount <= 0` the input is returned untouched and no state changes.
    #[inline]
    pub fn process(&mut self, input: f32, amount: f32) -> f32 {
        if !(amount > 0.0) {
            return input;
        }

        let factor = downsample_factor(amount);
        self.filter.set_cutoff(self.cutoff_for(amount));

        if self.counter == 0 {
            self.hold = input;
        }
        self.counter += 1;
        if self.counter >= factor {
            self.counter = 0;
        }

        self.filter.process(self.hold)
    }

    pub fn reset(&mut self) {
        self.hold = 0.0;
        self.counter = 0;
        self.filter.reset();
    }
}
