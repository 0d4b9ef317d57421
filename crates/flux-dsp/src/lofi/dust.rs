//! Sparse crackle: rare random impulses through a warm low-pass.

use crate::OnePole;
use flux_core::ParameterRange;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const DUST_CUTOFF_HZ: f32 = 600.0;

#[derive(Debug, Clone)]
pub struct Dust {
    /// Impulse probability per sample, at most 2%.
    density: ParameterRange,
    level: ParameterRange,
    rng: SmallRng,
    filter: OnePole,
}

impl Dust {
    pub fn new(seed: u64, sample_rate: f32) -> Self {
        Self {
            density: ParameterRange::squared(0.0, 0.02, 0.0),
            level: ParameterRange::squared(0.0, 0.05, 0.0),
            rng: SmallRng::seed_from_u64(seed),
            filter: OnePole::new(DUST_CUTOFF_HZ, sample_rate),
        }
    }

    #[inline]
    pub fn density(&self, amount: f32) -> f32 {
        self.density.denormalize(amount)
    }

    #[inline]
    pub fn level(&self, amount: f32) -> f32 {
        self.level.denormalize(amount)
    }

    /// Next noise sample to add to the wet path. Zero at `amount <= 0`.
    #[inline]
    pub fn process(&mut self, amount: f32) -> f32 {
        if !(amount > 0.0) {
            return 0.0;
        }
        let n = amount.min(1.0);
        let density = self.density(n);

        let u: f32 = self.rng.gen();
        let impulse = if u < density {
            let magnitude = u / density;
            if self.rng.gen::<bool>() {
                magnitude
            } else {
                -magnitude
            }
        } else {
            0.0
        };

        let level = self.level(n);
        self.filter.process(impulse) * level
    }

    pub fn reset(&mut self) {
        self.filter.reset();
    }
}
