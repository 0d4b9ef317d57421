//! The single randomness seam of the slicer.
//!
//! Capture (random mode), the playback sequencer and the stutter policy all
//! draw from one generator owned by the engine, so a fixed seed replays the
//! exact same slice pattern.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f32;

    /// Uniform index in `[0, n)`. Returns 0 when `n <= 1` without drawing.
    fn below(&mut self, n: usize) -> usize;

    fn coin(&mut self) -> bool;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn uniform(&mut self) -> f32 {
        self.gen::<f32>()
    }

    #[inline]
    fn below(&mut self, n: usize) -> usize {
        if n <= 1 {
            0
        } else {
            self.gen_range(0..n)
        }
    }

    #[inline]
    fn coin(&mut self) -> bool {
        self.gen::<bool>()
    }
}

/// Engine generator. `None` seeds from OS entropy.
pub fn engine_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}
