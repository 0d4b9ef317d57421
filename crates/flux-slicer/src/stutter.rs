//! Stutter and shuffle decisions driven by a single control.
//!
//! Repeat counts are musical subdivisions. The table skews toward longer
//! stutters as the control rises:
//!
//! | stutter      | x1  | x2  | x4  | x8  |
//! |--------------|-----|-----|-----|-----|
//! | `< 0.01`     | 100%|     |     |     |
//! | `< 0.25`     | 95% | 5%  |     |     |
//! | `< 0.50`     | 60% | 30% | 10% |     |
//! | `< 0.75`     | 30% | 40% | 20% | 10% |
//! | `>= 0.75`    | 10% | 30% | 30% | 30% |

use crate::random::RandomSource;

pub const SUBDIVISIONS: [u32; 4] = [1, 2, 4, 8];

/// Below this the policy never repeats and never shuffles.
pub const STUTTER_FLOOR: f32 = 0.01;

/// Upper bin edge and per-subdivision weights.
const TABLE: [(f32, [f32; 4]); 4] = [
    (0.25, [0.95, 0.05, 0.0, 0.0]),
    (0.50, [0.60, 0.30, 0.10, 0.0]),
    (0.75, [0.30, 0.40, 0.20, 0.10]),
    (f32::INFINITY, [0.10, 0.30, 0.30, 0.30]),
];

/// Probability of each entry of [`SUBDIVISIONS`] at this control value.
pub fn repeat_weights(stutter: f32) -> [f32; 4] {
    if !(stutter >= STUTTER_FLOOR) {
        return [1.0, 0.0, 0.0, 0.0];
    }
    TABLE
        .iter()
        .find(|(edge, _)| stutter < *edge)
        .map_or([1.0, 0.0, 0.0, 0.0], |(_, weights)| *weights)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StutterPolicy;

impl StutterPolicy {
    /// Times the next slice plays before the sequencer moves on.
    pub fn repeat_count(stutter: f32, rng: &mut impl RandomSource) -> u32 {
        if !(stutter >= STUTTER_FLOOR) {
            return 1;
        }

        let weights = repeat_weights(stutter);
        let draw = rng.uniform();
        let mut cumulative = 0.0;
        for (count, weight) in SUBDIVISIONS.iter().zip(weights) {
            cumulative += weight;
            if draw < cumulative {
                return *count;
            }
        }
        // Rounding left the draw above the summed weights
        SUBDIVISIONS
            .iter()
            .zip(weights)
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map_or(1, |(count, _)| *count)
    }

    /// `Some(index)` when this transition should jump to a uniformly random
    /// slice instead of the mode neighbor.
    pub fn shuffle(stutter: f32, active: usize, rng: &mut impl RandomSource) -> Option<usize> {
        if !(stutter >= STUTTER_FLOOR) {
            return None;
        }
        if rng.uniform() < stutter {
            Some(rng.below(active))
        } else {
            None
        }
    }
}
