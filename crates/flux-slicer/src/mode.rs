//! Capture/playback modes as one closed enumeration plus a behavior table.
//!
//! Capture and playback never branch on the mode themselves; they ask the
//! table which [`Step`] to take and which [`Direction`] to read in.

use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Three-position mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceMode {
    #[default]
    Forward,
    Reverse,
    RandomDirection,
}

/// Read direction within a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// How an index moves to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionRule {
    Always(Direction),
    /// Independent coin flip per slice.
    CoinFlip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeBehavior {
    pub capture_step: Step,
    pub playback_step: Step,
    pub direction: DirectionRule,
}

const FORWARD: ModeBehavior = ModeBehavior {
    capture_step: Step::Next,
    playback_step: Step::Next,
    direction: DirectionRule::Always(Direction::Forward),
};

const REVERSE: ModeBehavior = ModeBehavior {
    capture_step: Step::Prev,
    playback_step: Step::Prev,
    direction: DirectionRule::Always(Direction::Backward),
};

const RANDOM_DIRECTION: ModeBehavior = ModeBehavior {
    capture_step: Step::Random,
    playback_step: Step::Next,
    direction: DirectionRule::CoinFlip,
};

/// Wrap a possibly out-of-range index into `[0, count)`. `count == 0` maps to 0.
#[inline]
pub fn wrap_index(index: isize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    index.rem_euclid(count as isize) as usize
}

impl Step {
    #[inline]
    pub fn apply(self, current: usize, count: usize, rng: &mut impl RandomSource) -> usize {
        match self {
            Step::Next => wrap_index(current as isize + 1, count),
            Step::Prev => wrap_index(current as isize - 1, count),
            Step::Random => rng.below(count),
        }
    }

    /// Deterministic neighbor; `Random` degrades to `Next`.
    #[inline]
    pub fn neighbor(self, current: usize, count: usize) -> usize {
        match self {
            Step::Prev => wrap_index(current as isize - 1, count),
            Step::Next | Step::Random => wrap_index(current as isize + 1, count),
        }
    }
}

impl SliceMode {
    pub const ALL: [SliceMode; 3] = [
        SliceMode::Forward,
        SliceMode::Reverse,
        SliceMode::RandomDirection,
    ];

    /// Switch position to mode. Positions past the last clamp to it.
    pub fn from_selector(position: u8) -> Self {
        match position {
            0 => SliceMode::Forward,
            1 => SliceMode::Reverse,
            _ => SliceMode::RandomDirection,
        }
    }

    pub fn selector(self) -> u8 {
        match self {
            SliceMode::Forward => 0,
            SliceMode::Reverse => 1,
            SliceMode::RandomDirection => 2,
        }
    }

    #[inline]
    pub const fn behavior(self) -> ModeBehavior {
        match self {
            SliceMode::Forward => FORWARD,
            SliceMode::Reverse => REVERSE,
            SliceMode::RandomDirection => RANDOM_DIRECTION,
        }
    }

    /// Index capture moves to after finalizing `current`.
    #[inline]
    pub fn next_capture_index(
        self,
        current: usize,
        count: usize,
        rng: &mut impl RandomSource,
    ) -> usize {
        self.behavior().capture_step.apply(current, count, rng)
    }

    /// The mode-determined neighbor playback moves to.
    #[inline]
    pub fn playback_neighbor(self, current: usize, count: usize) -> usize {
        self.behavior().playback_step.neighbor(current, count)
    }

    #[inline]
    pub fn draw_direction(self, rng: &mut impl RandomSource) -> Direction {
        match self.behavior().direction {
            DirectionRule::Always(direction) => direction,
            DirectionRule::CoinFlip => {
                if rng.coin() {
                    Direction::Backward
                } else {
                    Direction::Forward
                }
            }
        }
    }
}
