//! Lock-free scalars shared between the control poller and the audio routine.
//!
//! The polling path writes, the audio path reads once per block. Every field is a
//! single machine word so neither side can observe a torn value.

use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Cache-line aligned atomic f32.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFloat {
    value: AtomicF32,
}

impl AtomicFloat {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }

    /// Store a normalized control value. NaN is stored as 0.0.
    #[inline]
    pub fn set_unit(&self, value: f32) {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.set(value);
    }
}

impl Clone for AtomicFloat {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFloat {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Cache-line aligned atomic bool, used for latches toggled by edge events.
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicFlag {
    value: AtomicBool,
}

impl AtomicFlag {
    pub fn new(value: bool) -> Self {
        Self {
            value: AtomicBool::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.value.store(value, Ordering::Release);
    }

    /// Flip the latch and return the new state.
    #[inline]
    pub fn toggle(&self) -> bool {
        !self.value.fetch_xor(true, Ordering::AcqRel)
    }
}

impl Clone for AtomicFlag {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl Default for AtomicFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Atomic selector for small closed enumerations (switch positions).
#[derive(Debug)]
#[repr(align(64))]
pub struct AtomicSelector {
    value: AtomicU8,
    max: u8,
}

impl AtomicSelector {
    pub fn new(value: u8, max: u8) -> Self {
        Self {
            value: AtomicU8::new(value.min(max)),
            max,
        }
    }

    #[inline]
    pub fn get(&self) -> u8 {
        self.value.load(Ordering::Acquire)
    }

    /// Store a position, clamped to the selector's range. Returns `false` if
    /// the requested position had to be clamped.
    #[inline]
    pub fn set(&self, value: u8) -> bool {
        self.value.store(value.min(self.max), Ordering::Release);
        value <= self.max
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

impl Clone for AtomicSelector {
    fn clone(&self) -> Self {
        Self::new(self.get(), self.max)
    }
}
