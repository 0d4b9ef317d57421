//! Capture engine: writes the input into the current slice and closes the
//! slice on a zero crossing once the target length is reached.
//!
//! ```text
//! Accumulating --(offset >= target)--> SearchingZeroCrossing
//! SearchingZeroCrossing --(crossing | timeout | capacity)--> finalize --> Accumulating
//! ```
//!
//! A sign flip only counts once the signal has been louder than the hysteresis
//! threshold since the search began, so near-silent input cannot end a slice
//! early on noise.

use crate::mode::{wrap_index, SliceMode};
use crate::random::RandomSource;
use crate::store::SliceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Accumulating,
    SearchingZeroCrossing,
}

/// Write position and zero-crossing search state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaptureCursor {
    pub index: usize,
    pub offset: usize,
    pub state: CaptureState,
    /// Samples spent searching for a crossing.
    pub searched: usize,
    /// Set once the signal has left the hysteresis band during the search.
    pub armed: bool,
}

/// A slice that just closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizedSlice {
    pub index: usize,
    pub length: usize,
    /// Where capture continues.
    pub next_index: usize,
}

#[derive(Debug, Clone)]
pub struct CaptureEngine {
    cursor: CaptureCursor,
    previous: f32,
    search_window: usize,
    capacity: usize,
    threshold: f32,
}

impl CaptureEngine {
    pub fn new(search_window: usize, capacity: usize, threshold: f32) -> Self {
        Self {
            cursor: CaptureCursor::default(),
            previous: 0.0,
            search_window,
            capacity: capacity.max(1),
            threshold,
        }
    }

    #[inline]
    pub fn cursor(&self) -> &CaptureCursor {
        &self.cursor
    }

    /// Index currently being written.
    #[inline]
    pub fn index(&self) -> usize {
        self.cursor.index
    }

    /// Restart the current pass, e.g. after the active slice count shrank
    /// below the capture index.
    pub fn restart_at(&mut self, index: usize) {
        self.cursor = CaptureCursor {
            index,
            ..CaptureCursor::default()
        };
        self.previous = 0.0;
    }

    /// Keep the capture index inside `[0, active)`.
    ///
    /// An abandoned pass is closed at its write offset so the slot never
    /// holds fresh samples followed by the tail of an older pass.
    #[inline]
    pub fn constrain(&mut self, active: usize, store: &mut SliceStore) {
        if self.cursor.index < active {
            return;
        }
        if self.cursor.offset > 0 {
            store.finalize(self.cursor.index, self.cursor.offset);
        }
        self.restart_at(wrap_index(self.cursor.index as isize, active));
    }

    #[inline]
    fn is_crossing(&self, sample: f32) -> bool {
        self.cursor.armed
            && ((self.previous > 0.0 && sample <= 0.0) || (self.previous < 0.0 && sample >= 0.0))
    }

    /// Capture one sample. `target_len` is the smoothed slice-length target.
    pub fn process(
        &mut self,
        sample: f32,
        target_len: usize,
        active: usize,
        mode: SliceMode,
        store: &mut SliceStore,
        rng: &mut impl RandomSource,
    ) -> Option<FinalizedSlice> {
        self.constrain(active, store);

        if sample.abs() > self.threshold {
            self.cursor.armed = true;
        }
        let crossing = self.is_crossing(sample);

        store.write(self.cursor.index, self.cursor.offset, sample);
        self.cursor.offset += 1;
        self.previous = sample;

        let mut finalize = self.cursor.offset >= self.capacity;

        match self.cursor.state {
            CaptureState::Accumulating => {
                if self.cursor.offset >= target_len.clamp(1, self.capacity) {
                    self.cursor.state = CaptureState::SearchingZeroCrossing;
                    self.cursor.searched = 0;
                    self.cursor.armed = false;
                    finalize |= self.search_window == 0;
                }
            }
            CaptureState::SearchingZeroCrossing => {
                self.cursor.searched += 1;
                finalize |= crossing || self.cursor.searched >= self.search_window;
            }
        }

        if !finalize {
            return None;
        }

        let index = self.cursor.index;
        let length = self.cursor.offset;
        store.finalize(index, length);

        let next_index = mode.next_capture_index(index, active, rng);
        self.restart_at(next_index);

        Some(FinalizedSlice {
            index,
            length,
            next_index,
        })
    }
}
