//! Playback sequencer: picks which slice plays next, in which direction, and
//! how many times.
//!
//! Two rules keep it from ever reading a slice that is being written:
//! - before each read, a cursor sitting on the capture slice is moved to the
//!   mode neighbor (silence if that one is empty)
//! - at the end of a slice, a choice that lands on the capture slice is
//!   replaced by its mode neighbor, and the current slice replays when the
//!   final choice is still empty

use crate::crossfade::SliceEnvelope;
use crate::mode::{wrap_index, Direction, SliceMode};
use crate::random::RandomSource;
use crate::store::SliceStore;
use crate::stutter::StutterPolicy;

/// Read position, direction and repeat bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackCursor {
    pub index: usize,
    /// Samples played in the current pass, counting up regardless of direction.
    pub position: usize,
    pub direction: Direction,
    /// Completed passes over the current slice.
    pub repeat: u32,
    /// Passes to play before moving on.
    pub repeats: u32,
}

/// Per-sample view of the engine the sequencer needs.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackContext {
    pub mode: SliceMode,
    pub stutter: f32,
    pub active: usize,
    pub capture_index: usize,
}

#[derive(Debug, Clone)]
pub struct PlaybackSequencer {
    cursor: PlaybackCursor,
    envelope: SliceEnvelope,
    started: bool,
}

impl PlaybackSequencer {
    pub fn new(envelope: SliceEnvelope) -> Self {
        Self {
            cursor: PlaybackCursor {
                repeats: 1,
                ..PlaybackCursor::default()
            },
            envelope,
            started: false,
        }
    }

    #[inline]
    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    #[inline]
    pub fn envelope(&self) -> &SliceEnvelope {
        &self.envelope
    }

    /// `false` until the first slice has been captured.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Jump to freshly captured content and start playing.
    pub fn start_at(
        &mut self,
        index: usize,
        ctx: &PlaybackContext,
        store: &SliceStore,
        rng: &mut impl RandomSource,
    ) {
        self.started = true;
        self.enter(index, ctx, store, rng);
    }

    pub fn reset(&mut self) {
        self.cursor = PlaybackCursor {
            repeats: 1,
            ..PlaybackCursor::default()
        };
        self.started = false;
    }

    fn enter(
        &mut self,
        index: usize,
        ctx: &PlaybackContext,
        store: &SliceStore,
        rng: &mut impl RandomSource,
    ) {
        self.cursor = PlaybackCursor {
            index,
            position: 0,
            direction: ctx.mode.draw_direction(rng),
            repeat: 0,
            repeats: StutterPolicy::repeat_count(ctx.stutter, rng),
        };
        self.envelope.retune(store.length(index));
    }

    /// Produce the next enveloped sample.
    pub fn next_sample(
        &mut self,
        ctx: &PlaybackContext,
        store: &SliceStore,
        rng: &mut impl RandomSource,
    ) -> f32 {
        if !self.started {
            return 0.0;
        }

        if self.cursor.index >= ctx.active {
            let index = wrap_index(self.cursor.index as isize, ctx.active);
            self.enter(index, ctx, store, rng);
        }

        if self.cursor.index == ctx.capture_index {
            let neighbor = ctx.mode.playback_neighbor(self.cursor.index, ctx.active);
            self.enter(neighbor, ctx, store, rng);
            if neighbor == ctx.capture_index {
                return 0.0;
            }
        }

        let len = store.length(self.cursor.index);
        if len == 0 {
            self.advance(ctx, store, rng);
            return 0.0;
        }
        self.envelope.retune(len);

        let position = self.cursor.position.min(len - 1);
        let offset = match self.cursor.direction {
            Direction::Forward => position,
            Direction::Backward => len - 1 - position,
        };
        let sample = store.read(self.cursor.index, offset) * self.envelope.gain(position);

        self.cursor.position = position + 1;
        if self.cursor.position >= len {
            self.finish_pass(ctx, store, rng);
        }

        sample
    }

    fn finish_pass(
        &mut self,
        ctx: &PlaybackContext,
        store: &SliceStore,
        rng: &mut impl RandomSource,
    ) {
        self.cursor.position = 0;
        self.cursor.repeat += 1;
        if self.cursor.repeat >= self.cursor.repeats {
            self.advance(ctx, store, rng);
        }
    }

    fn advance(&mut self, ctx: &PlaybackContext, store: &SliceStore, rng: &mut impl RandomSource) {
        let current = self.cursor.index;
        let mut next = StutterPolicy::shuffle(ctx.stutter, ctx.active, rng)
            .unwrap_or_else(|| ctx.mode.playback_neighbor(current, ctx.active));

        if next == ctx.capture_index {
            next = ctx.mode.playback_neighbor(next, ctx.active);
        }

        let target = if next != ctx.capture_index && store.is_valid(next) {
            next
        } else {
            current
        };
        self.enter(target, ctx, store, rng);
    }
}
