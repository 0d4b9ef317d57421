//! Per-slice fade envelope.
//!
//! Each slice fades in from its first played sample and out toward its last,
//! so the seam between any two slices starts and ends at zero gain. The fade
//! length is recomputed whenever playback moves to a slice (or the slice's
//! length changes) and cached until then.

/// `min(max(len * ratio, min_fade), len / 3)`.
#[inline]
pub fn fade_length(slice_len: usize, ratio: f32, min_fade: usize) -> usize {
    let proportional = (slice_len as f32 * ratio) as usize;
    proportional.max(min_fade).min(slice_len / 3)
}

#[derive(Debug, Clone)]
pub struct SliceEnvelope {
    ratio: f32,
    min_fade: usize,
    slice_len: usize,
    fade_len: usize,
}

impl SliceEnvelope {
    pub fn new(ratio: f32, min_fade: usize) -> Self {
        Self {
            ratio,
            min_fade,
            slice_len: 0,
            fade_len: 0,
        }
    }

    /// Recompute the cached fade length for a slice of `slice_len` samples.
    #[inline]
    pub fn retune(&mut self, slice_len: usize) {
        if slice_len == self.slice_len {
            return;
        }
        self.slice_len = slice_len;
        self.fade_len = fade_length(slice_len, self.ratio, self.min_fade);
    }

    #[inline]
    pub fn fade_len(&self) -> usize {
        self.fade_len
    }

    #[inline]
    pub fn slice_len(&self) -> usize {
        self.slice_len
    }

    /// Gain at `position` samples into the slice, always in `[0, 1]`.
    #[inline]
    pub fn gain(&self, position: usize) -> f32 {
        if self.fade_len == 0 {
            return 1.0;
        }
        let fade = self.fade_len as f32;
        let fade_in = position as f32 / fade;
        let fade_out = self.slice_len.saturating_sub(position) as f32 / fade;
        fade_in.min(fade_out).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fade_length_rules() {
        // 15% of 5760 = 864
        assert_eq!(fade_length(5760, 0.15, 240), 864);
        // 15% of 1000 = 150, floored at 240
        assert_eq!(fade_length(1000, 0.15, 240), 240);
        // floor of 240 exceeds a third of 600
        assert_eq!(fade_length(600, 0.15, 240), 200);
        assert_eq!(fade_length(2, 0.15, 240), 0);
    }

    #[test]
    fn test_envelope_shape() {
        let mut env = SliceEnvelope::new(0.15, 240);
        env.retune(5760);
        assert_eq!(env.gain(0), 0.0);
        assert_relative_eq!(env.gain(432), 0.5);
        assert_eq!(env.gain(2880), 1.0);
        assert_relative_eq!(env.gain(5759), 1.0 / 864.0);
        assert_eq!(env.gain(5760), 0.0);
    }

    #[test]
    fn test_no_fade_on_tiny_slices() {
        let mut env = SliceEnvelope::new(0.15, 240);
        env.retune(2);
        assert_eq!(env.gain(0), 1.0);
        assert_eq!(env.gain(1), 1.0);
    }

    #[test]
    fn test_retune_only_on_change() {
        let mut env = SliceEnvelope::new(0.15, 0);
        env.retune(1000);
        assert_eq!(env.fade_len(), 150);
        env.retune(1000);
        assert_eq!(env.slice_len(), 1000);
        env.retune(3000);
        assert_eq!(env.fade_len(), 450);
    }
}
