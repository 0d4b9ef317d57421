//! Circular delay line with fractional, linearly interpolated reads.

#[derive(Debug, Clone)]
pub struct FractionalDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl FractionalDelay {
    /// Allocates `capacity` samples (at least 2) up front.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(2)],
            write_pos: 0,
        }
    }

    /// Longest usable delay in samples.
    #[inline]
    pub fn max_delay(&self) -> f32 {
        (self.buffer.len() - 2) as f32
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read `delay` samples behind the most recent write. Clamped to
    /// `[0, max_delay]`.
    #[inline]
    pub fn read(&self, delay: f32) -> f32 {
        let delay = if delay.is_finite() {
            delay.clamp(0.0, self.max_delay())
        } else {
            0.0
        };
        let len = self.buffer.len();
        let whole = delay.floor() as usize;
        let frac = delay - whole as f32;

        // write_pos points one past the newest sample
        let newest = (self.write_pos + len - 1) % len;
        let a = self.buffer[(newest + len - whole) % len];
        let b = self.buffer[(newest + len - whole - 1) % len];

        a + (b - a) * frac
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
