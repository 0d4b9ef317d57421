//! Fixed-capacity arena of slice buffers.
//!
//! All memory is allocated in [`SliceStore::new`]. Writes past capacity and
//! reads past a slice's realized length are dropped or return silence; no
//! access can panic.

#[derive(Debug, Clone)]
pub struct Slice {
    samples: Box<[f32]>,
    length: usize,
}

impl Slice {
    fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity].into_boxed_slice(),
            length: 0,
        }
    }

    /// Realized length in samples. Zero means the slice holds no content.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// The realized part of the buffer.
    pub fn samples(&self) -> &[f32] {
        &self.samples[..self.length]
    }

    /// The whole buffer, including anything written past the realized length.
    pub fn raw(&self) -> &[f32] {
        &self.samples
    }
}

#[derive(Debug, Clone)]
pub struct SliceStore {
    slices: Vec<Slice>,
    capacity: usize,
}

impl SliceStore {
    pub fn new(slots: usize, capacity: usize) -> Self {
        Self {
            slices: (0..slots).map(|_| Slice::new(capacity)).collect(),
            capacity,
        }
    }

    #[inline]
    pub fn slots(&self) -> usize {
        self.slices.len()
    }

    /// Per-slice capacity in samples.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `false` (and writes nothing) when `index` or `offset` is out of range.
    #[inline]
    pub fn write(&mut self, index: usize, offset: usize, sample: f32) -> bool {
        match self
            .slices
            .get_mut(index)
            .and_then(|slice| slice.samples.get_mut(offset))
        {
            Some(slot) => {
                *slot = sample;
                true
            }
            None => false,
        }
    }

    /// Record the realized length, clamped to capacity.
    #[inline]
    pub fn finalize(&mut self, index: usize, length: usize) {
        if let Some(slice) = self.slices.get_mut(index) {
            slice.length = length.min(self.capacity);
        }
    }

    /// Silence for empty slices and out-of-range access.
    #[inline]
    pub fn read(&self, index: usize, offset: usize) -> f32 {
        match self.slices.get(index) {
            Some(slice) if offset < slice.length => slice.samples[offset],
            _ => 0.0,
        }
    }

    #[inline]
    pub fn is_valid(&self, index: usize) -> bool {
        self.length(index) > 0
    }

    #[inline]
    pub fn length(&self, index: usize) -> usize {
        self.slices.get(index).map_or(0, Slice::len)
    }

    pub fn slice(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter()
    }

    /// Zero every buffer and forget every length.
    pub fn clear(&mut self) {
        for slice in &mut self.slices {
            slice.samples.fill(0.0);
            slice.length = 0;
        }
    }
}
