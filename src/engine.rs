//! The top-level slicer engine.

use crate::FluxEngineBuilder;
use flux_core::{AudioUnit, SlicerConfig};
use flux_slicer::{SlicerControls, SlicerUnit};

/// Owns the real-time slicer and hands out control handles.
///
/// The engine is driven by the host audio callback through
/// [`process_block`](FluxEngine::process_block). Control changes go through
/// the [`SlicerControls`] handle from any thread; they take effect at the
/// next block boundary.
///
/// # Example
///
/// ```
/// use flux::prelude::*;
///
/// let mut engine = FluxEngine::builder().seed(1).build()?;
/// let controls = engine.controls();
/// controls.set_stutter(0.5);
///
/// let input = vec![0.0f32; 256];
/// let (mut left, mut right) = (vec![0.0f32; 256], vec![0.0f32; 256]);
/// engine.process_block(&input, &mut left, &mut right);
///
/// controls.toggle_freeze();
/// assert!(engine.is_frozen());
/// # Ok::<(), flux::Error>(())
/// ```
#[derive(Clone)]
pub struct FluxEngine {
    unit: SlicerUnit,
}

impl FluxEngine {
    pub fn builder() -> FluxEngineBuilder {
        FluxEngineBuilder::default()
    }

    pub(crate) fn from_unit(unit: SlicerUnit) -> Self {
        Self { unit }
    }

    pub fn sample_rate(&self) -> f64 {
        self.unit.config().sample_rate
    }

    pub fn config(&self) -> &SlicerConfig {
        self.unit.config()
    }

    /// Clonable handle for the control-polling thread.
    pub fn controls(&self) -> SlicerControls {
        self.unit.controls().clone()
    }

    /// Mono in, identical left and right out. Processes
    /// `min(input.len(), left.len(), right.len())` samples.
    pub fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.unit.process_block(input, left, right);
    }

    /// Single-sample processing; controls are re-read on every call.
    pub fn tick(&mut self, input: f32) -> f32 {
        let mut output = [0.0f32; 2];
        self.unit.tick(&[input], &mut output);
        output[0]
    }

    /// Active indicator (inverse of bypass).
    pub fn is_active(&self) -> bool {
        self.unit.controls().is_active()
    }

    /// Frozen indicator.
    pub fn is_frozen(&self) -> bool {
        self.unit.controls().is_frozen()
    }

    /// Forget all captured audio and restart capture at slice 0.
    pub fn reset(&mut self) {
        self.unit.reset();
    }

    pub fn unit(&self) -> &SlicerUnit {
        &self.unit
    }

    /// Hand the slicer to a fundsp graph.
    pub fn into_unit(self) -> SlicerUnit {
        self.unit
    }
}
