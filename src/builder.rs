//! Builder for configuring and constructing a `FluxEngine`.

use crate::{FluxEngine, Result};
use flux_core::{CrushPosition, FeedbackTap, MixCurve, SlicerConfig};
use flux_slicer::{ControlSnapshot, SlicerControls, SlicerUnit};

/// Every setting starts at its [`SlicerConfig`] / [`ControlSnapshot`] default;
/// `build()` validates the result.
///
/// # Example
///
/// ```
/// use flux::prelude::*;
///
/// let engine = FluxEngine::builder()
///     .sample_rate(44_100.0)
///     .max_slices(8)
///     .seed(42)
///     .build()?;
///
/// assert_eq!(engine.sample_rate(), 44_100.0);
/// # Ok::<(), flux::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FluxEngineBuilder {
    config: SlicerConfig,
    controls: ControlSnapshot,
}

impl FluxEngineBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: SlicerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the configuration from a (possibly partial) JSON document.
    pub fn config_json(mut self, json: &str) -> Result<Self> {
        self.config = SlicerConfig::from_json(json)?;
        Ok(self)
    }

    /// Default: 48000
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    /// Default: 16
    pub fn max_slices(mut self, slices: usize) -> Self {
        self.config.max_slices = slices;
        self
    }

    /// Default: 100ms to 500ms
    pub fn slice_range_ms(mut self, min_ms: f32, max_ms: f32) -> Self {
        self.config.min_slice_ms = min_ms;
        self.config.max_slice_ms = max_ms;
        self
    }

    /// Fixed seed for a reproducible slice pattern. Unseeded engines draw from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn crush_position(mut self, position: CrushPosition) -> Self {
        self.config.crush_position = position;
        self
    }

    pub fn feedback_tap(mut self, tap: FeedbackTap) -> Self {
        self.config.feedback_tap = tap;
        self
    }

    pub fn mix_curve(mut self, curve: MixCurve) -> Self {
        self.config.mix_curve = curve;
        self
    }

    pub fn start_bypassed(mut self, bypassed: bool) -> Self {
        self.config.start_bypassed = bypassed;
        self
    }

    /// Initial control positions. The smoothed slice length starts at the
    /// target these imply.
    pub fn controls(mut self, controls: ControlSnapshot) -> Self {
        self.controls = controls;
        self
    }

    pub fn build(self) -> Result<FluxEngine> {
        let controls = SlicerControls::new(&self.controls);
        let unit = SlicerUnit::new(self.config, controls)?;
        Ok(FluxEngine::from_unit(unit))
    }
}
