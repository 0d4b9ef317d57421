//! Normalized controls to engine parameters.
//!
//! Recomputed once per block. Every output is re-clamped to its domain so the
//! audio path never has to check.

use crate::controls::ControlSnapshot;
use crate::mode::SliceMode;
use flux_core::{ParameterRange, SliceGeometry, SlicerConfig, MAX_SLICES};
use flux_dsp::LofiSettings;
use serde::{Deserialize, Serialize};

/// Below this amount envelope modulation is off regardless of direction.
const ENV_AMOUNT_FLOOR: f32 = 0.01;

/// How the input envelope bends slice count and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeDirection {
    #[default]
    Off,
    /// Louder input: more, longer slices.
    Normal,
    /// Louder input: fewer, shorter slices.
    Inverted,
}

impl EnvelopeDirection {
    pub fn from_selector(position: u8) -> Self {
        match position {
            0 => EnvelopeDirection::Off,
            1 => EnvelopeDirection::Normal,
            _ => EnvelopeDirection::Inverted,
        }
    }

    pub fn selector(self) -> u8 {
        match self {
            EnvelopeDirection::Off => 0,
            EnvelopeDirection::Normal => 1,
            EnvelopeDirection::Inverted => 2,
        }
    }
}

/// Derived values the audio path runs on for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    pub active_slices: usize,
    /// Raw (unsmoothed) slice length target in samples.
    pub target_length: usize,
    pub feedback: f32,
    pub stutter: f32,
    pub mode: SliceMode,
    pub mix: f32,
    /// Linear output gain, 0 to 2.
    pub master_gain: f32,
    pub lofi: LofiSettings,
    pub env_attack_secs: f32,
    pub env_release_secs: f32,
    pub frozen: bool,
    pub bypassed: bool,
}

#[derive(Debug, Clone)]
pub struct ParameterMapper {
    slice_count: ParameterRange,
    slice_length_ms: ParameterRange,
    env_attack_ms: ParameterRange,
    env_release_ms: ParameterRange,
    geometry: SliceGeometry,
    samples_per_ms: f64,
}

#[inline]
fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl ParameterMapper {
    pub fn new(config: &SlicerConfig) -> Self {
        Self {
            slice_count: ParameterRange::stepped(1, MAX_SLICES as u32, 4),
            slice_length_ms: ParameterRange::knob_log(
                config.min_slice_ms,
                config.max_slice_ms,
                config.min_slice_ms,
            ),
            env_attack_ms: ParameterRange::linear(1.0, 200.0, 50.0),
            env_release_ms: ParameterRange::linear(10.0, 1000.0, 100.0),
            geometry: config.geometry(),
            samples_per_ms: config.sample_rate * 0.001,
        }
    }

    #[inline]
    pub fn geometry(&self) -> &SliceGeometry {
        &self.geometry
    }

    /// `floor(c * 15.999) + 1`, limited to the allocated slices.
    #[inline]
    pub fn slice_count(&self, control: f32) -> usize {
        (self.slice_count.denormalize(control) as usize).clamp(1, self.geometry.slices)
    }

    #[inline]
    pub fn slice_length_ms(&self, control: f32) -> f32 {
        self.slice_length_ms.denormalize(control)
    }

    /// Log-tapered length in samples, inside `[min_len, max_len]`.
    #[inline]
    pub fn slice_length_samples(&self, control: f32) -> usize {
        let samples = (self.slice_length_ms(control) as f64 * self.samples_per_ms).round() as usize;
        samples.clamp(self.geometry.min_len, self.geometry.max_len)
    }

    /// Slice count and length controls after envelope modulation.
    pub fn modulate(&self, snapshot: &ControlSnapshot, env_level: f32) -> (f32, f32) {
        let count = unit(snapshot.slice_count);
        let length = unit(snapshot.slice_length);
        let amount = unit(snapshot.env_amount);

        let env = match snapshot.env_direction {
            EnvelopeDirection::Off => return (count, length),
            _ if amount <= ENV_AMOUNT_FLOOR => return (count, length),
            EnvelopeDirection::Normal => unit(env_level),
            EnvelopeDirection::Inverted => 1.0 - unit(env_level),
        };

        let scale = 1.0 + (env - 0.5) * amount;
        (unit(count * scale), unit(length * scale))
    }

    pub fn map(&self, snapshot: &ControlSnapshot, env_level: f32) -> EngineParams {
        let (count, length) = self.modulate(snapshot, env_level);

        EngineParams {
            active_slices: self.slice_count(count),
            target_length: self.slice_length_samples(length),
            feedback: unit(snapshot.feedback),
            stutter: unit(snapshot.stutter),
            mode: snapshot.mode,
            mix: unit(snapshot.mix),
            master_gain: unit(snapshot.master) * 2.0,
            lofi: LofiSettings {
                crush: unit(snapshot.crush),
                wobble: unit(snapshot.wobble),
                dust: unit(snapshot.dust),
            },
            env_attack_secs: self.env_attack_ms.denormalize(snapshot.env_attack) * 0.001,
            env_release_secs: self.env_release_ms.denormalize(snapshot.env_release) * 0.001,
            frozen: snapshot.frozen,
            bypassed: snapshot.bypassed,
        }
    }
}
