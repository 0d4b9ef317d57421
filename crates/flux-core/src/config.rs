//! Platform constants and engine-wide options.
//!
//! Everything the slicer allocates or derives at construction time is decided
//! here. The audio path never reads a `SlicerConfig` directly; it reads the
//! sample counts [`SliceGeometry`] resolves from it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Hard upper bound on the number of slices.
pub const MAX_SLICES: usize = 16;

/// Lowest accepted sample rate. Filter cutoffs need a usable Nyquist band.
pub const MIN_SAMPLE_RATE: f64 = 1000.0;

/// Where the rate reducer sits in the signal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrushPosition {
    /// On the played-back (wet) signal, first stage of the lo-fi chain.
    #[default]
    Wet,
    /// On the input before capture; captured slices carry the degradation.
    Input,
}

/// Which wet signal is fed back into capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTap {
    /// Enveloped slice playback, before the lo-fi chain.
    #[default]
    PreLofi,
    /// Wet signal after the lo-fi chain.
    PostLofi,
}

/// Dry/wet crossfade law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixCurve {
    #[default]
    Linear,
    ConstantPower,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    pub sample_rate: f64,
    /// Number of slice buffers to allocate (1..=16).
    pub max_slices: usize,
    pub min_slice_ms: f32,
    pub max_slice_ms: f32,
    /// Longest zero-crossing search after the target length is reached.
    pub zero_search_ms: f32,
    /// Magnitude the signal must exceed before a sign flip counts as a crossing.
    pub hysteresis_threshold: f32,
    /// Per-sample one-pole coefficient for the slice-length target.
    pub length_smoothing: f32,
    /// Fade length as a fraction of the slice length.
    pub crossfade_ratio: f32,
    pub crossfade_min_ms: f32,
    /// Rate-reducer low-pass cutoff as a fraction of the reduced Nyquist.
    pub crush_filter_ratio: f32,
    pub crush_position: CrushPosition,
    pub feedback_tap: FeedbackTap,
    pub mix_curve: MixCurve,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub start_bypassed: bool,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_slices: MAX_SLICES,
            min_slice_ms: 100.0,
            max_slice_ms: 500.0,
            zero_search_ms: 20.0,
            hysteresis_threshold: 0.01,
            length_smoothing: 0.0002,
            crossfade_ratio: 0.15,
            crossfade_min_ms: 5.0,
            crush_filter_ratio: 0.5,
            crush_position: CrushPosition::default(),
            feedback_tap: FeedbackTap::default(),
            mix_curve: MixCurve::default(),
            seed: None,
            start_bypassed: false,
        }
    }
}

impl SlicerConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let result = self.check();
        if let Err(e) = &result {
            tracing::warn!("rejected slicer config: {}", e);
        }
        result
    }

    fn check(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate < MIN_SAMPLE_RATE {
            return Err(Error::InvalidSampleRate(self.sample_rate));
        }
        if self.max_slices == 0 || self.max_slices > MAX_SLICES {
            return Err(Error::InvalidSliceCount(self.max_slices));
        }
        if !(self.min_slice_ms > 0.0) || !(self.max_slice_ms >= self.min_slice_ms) {
            return Err(Error::InvalidSliceLength {
                min_ms: self.min_slice_ms,
                max_ms: self.max_slice_ms,
            });
        }
        if !self.max_slice_ms.is_finite() {
            return Err(Error::InvalidSliceLength {
                min_ms: self.min_slice_ms,
                max_ms: self.max_slice_ms,
            });
        }
        if !(self.zero_search_ms >= 0.0) || !self.zero_search_ms.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "zero_search_ms must be finite and non-negative, got {}",
                self.zero_search_ms
            )));
        }
        if !(self.hysteresis_threshold >= 0.0 && self.hysteresis_threshold < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "hysteresis_threshold must be in [0, 1), got {}",
                self.hysteresis_threshold
            )));
        }
        if !(self.length_smoothing > 0.0 && self.length_smoothing <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "length_smoothing must be in (0, 1], got {}",
                self.length_smoothing
            )));
        }
        if !(self.crossfade_ratio > 0.0 && self.crossfade_ratio <= 1.0 / 3.0) {
            return Err(Error::InvalidConfig(format!(
                "crossfade_ratio must be in (0, 1/3], got {}",
                self.crossfade_ratio
            )));
        }
        if !(self.crossfade_min_ms >= 0.0) || !self.crossfade_min_ms.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "crossfade_min_ms must be finite and non-negative, got {}",
                self.crossfade_min_ms
            )));
        }
        if !(self.crush_filter_ratio > 0.0 && self.crush_filter_ratio <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "crush_filter_ratio must be in (0, 1], got {}",
                self.crush_filter_ratio
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn ms_to_samples(&self, ms: f32) -> usize {
        (ms as f64 * 0.001 * self.sample_rate).round() as usize
    }

    pub fn geometry(&self) -> SliceGeometry {
        let min_len = self.ms_to_samples(self.min_slice_ms).max(1);
        let max_len = self.ms_to_samples(self.max_slice_ms).max(min_len);
        let search_window = self.ms_to_samples(self.zero_search_ms);

        SliceGeometry {
            slices: self.max_slices.clamp(1, MAX_SLICES),
            min_len,
            max_len,
            search_window,
            // Room for the longest target plus a full search window
            capacity: max_len + search_window,
            min_fade: self.ms_to_samples(self.crossfade_min_ms),
        }
    }
}

/// Sample counts resolved from a [`SlicerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceGeometry {
    pub slices: usize,
    /// Shortest target slice length.
    pub min_len: usize,
    /// Longest target slice length.
    pub max_len: usize,
    /// Zero-crossing search timeout.
    pub search_window: usize,
    /// Samples allocated per slice buffer (`MAX_SLICE_LENGTH`).
    pub capacity: usize,
    pub min_fade: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_at_48k() {
        let geometry = SlicerConfig::default().geometry();
        assert_eq!(geometry.slices, 16);
        assert_eq!(geometry.min_len, 4800);
        assert_eq!(geometry.max_len, 24000);
        assert_eq!(geometry.search_window, 960);
        assert_eq!(geometry.capacity, 24960);
        assert_eq!(geometry.min_fade, 240);
    }

    #[test]
    fn test_default_is_valid() {
        assert!(SlicerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sample_rate() {
        let config = SlicerConfig {
            sample_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidSampleRate(_))));

        let config = SlicerConfig {
            sample_rate: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidSampleRate(_))));

        for sample_rate in [1.0, 999.0] {
            let config = SlicerConfig {
                sample_rate,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidSampleRate(_))));
        }
        let config = SlicerConfig {
            sample_rate: MIN_SAMPLE_RATE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_slice_count_out_of_bounds() {
        for max_slices in [0, 17] {
            let config = SlicerConfig {
                max_slices,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidSliceCount(n)) if n == max_slices
            ));
        }
    }

    #[test]
    fn test_rejects_inverted_length_range() {
        let config = SlicerConfig {
            min_slice_ms: 300.0,
            max_slice_ms: 200.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidSliceLength { .. })));
    }

    #[test]
    fn test_rejects_crossfade_ratio_above_a_third() {
        let config = SlicerConfig {
            crossfade_ratio: 0.4,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = SlicerConfig::from_json(
            r#"{ "sample_rate": 44100.0, "max_slices": 8, "feedback_tap": "post_lofi", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.max_slices, 8);
        assert_eq!(config.feedback_tap, FeedbackTap::PostLofi);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.crush_position, CrushPosition::Wet);
        assert_eq!(config.min_slice_ms, 100.0);
    }

    #[test]
    fn test_json_is_validated() {
        assert!(matches!(
            SlicerConfig::from_json(r#"{ "max_slices": 32 }"#),
            Err(Error::InvalidSliceCount(32))
        ));
        assert!(matches!(
            SlicerConfig::from_json("{ not json"),
            Err(Error::Parse(_))
        ));
    }
}
