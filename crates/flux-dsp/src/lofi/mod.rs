//! Lo-fi degradation chain: rate reduction, pitch wobble, dust.
//!
//! Every stage is an exact bypass at amount 0, so a chain with all amounts at
//! zero returns its input bit for bit.

mod dust;
mod rate_reducer;
mod wobble;

pub use dust::Dust;
pub use rate_reducer::{downsample_factor, RateReducer};
pub use wobble::Wobble;

use crate::{Error, Result};
use flux_core::CrushPosition;

/// Wobble and dust are skipped while the wet signal is below this level.
pub const AUDIBLE_WET_THRESHOLD: f32 = 0.01;

/// Per-block amounts, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LofiSettings {
    pub crush: f32,
    pub wobble: f32,
    pub dust: f32,
}

impl LofiSettings {
    pub fn is_bypassed(&self) -> bool {
        self.crush <= 0.0 && self.wobble <= 0.0 && self.dust <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct LofiChain {
    crusher: RateReducer,
    wobble: Wobble,
    dust: Dust,
    crush_position: CrushPosition,
}

impl LofiChain {
    pub fn new(
        sample_rate: f32,
        crush_filter_ratio: f32,
        crush_position: CrushPosition,
        seed: u64,
    ) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "lo-fi sample rate must be finite and positive, got {}",
                sample_rate
            )));
        }
        Ok(Self {
            crusher: RateReducer::new(sample_rate, crush_filter_ratio),
            wobble: Wobble::new(sample_rate),
            dust: Dust::new(seed, sample_rate),
            crush_position,
        })
    }

    #[inline]
    pub fn crush_position(&self) -> CrushPosition {
        self.crush_position
    }

    /// Pre-capture stage. Only degrades when the crusher sits on the input.
    #[inline]
    pub fn process_input(&mut self, input: f32, settings: &LofiSettings) -> f32 {
        match self.crush_position {
            CrushPosition::Input => self.crusher.process(input, settings.crush),
            CrushPosition::Wet => input,
        }
    }

    /// Wet-path stages. `wet_level` is the current dry/wet position.
    #[inline]
    pub fn process_wet(&mut self, wet: f32, settings: &LofiSettings, wet_level: f32) -> f32 {
        let mut out = match self.crush_position {
            CrushPosition::Wet => self.crusher.process(wet, settings.crush),
            CrushPosition::Input => wet,
        };

        if wet_level > AUDIBLE_WET_THRESHOLD {
            out = self.wobble.process(out, settings.wobble);
            if settings.dust > 0.0 {
                out += self.dust.process(settings.dust);
            }
        }

        out
    }

    pub fn reset(&mut self) {
        self.crusher.reset();
        self.wobble.reset();
        self.dust.reset();
    }
}
