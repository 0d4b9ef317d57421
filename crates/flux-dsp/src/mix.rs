//! Dry/wet crossfader.

use flux_core::MixCurve;

#[derive(Debug, Clone, Copy, Default)]
pub struct DryWetMix {
    curve: MixCurve,
}

impl DryWetMix {
    pub fn new(curve: MixCurve) -> Self {
        Self { curve }
    }

    /// `position` 0.0 is fully dry, 1.0 fully wet.
    #[inline]
    pub fn process(&self, dry: f32, wet: f32, position: f32) -> f32 {
        let pos = position.clamp(0.0, 1.0);
        match self.curve {
            MixCurve::Linear => dry * (1.0 - pos) + wet * pos,
            MixCurve::ConstantPower => {
                let angle = pos * core::f32::consts::FRAC_PI_2;
                dry * angle.cos() + wet * angle.sin()
            }
        }
    }
}
