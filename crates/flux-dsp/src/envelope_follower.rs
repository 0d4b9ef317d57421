//! Peak envelope follower for dynamics-driven slice modulation.

#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    envelope: f32,
    sample_rate: f32,
    attack_secs: f32,
    release_secs: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl EnvelopeFollower {
    pub fn new(attack_secs: f32, release_secs: f32, sample_rate: f32) -> Self {
        Self {
            envelope: 0.0,
            sample_rate,
            attack_secs,
            release_secs,
            attack_coeff: Self::time_to_coeff(attack_secs, sample_rate),
            release_coeff: Self::time_to_coeff(release_secs, sample_rate),
        }
    }

    #[inline]
    fn time_to_coeff(time: f32, sample_rate: f32) -> f32 {
        if time <= 0.0 {
            0.0
        } else {
            (-1.0 / (time * sample_rate)).exp()
        }
    }

    /// Retune attack/release. Coefficients are only recomputed when a time moves
    /// by more than 0.1ms, so calling this once per block is cheap.
    #[inline]
    pub fn set_times(&mut self, attack_secs: f32, release_secs: f32) {
        if (attack_secs - self.attack_secs).abs() > 0.0001 {
            self.attack_secs = attack_secs;
            self.attack_coeff = Self::time_to_coeff(attack_secs, self.sample_rate);
        }

        if (release_secs - self.release_secs).abs() > 0.0001 {
            self.release_secs = release_secs;
            self.release_coeff = Self::time_to_coeff(release_secs, self.sample_rate);
        }
    }

    /// Feed one sample, returning the envelope clamped to `[0, 1]`.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let level = if input.is_finite() { input.abs() } else { 0.0 };
        let coeff = if level > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.envelope = coeff * self.envelope + (1.0 - coeff) * level;
        self.envelope = self.envelope.clamp(0.0, 1.0);
        self.envelope
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.envelope
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_rises_on_signal() {
        let mut env = EnvelopeFollower::new(0.001, 0.1, 48000.0);

        for _ in 0..1000 {
            env.process(0.5);
        }

        assert!(env.level() > 0.3, "Envelope should rise, got {}", env.level());
    }

    #[test]
    fn test_envelope_falls_on_silence() {
        let mut env = EnvelopeFollower::new(0.001, 0.01, 48000.0);

        for _ in 0..1000 {
            env.process(0.8);
        }
        let peak = env.level();

        for _ in 0..2000 {
            env.process(0.0);
        }

        assert!(env.level() < peak * 0.5, "Envelope should fall, got {}", env.level());
    }

    #[test]
    fn test_retune_changes_response() {
        let mut slow = EnvelopeFollower::new(0.2, 1.0, 48000.0);
        let mut fast = EnvelopeFollower::new(0.2, 1.0, 48000.0);
        fast.set_times(0.001, 1.0);

        for _ in 0..480 {
            slow.process(1.0);
            fast.process(1.0);
        }

        assert!(fast.level() > slow.level());
    }

    #[test]
    fn test_clamped_and_finite() {
        let mut env = EnvelopeFollower::new(0.0, 0.0, 48000.0);
        assert_eq!(env.process(4.0), 1.0);
        assert_eq!(env.process(f32::NAN), 0.0);
    }
}
