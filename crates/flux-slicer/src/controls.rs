//! Control-rate boundary between the polling collaborator and the audio path.
//!
//! [`SlicerControls`] is a cheap clonable handle. The poller writes normalized
//! values into it; the audio routine takes one [`ControlSnapshot`] per block.

use crate::mapper::EnvelopeDirection;
use crate::mode::SliceMode;
use flux_core::{AtomicFlag, AtomicFloat, AtomicSelector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Every control value as the audio path sees it for one block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSnapshot {
    pub slice_count: f32,
    pub slice_length: f32,
    pub feedback: f32,
    pub stutter: f32,
    pub mix: f32,
    pub mode: SliceMode,
    pub crush: f32,
    pub wobble: f32,
    pub dust: f32,
    /// 0.5 is unity gain.
    pub master: f32,
    pub env_amount: f32,
    pub env_attack: f32,
    pub env_release: f32,
    pub env_direction: EnvelopeDirection,
    pub frozen: bool,
    pub bypassed: bool,
}

impl Default for ControlSnapshot {
    fn default() -> Self {
        Self {
            slice_count: 0.25,
            slice_length: 0.4,
            feedback: 0.3,
            stutter: 0.0,
            mix: 0.5,
            mode: SliceMode::Forward,
            crush: 0.0,
            wobble: 0.0,
            dust: 0.0,
            master: 0.5,
            env_amount: 0.0,
            env_attack: 0.25,
            env_release: 0.1,
            env_direction: EnvelopeDirection::Off,
            frozen: false,
            bypassed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlicerControls {
    slice_count: Arc<AtomicFloat>,
    slice_length: Arc<AtomicFloat>,
    feedback: Arc<AtomicFloat>,
    stutter: Arc<AtomicFloat>,
    mix: Arc<AtomicFloat>,
    mode: Arc<AtomicSelector>,
    crush: Arc<AtomicFloat>,
    wobble: Arc<AtomicFloat>,
    dust: Arc<AtomicFloat>,
    master: Arc<AtomicFloat>,
    env_amount: Arc<AtomicFloat>,
    env_attack: Arc<AtomicFloat>,
    env_release: Arc<AtomicFloat>,
    env_direction: Arc<AtomicSelector>,
    frozen: Arc<AtomicFlag>,
    bypassed: Arc<AtomicFlag>,
}

fn unit(value: f32) -> Arc<AtomicFloat> {
    let atomic = AtomicFloat::default();
    atomic.set_unit(value);
    Arc::new(atomic)
}

impl SlicerControls {
    pub fn new(initial: &ControlSnapshot) -> Self {
        Self {
            slice_count: unit(initial.slice_count),
            slice_length: unit(initial.slice_length),
            feedback: unit(initial.feedback),
            stutter: unit(initial.stutter),
            mix: unit(initial.mix),
            mode: Arc::new(AtomicSelector::new(initial.mode.selector(), 2)),
            crush: unit(initial.crush),
            wobble: unit(initial.wobble),
            dust: unit(initial.dust),
            master: unit(initial.master),
            env_amount: unit(initial.env_amount),
            env_attack: unit(initial.env_attack),
            env_release: unit(initial.env_release),
            env_direction: Arc::new(AtomicSelector::new(initial.env_direction.selector(), 2)),
            frozen: Arc::new(AtomicFlag::new(initial.frozen)),
            bypassed: Arc::new(AtomicFlag::new(initial.bypassed)),
        }
    }

    pub fn set_slice_count(&self, value: f32) {
        self.slice_count.set_unit(value);
    }

    pub fn set_slice_length(&self, value: f32) {
        self.slice_length.set_unit(value);
    }

    pub fn set_feedback(&self, value: f32) {
        self.feedback.set_unit(value);
    }

    pub fn set_stutter(&self, value: f32) {
        self.stutter.set_unit(value);
    }

    pub fn set_mix(&self, value: f32) {
        self.mix.set_unit(value);
    }

    pub fn set_crush(&self, value: f32) {
        self.crush.set_unit(value);
    }

    pub fn set_wobble(&self, value: f32) {
        self.wobble.set_unit(value);
    }

    pub fn set_dust(&self, value: f32) {
        self.dust.set_unit(value);
    }

    /// Master level knob; 0.5 is unity, 1.0 doubles the output.
    pub fn set_master(&self, value: f32) {
        self.master.set_unit(value);
    }

    pub fn set_env_amount(&self, value: f32) {
        self.env_amount.set_unit(value);
    }

    pub fn set_env_attack(&self, value: f32) {
        self.env_attack.set_unit(value);
    }

    pub fn set_env_release(&self, value: f32) {
        self.env_release.set_unit(value);
    }

    pub fn set_env_direction(&self, direction: EnvelopeDirection) {
        self.env_direction.set(direction.selector());
    }

    pub fn set_mode(&self, mode: SliceMode) {
        self.mode.set(mode.selector());
    }

    /// Raw switch position; anything past 2 is clamped to random-direction.
    pub fn set_mode_selector(&self, position: u8) {
        if !self.mode.set(position) {
            tracing::warn!(
                "mode selector {} out of range, clamped to {}",
                position,
                self.mode.max()
            );
        }
    }

    pub fn mode(&self) -> SliceMode {
        SliceMode::from_selector(self.mode.get())
    }

    /// Freeze footswitch edge. Returns the new state.
    pub fn toggle_freeze(&self) -> bool {
        let frozen = self.frozen.toggle();
        tracing::debug!(frozen, "freeze toggled");
        frozen
    }

    /// Bypass footswitch edge. Returns the new state.
    pub fn toggle_bypass(&self) -> bool {
        let bypassed = self.bypassed.toggle();
        tracing::debug!(active = !bypassed, "bypass toggled");
        bypassed
    }

    pub fn set_frozen(&self, frozen: bool) {
        self.frozen.set(frozen);
    }

    pub fn set_bypassed(&self, bypassed: bool) {
        self.bypassed.set(bypassed);
    }

    /// Frozen indicator.
    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// Active indicator (inverse of bypass).
    pub fn is_active(&self) -> bool {
        !self.bypassed.get()
    }

    /// Write every field at once, e.g. to recall a preset.
    pub fn apply(&self, snapshot: &ControlSnapshot) {
        self.set_slice_count(snapshot.slice_count);
        self.set_slice_length(snapshot.slice_length);
        self.set_feedback(snapshot.feedback);
        self.set_stutter(snapshot.stutter);
        self.set_mix(snapshot.mix);
        self.set_mode(snapshot.mode);
        self.set_crush(snapshot.crush);
        self.set_wobble(snapshot.wobble);
        self.set_dust(snapshot.dust);
        self.set_master(snapshot.master);
        self.set_env_amount(snapshot.env_amount);
        self.set_env_attack(snapshot.env_attack);
        self.set_env_release(snapshot.env_release);
        self.set_env_direction(snapshot.env_direction);
        self.set_frozen(snapshot.frozen);
        self.set_bypassed(snapshot.bypassed);
    }

    /// Read every field once. Called by the audio path at block start.
    #[inline]
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            slice_count: self.slice_count.get(),
            slice_length: self.slice_length.get(),
            feedback: self.feedback.get(),
            stutter: self.stutter.get(),
            mix: self.mix.get(),
            mode: SliceMode::from_selector(self.mode.get()),
            crush: self.crush.get(),
            wobble: self.wobble.get(),
            dust: self.dust.get(),
            master: self.master.get(),
            env_amount: self.env_amount.get(),
            env_attack: self.env_attack.get(),
            env_release: self.env_release.get(),
            env_direction: EnvelopeDirection::from_selector(self.env_direction.get()),
            frozen: self.frozen.get(),
            bypassed: self.bypassed.get(),
        }
    }
}

impl Default for SlicerControls {
    fn default() -> Self {
        Self::new(&ControlSnapshot::default())
    }
}
