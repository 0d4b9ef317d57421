//! The slicer engine context as a fundsp [`AudioUnit`].
//!
//! One mono input, the mixed result broadcast to two outputs. All state lives
//! in this struct: slice buffers, both cursors, the smoothed parameters and
//! the generator. Controls are read once per `process` block (once per
//! `tick`), never in the middle of one.
//!
//! Per sample, in order: envelope follower, length smoothing, input crush,
//! playback, wet lo-fi chain, capture of `input + wet * feedback`, dry/wet mix,
//! master gain.

use crate::capture::{CaptureCursor, CaptureEngine};
use crate::controls::SlicerControls;
use crate::crossfade::SliceEnvelope;
use crate::mapper::{EngineParams, ParameterMapper};
use crate::playback::{PlaybackContext, PlaybackCursor, PlaybackSequencer};
use crate::random::engine_rng;
use crate::store::SliceStore;
use crate::Result;
use flux_core::{
    AudioUnit, BufferMut, BufferRef, FeedbackTap, OnePoleSmoother, SignalFrame, SlicerConfig,
    SmoothedValue,
};
use flux_dsp::{DryWetMix, EnvelopeFollower, LofiChain};
use rand::rngs::SmallRng;
use rand::RngCore;

const SMOOTHING_SECS: f32 = 0.010;

/// The signals of the most recent sample, for metering and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleTap {
    pub input: f32,
    /// Enveloped slice playback before the lo-fi chain.
    pub wet_raw: f32,
    /// Wet signal after the lo-fi chain.
    pub wet: f32,
    pub output: f32,
}

#[derive(Clone)]
pub struct SlicerUnit {
    config: SlicerConfig,
    controls: SlicerControls,
    mapper: ParameterMapper,
    params: EngineParams,

    store: SliceStore,
    capture: CaptureEngine,
    playback: PlaybackSequencer,

    lofi: LofiChain,
    mixer: DryWetMix,
    follower: EnvelopeFollower,

    length: OnePoleSmoother,
    mix: SmoothedValue,
    master: SmoothedValue,

    rng: SmallRng,
    tap: SampleTap,
}

impl SlicerUnit {
    /// Validate `config`, allocate every buffer, and bind to `controls`.
    pub fn new(config: SlicerConfig, controls: SlicerControls) -> Result<Self> {
        config.validate()?;

        let geometry = config.geometry();
        let sample_rate = config.sample_rate as f32;
        let mut rng = engine_rng(config.seed);

        if config.start_bypassed {
            controls.set_bypassed(true);
        }

        let mapper = ParameterMapper::new(&config);
        let params = mapper.map(&controls.snapshot(), 0.0);

        let lofi = LofiChain::new(
            sample_rate,
            config.crush_filter_ratio,
            config.crush_position,
            rng.next_u64(),
        )?;

        tracing::info!(
            sample_rate = config.sample_rate,
            slices = geometry.slices,
            min_len = geometry.min_len,
            max_len = geometry.max_len,
            capacity = geometry.capacity,
            search_window = geometry.search_window,
            seed = ?config.seed,
            "slicer allocated"
        );

        Ok(Self {
            store: SliceStore::new(geometry.slices, geometry.capacity),
            capture: CaptureEngine::new(
                geometry.search_window,
                geometry.capacity,
                config.hysteresis_threshold,
            ),
            playback: PlaybackSequencer::new(SliceEnvelope::new(
                config.crossfade_ratio,
                geometry.min_fade,
            )),
            lofi,
            mixer: DryWetMix::new(config.mix_curve),
            follower: EnvelopeFollower::new(
                params.env_attack_secs,
                params.env_release_secs,
                sample_rate,
            ),
            length: OnePoleSmoother::new(params.target_length as f32, config.length_smoothing),
            mix: SmoothedValue::new(params.mix, SMOOTHING_SECS, sample_rate),
            master: SmoothedValue::new(params.master_gain, SMOOTHING_SECS, sample_rate),
            rng,
            tap: SampleTap::default(),
            config,
            controls,
            mapper,
            params,
        })
    }

    pub fn controls(&self) -> &SlicerControls {
        &self.controls
    }

    pub fn config(&self) -> &SlicerConfig {
        &self.config
    }

    pub fn store(&self) -> &SliceStore {
        &self.store
    }

    pub fn capture_cursor(&self) -> &CaptureCursor {
        self.capture.cursor()
    }

    pub fn playback_cursor(&self) -> &PlaybackCursor {
        self.playback.cursor()
    }

    /// Parameters of the current block.
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Smoothed slice-length target in samples.
    pub fn smoothed_length(&self) -> f32 {
        self.length.current()
    }

    pub fn last_sample(&self) -> &SampleTap {
        &self.tap
    }

    /// Read the controls and derive this block's parameters.
    #[inline]
    fn begin_block(&mut self) {
        let snapshot = self.controls.snapshot();
        let params = self.mapper.map(&snapshot, self.follower.level());

        self.follower
            .set_times(params.env_attack_secs, params.env_release_secs);
        self.mix.set_target(params.mix);
        self.master.set_target(params.master_gain);
        self.params = params;
    }

    #[inline]
    fn process_sample(&mut self, raw: f32) -> f32 {
        let input = if raw.is_finite() { raw } else { 0.0 };
        if self.params.bypassed {
            self.tap = SampleTap {
                input,
                output: input,
                ..SampleTap::default()
            };
            return input;
        }

        let params = self.params;
        self.follower.process(input);
        let target_len = self.length.next(params.target_length as f32) as usize;
        let mix = self.mix.next_sample();
        let master = self.master.next_sample();

        let capture_source = self.lofi.process_input(input, &params.lofi);

        // Frozen slots stay exactly as they are, even past the active count
        if !params.frozen {
            self.capture.constrain(params.active_slices, &mut self.store);
        }
        let ctx = PlaybackContext {
            mode: params.mode,
            stutter: params.stutter,
            active: params.active_slices,
            capture_index: self.capture.index(),
        };

        let wet_raw = self.playback.next_sample(&ctx, &self.store, &mut self.rng);
        let wet = self.lofi.process_wet(wet_raw, &params.lofi, mix);

        if !params.frozen {
            let fed_back = match self.config.feedback_tap {
                FeedbackTap::PreLofi => wet_raw,
                FeedbackTap::PostLofi => wet,
            };
            let sample = (capture_source + fed_back * params.feedback).clamp(-1.0, 1.0);

            if let Some(done) = self.capture.process(
                sample,
                target_len,
                params.active_slices,
                params.mode,
                &mut self.store,
                &mut self.rng,
            ) {
                if !self.playback.is_started() {
                    let ctx = PlaybackContext {
                        capture_index: done.next_index,
                        ..ctx
                    };
                    self.playback
                        .start_at(done.index, &ctx, &self.store, &mut self.rng);
                }
            }
        }

        let output = self.mixer.process(input, wet, mix) * master;
        self.tap = SampleTap {
            input,
            wet_raw,
            wet,
            output,
        };
        output
    }

    /// Process a mono block into two identical outputs.
    pub fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.begin_block();
        for ((x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            let y = self.process_sample(*x);
            *l = y;
            *r = y;
        }
    }
}

impl AudioUnit for SlicerUnit {
    fn inputs(&self) -> usize {
        1
    }

    fn outputs(&self) -> usize {
        2
    }

    fn reset(&mut self) {
        self.store.clear();
        self.capture.restart_at(0);
        self.playback.reset();
        self.lofi.reset();
        self.follower.reset();
        self.length.set_immediate(self.params.target_length as f32);
        self.mix.set_immediate(self.params.mix);
        self.master.set_immediate(self.params.master_gain);
        self.tap = SampleTap::default();
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        if sample_rate == self.config.sample_rate {
            return;
        }
        // The bypass latch already holds whatever the user set
        let config = SlicerConfig {
            sample_rate,
            start_bypassed: false,
            ..self.config.clone()
        };
        // Buffer sizes depend on the rate, so everything is rebuilt
        match SlicerUnit::new(config, self.controls.clone()) {
            Ok(unit) => *self = unit,
            Err(e) => tracing::warn!("sample rate {} rejected: {}", sample_rate, e),
        }
    }

    fn tick(&mut self, input: &[f32], output: &mut [f32]) {
        self.begin_block();
        let y = self.process_sample(input.first().copied().unwrap_or(0.0));
        for out in output.iter_mut().take(2) {
            *out = y;
        }
    }

    fn process(&mut self, size: usize, input: &BufferRef, output: &mut BufferMut) {
        self.begin_block();
        for i in 0..size {
            let y = self.process_sample(input.at_f32(0, i));
            output.set_f32(0, i, y);
            output.set_f32(1, i, y);
        }
    }

    fn get_id(&self) -> u64 {
        0x464C_5558_u64 // "FLUX"
    }

    fn route(&mut self, _input: &SignalFrame, _frequency: f64) -> SignalFrame {
        SignalFrame::new(2)
    }

    fn footprint(&self) -> usize {
        core::mem::size_of::<Self>()
            + self.store.slots() * self.store.capacity() * core::mem::size_of::<f32>()
    }
}
