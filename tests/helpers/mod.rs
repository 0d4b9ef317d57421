//! Test helpers and fixtures for Flux integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): DSP processing (filters, interpolation)
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)
//! - `DISTRIBUTION_TOLERANCE` (0.025): Seeded statistical checks

#![allow(dead_code)]

pub mod tolerances;

use flux::prelude::*;

/// Default test sample rate (matches the platform constant)
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Standard buffer size for deterministic testing
pub const TEST_BUFFER_SIZE: usize = 512;

/// Samples in one 100ms slice of DC input: the 4800-sample target plus the
/// full 960-sample zero-crossing search that never finds a crossing.
pub const DC_SLICE_LEN: usize = 4800 + 960;

/// Route engine logs to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Seeded engine with the given initial controls.
pub fn test_engine(controls: ControlSnapshot) -> FluxEngine {
    init_tracing();
    FluxEngine::builder()
        .sample_rate(TEST_SAMPLE_RATE)
        .seed(0x5EED)
        .controls(controls)
        .build()
        .expect("Failed to create test engine")
}

/// Controls for a fully wet, unity gain, dry-free slicer with no feedback.
pub fn wet_controls() -> ControlSnapshot {
    ControlSnapshot {
        feedback: 0.0,
        mix: 1.0,
        master: 0.5,
        ..Default::default()
    }
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, amplitude: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / TEST_SAMPLE_RATE;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32 * amplitude
        })
        .collect()
}

/// Generate a DC offset signal (constant value).
pub fn generate_dc(value: f32, num_samples: usize) -> Vec<f32> {
    vec![value; num_samples]
}

/// Run `input` through the engine in `TEST_BUFFER_SIZE` blocks, returning the left channel.
pub fn render(engine: &mut FluxEngine, input: &[f32]) -> Vec<f32> {
    let mut output = Vec::with_capacity(input.len());
    let mut left = [0.0f32; TEST_BUFFER_SIZE];
    let mut right = [0.0f32; TEST_BUFFER_SIZE];

    for chunk in input.chunks(TEST_BUFFER_SIZE) {
        let n = chunk.len();
        engine.process_block(chunk, &mut left[..n], &mut right[..n]);
        assert_eq!(left[..n], right[..n], "outputs must be identical");
        output.extend_from_slice(&left[..n]);
    }
    output
}

/// Collapse consecutive duplicates: `[0, 0, 1, 1, 1, 2]` becomes `[0, 1, 2]`.
pub fn dedup_runs<T: PartialEq + Copy>(values: &[T]) -> Vec<T> {
    let mut runs = values.to_vec();
    runs.dedup();
    runs
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Assert that a signal is approximately silent (all values near zero).
pub fn assert_silence(samples: &[f32], tolerance: f32) {
    let max = peak(samples);
    assert!(
        max <= tolerance,
        "Expected silence, but peak amplitude was {}",
        max
    );
}

/// Assert that a signal has content (not silent).
pub fn assert_has_audio(samples: &[f32], min_rms: f32) {
    let r = rms(samples);
    assert!(
        r >= min_rms,
        "Expected audio content with RMS >= {}, but RMS was {}",
        min_rms,
        r
    );
}
