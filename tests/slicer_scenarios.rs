//! End-to-end slicer behavior through the public engine API.
//!
//! Run with:
//! ```bash
//! cargo test -p flux --test slicer_scenarios
//! ```

#[path = "helpers/mod.rs"]
mod helpers;

use approx::assert_abs_diff_eq;
use flux::prelude::*;
use flux::slicer::store::SliceStore;
use flux::slicer::stutter::{StutterPolicy, SUBDIVISIONS};
use flux::slicer::{engine_rng, PlaybackContext, PlaybackSequencer, SliceEnvelope};
use flux::Direction;
use helpers::tolerances::*;
use helpers::*;

/// Step the engine sample by sample, returning the playback slice index
/// observed before each read once playback has started.
fn trace_playback(engine: &mut FluxEngine, input: &[f32]) -> Vec<usize> {
    let mut trace = Vec::new();
    for &x in input {
        let started = engine.unit().store().iter().any(|s| !s.is_empty());
        let index = engine.unit().playback_cursor().index;
        engine.tick(x);
        if started {
            trace.push(index);
        }
    }
    trace
}

// =============================================================================
// Scenario A: sequential forward playback
// =============================================================================

#[test]
fn test_forward_plays_slices_in_order() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        stutter: 0.0,
        mode: SliceMode::Forward,
        ..wet_controls()
    });

    let input = generate_dc(0.5, DC_SLICE_LEN * 14);
    let trace = trace_playback(&mut engine, &input);

    let store = engine.unit().store();
    for index in 0..4 {
        assert_eq!(store.length(index), DC_SLICE_LEN, "slice {} length", index);
    }

    let order = dedup_runs(&trace);
    assert!(order.len() >= 8, "too few transitions: {:?}", order);
    for (i, &index) in order.iter().enumerate() {
        assert_eq!(index, i % 4, "order {:?}", order);
    }
}

#[test]
fn test_reverse_plays_slices_backward() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        mode: SliceMode::Reverse,
        ..wet_controls()
    });

    let input = generate_dc(0.5, DC_SLICE_LEN * 14);
    let trace = trace_playback(&mut engine, &input);
    let order = dedup_runs(&trace);

    // Capture walks 0, 3, 2, 1; playback trails it in the same direction
    assert_eq!(order[0], 0);
    for pair in order.windows(2) {
        assert_eq!(pair[1], (pair[0] + 3) % 4, "order {:?}", order);
    }
    assert_eq!(engine.unit().playback_cursor().direction, Direction::Backward);
}

#[test]
fn test_output_is_enveloped_slice_content() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        ..wet_controls()
    });

    // First slice captured, then one full slice of playback
    render(&mut engine, &generate_dc(0.5, DC_SLICE_LEN));
    let out = render(&mut engine, &generate_dc(0.5, DC_SLICE_LEN));

    // 15% fade of 5760 samples is 864
    assert_eq!(out[0], 0.0);
    assert_abs_diff_eq!(out[432], 0.25, epsilon = DSP_EPSILON);
    assert_abs_diff_eq!(out[DC_SLICE_LEN / 2], 0.5, epsilon = FLOAT_EPSILON);
    assert!(peak(&out) <= 0.5 + FLOAT_EPSILON);
}

#[test]
fn test_shrinking_slice_count_never_exposes_stale_tail() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.5,
        slice_length: 0.0,
        ..wet_controls()
    });
    let controls = engine.controls();

    // Six full slices of positive DC put capture at the start of slot 6
    render(&mut engine, &generate_dc(0.5, 6 * DC_SLICE_LEN));
    assert_eq!(engine.unit().capture_cursor().index, 6);
    assert_eq!(engine.unit().capture_cursor().offset, 0);

    // Overwrite the head of slot 6 with negative samples
    render(&mut engine, &generate_dc(-0.5, 1_000));
    assert_eq!(engine.unit().capture_cursor().offset, 1_000);

    // Drop to 4 slices mid-pass: capture moves to slot 2
    controls.set_slice_count(0.2);
    render(&mut engine, &generate_dc(0.5, TEST_BUFFER_SIZE));
    assert_eq!(engine.unit().capture_cursor().index, 2);

    let torn = engine.unit().store().slice(6).expect("slot 6 exists");
    assert_eq!(torn.len(), 1_000);
    assert!(torn.samples().iter().all(|&x| x == -0.5));

    // Back to 8 slices with heavy shuffling; slot 6 only ever yields its fresh samples
    controls.set_slice_count(0.5);
    controls.set_stutter(1.0);
    for _ in 0..(6 * DC_SLICE_LEN) {
        let unit = engine.unit();
        let reading = unit.playback_cursor().index;
        if unit.capture_cursor().index == 6 {
            break;
        }
        engine.tick(0.5);
        if reading == 6 {
            assert!(engine.unit().last_sample().wet_raw <= 0.0);
        }
    }
}

// =============================================================================
// Scenario B: freeze
// =============================================================================

#[test]
fn test_freeze_preserves_buffers_and_keeps_playing() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        feedback: 0.5,
        ..wet_controls()
    });
    let controls = engine.controls();

    let tone = generate_sine(220.0, 0.5, 48_000);
    render(&mut engine, &tone[..20_000]);
    let capture_before = *engine.unit().capture_cursor();
    assert!(capture_before.offset > 0, "freeze should land mid-capture");

    let snapshot: Vec<Vec<u32>> = engine
        .unit()
        .store()
        .iter()
        .map(|slice| slice.raw().iter().map(|x| x.to_bits()).collect())
        .collect();

    assert!(controls.toggle_freeze());
    assert!(engine.is_frozen());

    let mut visited = Vec::new();
    let mut frozen_out = Vec::new();
    for &x in &tone[20_000..] {
        frozen_out.push(engine.tick(x));
        visited.push(engine.unit().playback_cursor().index);
    }

    let after: Vec<Vec<u32>> = engine
        .unit()
        .store()
        .iter()
        .map(|slice| slice.raw().iter().map(|x| x.to_bits()).collect())
        .collect();
    assert_eq!(snapshot, after, "frozen buffers must be bit-identical");
    assert_eq!(*engine.unit().capture_cursor(), capture_before);

    let order = dedup_runs(&visited);
    assert!(order.len() > 3, "playback should keep advancing: {:?}", order);
    assert!(!order.contains(&capture_before.index));
    assert_has_audio(&frozen_out, 0.05);

    // Unfreezing resumes capture where it paused
    assert!(!controls.toggle_freeze());
    engine.tick(0.1);
    assert_eq!(engine.unit().capture_cursor().offset, capture_before.offset + 1);
}

// =============================================================================
// Scenario C: rate reduction bypass
// =============================================================================

#[test]
fn test_zero_crush_is_bit_exact() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        crush: 0.0,
        ..wet_controls()
    });

    let tone = generate_sine(330.0, 0.8, 30_000);
    let mut heard = false;
    for &x in &tone {
        let y = engine.tick(x);
        let tap = *engine.unit().last_sample();
        assert_eq!(tap.wet.to_bits(), tap.wet_raw.to_bits());
        assert_eq!(y, tap.wet_raw);
        heard |= y != 0.0;
    }
    assert!(heard);
}

#[test]
fn test_zero_crush_on_input_captures_verbatim() {
    let mut engine = FluxEngine::builder()
        .seed(4)
        .crush_position(CrushPosition::Input)
        .controls(ControlSnapshot {
            slice_length: 0.0,
            ..wet_controls()
        })
        .build()
        .unwrap();

    let tone = generate_sine(440.0, 0.7, 4_000);
    render(&mut engine, &tone);

    let raw = engine.unit().store().slice(0).unwrap().raw();
    assert_eq!(&raw[..tone.len()], &tone[..]);
}

#[test]
fn test_full_crush_changes_the_wet_signal() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        crush: 1.0,
        ..wet_controls()
    });

    let tone = generate_sine(3_000.0, 0.8, 30_000);
    let mut differs = false;
    for &x in &tone {
        engine.tick(x);
        let tap = engine.unit().last_sample();
        differs |= (tap.wet - tap.wet_raw).abs() > 1e-3;
    }
    assert!(differs);
}

// =============================================================================
// Scenario D: stutter distribution
// =============================================================================

#[test]
fn test_full_stutter_matches_weight_table() {
    let mut rng = engine_rng(Some(2024));
    let draws = 10_000;
    let mut counts = [0usize; 4];

    for _ in 0..draws {
        let repeats = StutterPolicy::repeat_count(1.0, &mut rng);
        let slot = SUBDIVISIONS
            .iter()
            .position(|&s| s == repeats)
            .expect("repeat count outside {1, 2, 4, 8}");
        counts[slot] += 1;
    }

    let expected = [0.10, 0.30, 0.30, 0.30];
    for (count, want) in counts.iter().zip(expected) {
        let observed = *count as f32 / draws as f32;
        assert!(
            (observed - want).abs() < DISTRIBUTION_TOLERANCE,
            "observed {:?}, expected {:?}",
            counts,
            expected
        );
    }
}

#[test]
fn test_zero_stutter_engine_never_repeats() {
    let mut engine = test_engine(ControlSnapshot {
        slice_count: 0.2,
        slice_length: 0.0,
        stutter: 0.0,
        ..wet_controls()
    });
    for &x in &generate_dc(0.5, DC_SLICE_LEN * 8) {
        engine.tick(x);
        assert_eq!(engine.unit().playback_cursor().repeats, 1);
    }
}

// =============================================================================
// Scenario E: random direction
// =============================================================================

#[test]
fn test_random_direction_is_balanced() {
    let slots = 8;
    let len = 16;
    let mut store = SliceStore::new(slots, len);
    for index in 0..slots {
        for offset in 0..len {
            store.write(index, offset, 0.5);
        }
        store.finalize(index, len);
    }

    let ctx = PlaybackContext {
        mode: SliceMode::RandomDirection,
        stutter: 0.0,
        active: slots,
        capture_index: slots - 1,
    };
    let mut rng = engine_rng(Some(77));
    let mut sequencer = PlaybackSequencer::new(SliceEnvelope::new(0.15, 0));
    sequencer.start_at(0, &ctx, &store, &mut rng);

    let passes = 4_000;
    let mut backward = 0;
    for _ in 0..passes {
        if sequencer.cursor().direction == Direction::Backward {
            backward += 1;
        }
        for _ in 0..len {
            sequencer.next_sample(&ctx, &store, &mut rng);
        }
    }

    let share = backward as f32 / passes as f32;
    assert!((share - 0.5).abs() < 0.04, "backward share {}", share);
}

#[test]
fn test_random_direction_engine_uses_both_directions() {
    let mut engine = FluxEngine::builder()
        .seed(12)
        .config(SlicerConfig {
            min_slice_ms: 2.0,
            max_slice_ms: 4.0,
            zero_search_ms: 0.5,
            seed: Some(12),
            ..Default::default()
        })
        .controls(ControlSnapshot {
            slice_count: 0.5,
            slice_length: 0.0,
            mode: SliceMode::RandomDirection,
            ..wet_controls()
        })
        .build()
        .unwrap();

    let mut forward = 0;
    let mut backward = 0;
    for &x in &generate_dc(0.5, 60_000) {
        engine.tick(x);
        let cursor = engine.unit().playback_cursor();
        if cursor.position == 0 && cursor.repeat == 0 {
            match cursor.direction {
                Direction::Forward => forward += 1,
                Direction::Backward => backward += 1,
            }
        }
    }
    assert!(forward > 50 && backward > 50, "forward {} backward {}", forward, backward);
}

// =============================================================================
// Bypass and indicators
// =============================================================================

#[test]
fn test_bypass_is_transparent_and_indicated() {
    let mut engine = test_engine(ControlSnapshot::default());
    let controls = engine.controls();
    assert!(engine.is_active());

    assert!(controls.toggle_bypass());
    assert!(!engine.is_active());

    let tone = generate_sine(100.0, 0.9, 2_048);
    let out = render(&mut engine, &tone);
    assert_eq!(out, tone);
}

#[test]
fn test_silence_in_silence_out() {
    let mut engine = test_engine(ControlSnapshot {
        dust: 0.0,
        ..Default::default()
    });
    let out = render(&mut engine, &vec![0.0; 48_000]);
    assert_silence(&out, SILENCE_THRESHOLD);
}

// =============================================================================
// Presets
// =============================================================================

#[test]
fn test_preset_recall_from_json() {
    let mut engine = test_engine(ControlSnapshot::default());
    let controls = engine.controls();

    let preset: ControlSnapshot = serde_json::from_str(
        r#"{ "slice_count": 1.0, "stutter": 0.8, "mode": "reverse", "env_direction": "inverted" }"#,
    )
    .expect("preset should parse");
    controls.apply(&preset);

    let snapshot = controls.snapshot();
    assert_eq!(snapshot, preset);
    assert_eq!(snapshot.mix, ControlSnapshot::default().mix);

    // Takes effect at the next block boundary
    render(&mut engine, &generate_sine(220.0, 0.5, TEST_BUFFER_SIZE));
    assert_eq!(engine.unit().params().active_slices, 16);
    assert_eq!(engine.unit().params().mode, SliceMode::Reverse);
}
