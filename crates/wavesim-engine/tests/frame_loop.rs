//! Integration test: the host-facing frame loop.
//!
//! Queued impulses must land before the frame's step and in submission
//! order, rejections must not abort a frame, and pausing, sources, and
//! initial velocity must compose with it.

use std::thread;

use proptest::prelude::*;
use wavesim_core::{BoundaryKind, FieldError, Grid, Impulse, Source};
use wavesim_engine::{Controller, DisplayScale, IngressError, WaveConfig};
use wavesim_test_utils::{assert_all_finite, square_config, square_controller};

#[test]
fn queued_frame_matches_direct_calls() {
    let impulses = [
        Impulse::point(3, 3, 1.0),
        Impulse::gaussian(6, 2, -0.5, 1.5),
        Impulse::point(1, 7, 0.25),
    ];

    let mut direct = square_controller(10, BoundaryKind::Reflective);
    for i in impulses {
        direct.apply_impulse(i).unwrap();
    }
    direct.step();

    let mut queued = square_controller(10, BoundaryKind::Reflective);
    let tx = queued.input_handle();
    for i in impulses {
        tx.submit(i).unwrap();
    }
    let frame = queued.advance_frame();
    assert!(frame.receipts.iter().all(|r| r.accepted));
    assert_eq!(frame.field.as_slice(), direct.field_snapshot().as_slice());
}

#[test]
fn rejected_impulse_does_not_abort_frame() {
    let mut c = square_controller(6, BoundaryKind::Fixed(0.0));
    c.queue_impulse(Impulse::point(99, 0, 1.0)).unwrap();
    c.queue_impulse(Impulse::point(2, 2, f32::NAN)).unwrap();
    c.queue_impulse(Impulse::point(2, 2, 1.0)).unwrap();
    let frame = c.advance_frame();
    assert_eq!(frame.field.tick(), 1);
    assert!(matches!(
        frame.receipts[0].reason,
        Some(FieldError::OutOfBounds { x: 99, .. })
    ));
    assert!(matches!(
        frame.receipts[1].reason,
        Some(FieldError::InvalidImpulse { .. })
    ));
    assert!(frame.receipts[2].accepted);
    assert_all_finite(&frame.field);
    assert!(frame.field.max_abs() > 0.0);
}

#[test]
fn producer_thread_feeds_frames() {
    let mut c = square_controller(16, BoundaryKind::Absorbing(0.1));
    let tx = c.input_handle();
    let producer = thread::spawn(move || {
        for i in 1..15 {
            tx.submit(Impulse::point(i, i, 0.1)).unwrap();
        }
    });
    producer.join().unwrap();
    assert_eq!(c.pending_inputs(), 14);
    let frame = c.advance_frame();
    assert_eq!(frame.receipts.len(), 14);
    let xs: Vec<usize> = frame.receipts.iter().map(|r| r.impulse.x).collect();
    assert_eq!(xs, (1..15).collect::<Vec<_>>());
    assert_eq!(c.pending_inputs(), 0);
}

#[test]
fn handle_reports_dropped_controller() {
    let c = square_controller(4, BoundaryKind::Fixed(0.0));
    let tx = c.input_handle();
    drop(c);
    assert_eq!(
        tx.submit(Impulse::point(1, 1, 1.0)),
        Err(IngressError::Disconnected)
    );
}

#[test]
fn paused_frames_apply_input_without_stepping() {
    let mut c = square_controller(6, BoundaryKind::Fixed(0.0));
    c.pause();
    c.queue_impulse(Impulse::point(2, 2, 1.0)).unwrap();
    let frame = c.advance_frame();
    assert_eq!(frame.field.tick(), 0);
    assert_eq!(frame.field.get(2, 2).unwrap(), 1.0);
    c.resume();
    assert_eq!(c.advance_frame().field.tick(), 1);
}

#[test]
fn source_drives_field_until_disabled() {
    let config = square_config(15, BoundaryKind::Absorbing(0.0))
        .with_source(Source::new(7, 7, 1.0, 0.1));
    let mut c = Controller::from_config(config).unwrap();
    for _ in 0..40 {
        c.step();
    }
    assert!(c.field_snapshot().max_abs() > 0.05);

    c.reset();
    c.set_sources_enabled(false);
    for _ in 0..40 {
        c.step();
    }
    assert_eq!(c.field_snapshot().max_abs(), 0.0);
}

#[test]
fn initial_velocity_sets_field_in_motion() {
    let mut c = square_controller(9, BoundaryKind::Fixed(0.0));
    let mut v = Grid::new(9, 9).unwrap();
    v.set(4, 4, 2.0).unwrap();
    assert_eq!(c.set_initial_velocity(&v), Ok(true));
    c.step();
    // u = 0 - (0 - 0.5·2) = 1 at the centre.
    assert_eq!(c.field_snapshot().get(4, 4).unwrap(), 1.0);

    c.reset();
    c.step();
    assert_eq!(c.field_snapshot().max_abs(), 0.0);
}

#[test]
fn display_scale_follows_frames() {
    let mut c = square_controller(12, BoundaryKind::Reflective);
    c.apply_impulse(Impulse::gaussian(6, 6, 0.8, 1.5)).unwrap();
    let mut scale = DisplayScale::default();
    let mut pixels = Vec::new();
    for _ in 0..10 {
        let frame = c.advance_frame();
        scale.observe(frame.metrics.max_abs_amplitude);
        scale.intensities(&frame.field, &mut pixels);
    }
    assert_eq!(pixels.len(), 144);
    assert!(pixels.iter().all(|&p| (0.0..=1.0).contains(&p)));
    assert!((0.1..=0.9).contains(&scale.peak()));
}

#[test]
fn frame_metrics_describe_the_step() {
    let mut c = Controller::from_config(WaveConfig::new(
        8,
        8,
        wavesim_test_utils::half_courant(),
        BoundaryKind::Fixed(0.0),
    ))
    .unwrap();
    c.queue_impulse(Impulse::point(4, 4, 2.0)).unwrap();
    let frame = c.advance_frame();
    assert_eq!(frame.metrics.tick, 1);
    assert_eq!(frame.metrics.impulses_applied, 1);
    assert_eq!(frame.metrics.non_finite_cells, 0);
    assert!((frame.metrics.energy - frame.field.sum_of_squares()).abs() < 1e-9);
    assert_eq!(frame.metrics.max_abs_amplitude, frame.field.max_abs());
}

proptest! {
    #[test]
    fn random_impulses_keep_field_finite(
        impulses in proptest::collection::vec(
            (0usize..20, 0usize..20, -2.0f32..2.0, proptest::option::of(0.5f32..3.0)),
            0..12,
        ),
        boundary in prop_oneof![
            Just(BoundaryKind::Fixed(0.0)),
            Just(BoundaryKind::Reflective),
            (0.0f32..=1.0).prop_map(BoundaryKind::Absorbing),
            Just(BoundaryKind::Periodic),
        ],
    ) {
        let mut c = square_controller(16, boundary);
        for (x, y, amplitude, radius) in impulses {
            let impulse = Impulse { x, y, amplitude, radius };
            let result = c.apply_impulse_clamped(impulse);
            prop_assert!(result.is_ok());
        }
        for _ in 0..60 {
            c.step();
        }
        prop_assert_eq!(c.last_metrics().non_finite_cells, 0);
    }
}
