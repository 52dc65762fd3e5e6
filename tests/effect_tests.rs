// Host-side tests for widget state: layers, coalescing, reset and bounds.

use std::time::Duration;
use tilt_core::*;

fn effect(options: TiltOptions) -> TiltEffect {
    TiltEffect::new(options, ViewportBounds::new(200.0, 100.0))
}

fn near_neutral(t: &LayerTransform) -> bool {
    match t {
        LayerTransform::Neutral { .. } => true,
        LayerTransform::Tilt(p) => {
            p.translate.abs().max_element() < 1e-4 && p.rotate.abs().max_element() < 1e-4
        }
    }
}

fn pose(t: &LayerTransform) -> TiltPose {
    match t {
        LayerTransform::Tilt(p) => *p,
        LayerTransform::Neutral { .. } => panic!("expected a tilt pose, got {:?}", t),
    }
}

#[test]
fn layer_count_is_clamped() {
    let e = effect(TiltOptions {
        layer_count: 100,
        ..TiltOptions::default()
    });
    assert_eq!(e.stack().front_count(), 64);
    assert_eq!(e.layers().len(), 65);

    let e = effect(TiltOptions {
        layer_count: -5,
        ..TiltOptions::default()
    });
    assert_eq!(e.stack().front_count(), 0);
    assert_eq!(e.stack().moving_count(), 0);
}

#[test]
fn no_moving_layers_produces_empty_frames() {
    let mut e = effect(TiltOptions {
        layer_count: 0,
        ..TiltOptions::default()
    });
    assert!(e.pointer_moved(PointerSample::new(10.0, 10.0)));
    let batch = e.frame().unwrap();
    assert!(batch.is_empty());
    assert!(e.reset().is_empty());
}

#[test]
fn moves_within_one_frame_coalesce_to_the_last_sample() {
    let mut e = effect(TiltOptions::default());
    let mut requests = 0;
    for i in 0..10 {
        if e.pointer_moved(PointerSample::new(i as f32 * 10.0, 20.0)) {
            requests += 1;
        }
    }
    assert_eq!(requests, 1);

    let batch = e.frame().expect("pending frame");
    assert_eq!(e.frames_computed(), 1);
    assert!(e.frame().is_none());
    assert_eq!(e.frames_computed(), 1);

    let expected = e.transforms_for(PointerSample::new(90.0, 20.0));
    assert_eq!(batch, expected);

    // next move after the frame asks for a new one
    assert!(e.pointer_moved(PointerSample::new(1.0, 1.0)));
}

#[test]
fn cancelled_frame_computes_nothing() {
    let mut e = effect(TiltOptions::default());
    e.pointer_moved(PointerSample::new(5.0, 5.0));
    e.cancel_pending();
    assert!(!e.has_pending_frame());
    assert!(e.frame().is_none());
    assert_eq!(e.frames_computed(), 0);
}

#[test]
fn fixed_back_layer_is_never_transformed() {
    let mut e = effect(TiltOptions {
        layer_count: 1,
        movement: Movement {
            perspective: 1000.0,
            translate_x: -10.0,
            ..Movement::default()
        },
        ..TiltOptions::default()
    });
    e.pointer_moved(PointerSample::new(150.0, 50.0));
    let batch = e.frame().unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].0, 1);
    assert!((pose(&batch[0].1).translate.x + 5.0).abs() < 1e-4);

    assert_eq!(e.layers()[0].transform, None);
    assert_eq!(e.layers()[1].transform, Some(batch[0].1));
}

#[test]
fn moving_back_layer_shares_the_depth_scale() {
    let mut e = effect(TiltOptions {
        layer_count: 1,
        back_fixed: false,
        movement: Movement {
            translate_x: 10.0,
            ..Movement::default()
        },
        ..TiltOptions::default()
    });
    e.pointer_moved(PointerSample::new(200.0, 0.0));
    let batch = e.frame().unwrap();
    let slots: Vec<_> = batch.iter().map(|(s, _)| *s).collect();
    assert_eq!(slots, vec![0, 1]);
    assert!((pose(&batch[0].1).translate.x - 5.0).abs() < 1e-4);
    assert!((pose(&batch[1].1).translate.x - 10.0).abs() < 1e-4);
}

#[test]
fn reset_returns_every_moving_layer_to_neutral() {
    let mut e = effect(TiltOptions {
        back_fixed: false,
        ..TiltOptions::default()
    });
    e.pointer_moved(PointerSample::new(3.0, 97.0));
    let moved = e.frame().unwrap();
    assert!(moved.iter().all(|(_, t)| !near_neutral(t)));

    let reset = e.reset();
    assert_eq!(reset.len(), 3);
    for (slot, t) in &reset {
        assert_eq!(*t, LayerTransform::Neutral { perspective: 1000.0 });
        assert!(t.is_neutral());
        assert_eq!(e.layers()[*slot].transform, Some(*t));
    }
}

#[test]
fn leave_schedules_reset_only_when_enabled() {
    let e = effect(TiltOptions::default());
    assert_eq!(e.pointer_left(), Some(Duration::from_millis(60)));

    let e = effect(TiltOptions {
        reset_on_leave: false,
        ..TiltOptions::default()
    });
    assert_eq!(e.pointer_left(), None);

    let e = effect(TiltOptions {
        timing: Timing {
            reset_delay_ms: 250,
            ..Timing::default()
        },
        ..TiltOptions::default()
    });
    assert_eq!(e.pointer_left(), Some(Duration::from_millis(250)));
}

#[test]
fn new_bounds_apply_to_the_next_frame_only() {
    let mut e = effect(TiltOptions::default());
    e.pointer_moved(PointerSample::new(100.0, 50.0));
    let centered = e.frame().unwrap();
    assert!(centered.iter().all(|(_, t)| near_neutral(t)));

    e.set_bounds(ViewportBounds::new(400.0, 200.0));
    assert_eq!(e.frames_computed(), 1);
    assert!(!e.has_pending_frame());

    e.pointer_moved(PointerSample::new(100.0, 50.0));
    let shifted = e.frame().unwrap();
    assert!(shifted.iter().all(|(_, t)| !near_neutral(t)));
}

#[test]
fn default_opacity_skips_the_back_layer() {
    let e = effect(TiltOptions::default());
    let opacities: Vec<_> = e.layers().iter().map(|l| l.opacity).collect();
    assert_eq!(opacities, vec![None, Some(0.7), Some(0.7)]);
}

#[test]
fn per_layer_opacity_indexes_moving_layers() {
    let e = effect(TiltOptions {
        layer_count: 3,
        layer_opacity: Some(vec![Some(0.2), None]),
        ..TiltOptions::default()
    });
    let opacities: Vec<_> = e.layers().iter().map(|l| l.opacity).collect();
    assert_eq!(opacities, vec![None, Some(0.2), Some(0.7), Some(0.7)]);

    let e = effect(TiltOptions {
        layer_count: 2,
        back_fixed: false,
        layer_opacity: Some(vec![Some(1.0), Some(0.5), Some(0.25)]),
        ..TiltOptions::default()
    });
    let opacities: Vec<_> = e.layers().iter().map(|l| l.opacity).collect();
    assert_eq!(opacities, vec![Some(1.0), Some(0.5), Some(0.25)]);
}

#[test]
fn pose_scale_comes_from_the_layer() {
    let mut e = effect(TiltOptions {
        layer_count: 3,
        scale_step: 0.1,
        ..TiltOptions::default()
    });
    e.pointer_moved(PointerSample::new(20.0, 80.0));
    let batch = e.frame().unwrap();
    assert_eq!(batch.len(), 3);
    for (slot, t) in &batch {
        let layer = &e.layers()[*slot];
        let expected = (layer.scale != 1.0).then_some(layer.scale);
        assert_eq!(pose(t).scale, expected);
    }
    assert!((e.layers()[1].scale - 1.2).abs() < 1e-4);
    assert_eq!(pose(&batch[2].1).scale, None);
}
