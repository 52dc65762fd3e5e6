// Host-side tests for the pointer-to-transform mapping.
// The web crate is wasm-only, so these run against tilt-core directly.

use tilt_core::*;

const EPS: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

fn all_axes() -> Movement {
    Movement {
        perspective: 800.0,
        translate_x: -10.0,
        translate_y: 12.0,
        translate_z: 20.0,
        rotate_x: 2.0,
        rotate_y: -3.0,
        rotate_z: 5.0,
    }
}

fn axes(p: &TiltPose) -> [f32; 6] {
    [
        p.translate.x,
        p.translate.y,
        p.translate.z,
        p.rotate.x,
        p.rotate.y,
        p.rotate.z,
    ]
}

#[test]
fn center_sample_is_neutral_for_every_layer() {
    let bounds = ViewportBounds::new(300.0, 180.0);
    let m = all_axes();
    for count in 1..=6 {
        for depth in 0..count {
            let p = TiltPose::compute(&m, 1.0, depth, count, bounds, bounds.center());
            for v in axes(&p) {
                assert!(v.abs() < EPS, "depth {} of {}: {}", depth, count, v);
            }
        }
    }
}

#[test]
fn deeper_layers_never_move_more() {
    let bounds = ViewportBounds::new(400.0, 200.0);
    let m = all_axes();
    let count = 5;
    let samples = [
        PointerSample::new(0.0, 0.0),
        PointerSample::new(37.0, 190.0),
        PointerSample::new(400.0, 12.5),
        PointerSample::new(250.0, 100.0),
    ];
    for s in samples {
        let poses: Vec<_> = (0..count)
            .map(|d| axes(&TiltPose::compute(&m, 1.0, d, count, bounds, s)))
            .collect();
        for pair in poses.windows(2) {
            for axis in 0..6 {
                assert!(
                    pair[0][axis].abs() <= pair[1][axis].abs() + EPS,
                    "axis {} at {:?}: {} > {}",
                    axis,
                    s,
                    pair[0][axis],
                    pair[1][axis]
                );
            }
        }
    }
}

#[test]
fn outermost_layer_reaches_full_magnitude_at_edges() {
    let bounds = ViewportBounds::new(200.0, 100.0);
    let m = all_axes();
    let count = 3;
    let last = count - 1;

    let left_top = TiltPose::compute(&m, 1.0, last, count, bounds, PointerSample::new(0.0, 0.0));
    assert!(approx(left_top.translate.x, 10.0));
    assert!(approx(left_top.translate.y, -12.0));
    assert!(approx(left_top.translate.z, -20.0));
    assert!(approx(left_top.rotate.x, -2.0));
    assert!(approx(left_top.rotate.y, 3.0));
    assert!(approx(left_top.rotate.z, -5.0));

    let right_bottom =
        TiltPose::compute(&m, 1.0, last, count, bounds, PointerSample::new(200.0, 100.0));
    assert!(approx(right_bottom.translate.x, -10.0));
    assert!(approx(right_bottom.translate.y, 12.0));
    assert!(approx(right_bottom.translate.z, 20.0));
    assert!(approx(right_bottom.rotate.x, 2.0));
    assert!(approx(right_bottom.rotate.y, -3.0));
    assert!(approx(right_bottom.rotate.z, 5.0));
}

#[test]
fn disabled_axis_stays_zero() {
    let m = Movement {
        translate_x: 10.0,
        ..Movement::default()
    };
    let bounds = ViewportBounds::new(200.0, 100.0);
    let p = TiltPose::compute(&m, 1.0, 0, 1, bounds, PointerSample::new(3.0, 97.0));
    assert_eq!(p.translate.y, 0.0);
    assert_eq!(p.translate.z, 0.0);
    assert_eq!(p.rotate.to_array(), [0.0; 3]);
    assert_eq!(p.perspective, 0.0);
}

#[test]
fn unit_scale_is_omitted() {
    for count in 1..=8 {
        for depth in 0..count {
            assert_eq!(depth_scale(0.0, depth, count), 1.0);
        }
    }
    let p = TiltPose::compute(
        &all_axes(),
        1.0,
        0,
        4,
        ViewportBounds::new(10.0, 10.0),
        PointerSample::new(1.0, 1.0),
    );
    assert_eq!(p.scale, None);
}

#[test]
fn scale_step_grows_toward_the_back() {
    assert!(approx(depth_scale(0.1, 0, 3), 1.2));
    assert!(approx(depth_scale(0.1, 1, 3), 1.1));
    assert_eq!(depth_scale(0.1, 2, 3), 1.0);
}

#[test]
fn single_front_layer_worked_example() {
    let m = Movement {
        perspective: 1000.0,
        translate_x: -10.0,
        ..Movement::default()
    };
    let bounds = ViewportBounds::new(200.0, 100.0);
    let p = TiltPose::compute(&m, 1.0, 0, 1, bounds, PointerSample::new(150.0, 50.0));
    assert!(approx(p.translate.x, -5.0));

    let flipped = Movement {
        translate_x: 10.0,
        ..m
    };
    let p = TiltPose::compute(&flipped, 1.0, 0, 1, bounds, PointerSample::new(150.0, 50.0));
    assert!(approx(p.translate.x, 5.0));
}
