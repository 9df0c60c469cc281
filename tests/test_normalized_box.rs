extern crate lab_detect;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use lab_detect::common::NormalizedBox;
use lab_detect::GeometryError;

const EPS: f32 = 1e-6;

fn random_box(rng: &mut StdRng) -> NormalizedBox {
    NormalizedBox::new(
        rng.gen_range(-0.5..1.5),
        rng.gen_range(-0.5..1.5),
        rng.gen_range(-0.5..1.5),
        rng.gen_range(-0.5..1.5),
    )
}

fn random_valid_box(rng: &mut StdRng) -> NormalizedBox {
    let x = rng.gen_range(0.0..0.9);
    let y = rng.gen_range(0.0..0.9);
    let w = rng.gen_range(0.01..(1.0 - x));
    let h = rng.gen_range(0.01..(1.0 - y));
    NormalizedBox::new(x, y, w, h)
}

#[test]
fn construction_keeps_box_in_unit_frame() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let b = random_box(&mut rng);
        assert!((0.0..=1.0).contains(&b.x()));
        assert!((0.0..=1.0).contains(&b.y()));
        assert!(b.width() >= 0.0);
        assert!(b.height() >= 0.0);
        assert!(b.right() <= 1.0 + EPS, "{}", b);
        assert!(b.bottom() <= 1.0 + EPS, "{}", b);
    }
}

#[test]
fn oversized_box_is_capped_by_origin() {
    let b = NormalizedBox::new(0.5, 0.5, 0.8, 0.8);
    assert_eq!(b.xy1_wh(), (0.5, 0.5, 0.5, 0.5));
}

#[test]
fn origin_out_of_range_destroys_size() {
    let b = NormalizedBox::new(1.5, -0.2, 0.3, 0.4);
    assert_eq!(b.x(), 1.0);
    assert_eq!(b.width(), 0.0);
    assert_eq!(b.y(), 0.0);
    assert!((b.height() - 0.4).abs() < EPS);
}

#[test]
fn nan_components_become_zero() {
    let b = NormalizedBox::new(f32::NAN, 0.2, 0.3, f32::NAN);
    assert_eq!(b.x(), 0.0);
    assert_eq!(b.height(), 0.0);
    assert!((b.width() - 0.3).abs() < EPS);
}

#[test]
fn derived_queries() {
    let b = NormalizedBox::new(0.1, 0.2, 0.4, 0.2);
    assert!((b.right() - 0.5).abs() < EPS);
    assert!((b.bottom() - 0.4).abs() < EPS);
    assert!((b.center_x() - 0.3).abs() < EPS);
    assert!((b.center_y() - 0.3).abs() < EPS);
    assert!((b.area() - 0.08).abs() < EPS);
    assert!((b.aspect_ratio() - 2.0).abs() < EPS);
}

#[test]
fn zero_height_aspect_ratio_is_zero() {
    let b = NormalizedBox::new(0.1, 0.1, 0.5, 0.0);
    assert_eq!(b.aspect_ratio(), 0.0);
}

#[test]
fn equality_is_tolerant() {
    let a = NormalizedBox::new(0.1, 0.1, 0.2, 0.2);
    let b = NormalizedBox::new(0.1005, 0.1, 0.2, 0.1995);
    let c = NormalizedBox::new(0.102, 0.1, 0.2, 0.2);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn corner_and_center_constructors() {
    let a = NormalizedBox::from_corners(0.2, 0.2, 0.6, 0.5);
    let b = NormalizedBox::from_center(0.4, 0.35, 0.4, 0.3);
    assert_eq!(a, b);
    assert_eq!(a, NormalizedBox::new(0.2, 0.2, 0.4, 0.3));
}

#[test]
fn strict_constructor_rejects_bad_input() {
    assert!(NormalizedBox::try_new(0.5, 0.5, 0.5, 0.5).is_ok());
    assert!(matches!(
        NormalizedBox::try_new(0.5, 0.5, 0.8, 0.2),
        Err(GeometryError::OutOfRange { field: "width", .. })
    ));
    assert!(matches!(
        NormalizedBox::try_new(-0.1, 0.0, 0.1, 0.1),
        Err(GeometryError::OutOfRange { field: "x", .. })
    ));
    assert!(matches!(
        NormalizedBox::try_new(0.0, f32::INFINITY, 0.1, 0.1),
        Err(GeometryError::NonFinite { field: "y", .. })
    ));
}

#[test]
fn iou_scenario() {
    let a = NormalizedBox::new(0.0, 0.0, 0.5, 0.5);
    let b = NormalizedBox::new(0.25, 0.25, 0.5, 0.5);
    let iou = a.intersection_over_union(&b);
    assert!((iou - 0.0625 / 0.4375).abs() < 1e-4, "iou = {}", iou);
}

#[test]
fn iou_properties() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);
        let ab = a.intersection_over_union(&b);
        let ba = b.intersection_over_union(&a);
        assert!((0.0..=1.0).contains(&ab), "iou = {}", ab);
        assert!((ab - ba).abs() < EPS);
        if !a.intersects(&b) {
            assert_eq!(ab, 0.0);
        }
    }
    for _ in 0..100 {
        let a = random_valid_box(&mut rng);
        assert!((a.intersection_over_union(&a) - 1.0).abs() < 1e-4);
    }
}

#[test]
fn iou_of_small_boxes_far_from_origin_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut x = 0.5_f32;
    while x < 0.999 {
        let b = NormalizedBox::new(x, x, 1e-4, 1e-4);
        let iou = b.intersection_over_union(&b);
        assert!(iou <= 1.0, "self iou = {} for {}", iou, b);
        assert!(iou > 0.99, "self iou = {} for {}", iou, b);
        assert!(b.intersection_area(&b) <= b.area());

        let shifted = NormalizedBox::new(x + rng.gen_range(0.0..5e-5), x, 1e-4, 1e-4);
        let iou = b.intersection_over_union(&shifted);
        assert!((0.0..=1.0).contains(&iou), "iou = {} for {} / {}", iou, b, shifted);
        x += 0.0007;
    }
}

#[test]
fn iou_of_coincident_points_is_zero() {
    let p = NormalizedBox::new(0.3, 0.3, 0.0, 0.0);
    assert_eq!(p.intersection_over_union(&p), 0.0);
}

#[test]
fn touching_boxes_intersect_but_do_not_overlap() {
    let a = NormalizedBox::new(0.0, 0.0, 0.5, 0.5);
    let b = NormalizedBox::new(0.5, 0.0, 0.5, 0.5);
    let c = NormalizedBox::new(0.6, 0.6, 0.1, 0.1);
    assert!(a.intersects(&b));
    assert_eq!(a.intersection_over_union(&b), 0.0);
    assert!(!a.intersects(&c));
}

#[test]
fn containment_is_boundary_inclusive() {
    let outer = NormalizedBox::new(0.1, 0.1, 0.5, 0.5);
    let inner = NormalizedBox::new(0.1, 0.2, 0.5, 0.2);
    let outside = NormalizedBox::new(0.05, 0.2, 0.2, 0.2);
    assert!(outer.contains(&inner));
    assert!(outer.contains(&outer));
    assert!(!outer.contains(&outside));
    assert!(!inner.contains(&outer));
}

#[test]
fn center_distance() {
    let a = NormalizedBox::new(0.0, 0.0, 0.2, 0.2);
    let b = NormalizedBox::new(0.3, 0.4, 0.2, 0.2);
    assert!((a.distance_to_center(&b) - 0.5).abs() < EPS);
}

#[test]
fn expand_around_center() {
    let b = NormalizedBox::new(0.4, 0.4, 0.2, 0.2);
    assert_eq!(b.expanded(1.0), b);
    assert_eq!(b.expanded(2.0), NormalizedBox::new(0.3, 0.3, 0.4, 0.4));
    assert_eq!(b.expanded(0.5), NormalizedBox::new(0.45, 0.45, 0.1, 0.1));
}

#[test]
fn expand_near_corner_is_clamped() {
    let b = NormalizedBox::new(0.0, 0.0, 0.2, 0.2);
    let e = b.expanded(3.0);
    assert_eq!(e, NormalizedBox::new(0.0, 0.0, 0.6, 0.6));

    let far = NormalizedBox::new(0.8, 0.8, 0.2, 0.2).expanded(2.0);
    assert_eq!(far, NormalizedBox::new(0.7, 0.7, 0.3, 0.3));
}

#[test]
fn shrink_keeps_center() {
    let b = NormalizedBox::new(0.2, 0.2, 0.4, 0.4);
    let s = b.shrunk(0.5);
    assert_eq!(s, NormalizedBox::new(0.3, 0.3, 0.2, 0.2));

    let point = b.shrunk(0.0);
    assert_eq!(point, NormalizedBox::new(0.4, 0.4, 0.0, 0.0));
    assert_eq!(point.area(), 0.0);
}

#[test]
fn translate_clips_off_frame() {
    let b = NormalizedBox::new(0.5, 0.5, 0.3, 0.3);
    assert_eq!(b.translated(0.1, -0.2), NormalizedBox::new(0.6, 0.3, 0.3, 0.3));
    assert_eq!(b.translated(0.4, 0.0), NormalizedBox::new(0.9, 0.5, 0.1, 0.3));
}

#[test]
fn clip_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..500 {
        let b = random_box(&mut rng);
        assert_eq!(b.clipped().clipped(), b.clipped());
    }
}

#[test]
fn rotation_formulas() {
    let b = NormalizedBox::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(b.rotated(0), b);
    assert_eq!(b.rotated(90), NormalizedBox::new(0.4, 0.1, 0.4, 0.3));
    assert_eq!(b.rotated(180), NormalizedBox::new(0.6, 0.4, 0.3, 0.4));
    assert_eq!(b.rotated(270), NormalizedBox::new(0.2, 0.6, 0.4, 0.3));
}

#[test]
fn rotation_normalizes_angle() {
    let b = NormalizedBox::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(b.rotated(-90), b.rotated(270));
    assert_eq!(b.rotated(450), b.rotated(90));
    assert_eq!(b.rotated(360), b);
}

#[test]
fn unsupported_rotation_is_a_no_op() {
    let b = NormalizedBox::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(b.rotated(45), b);
    assert_eq!(b.try_rotated(45), Err(GeometryError::UnsupportedRotation(45)));
    assert_eq!(b.try_rotated(-180), Ok(b.rotated(180)));
}

#[test]
fn four_quarter_turns_round_trip() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let b = random_box(&mut rng);
        let r = b.rotated(90).rotated(90).rotated(90).rotated(90);
        assert_eq!(r, b);
    }
}

#[test]
fn deserialization_clamps() {
    let b: NormalizedBox =
        serde_json::from_str(r#"{"x": 0.5, "y": 0.5, "width": 0.8, "height": 0.8}"#).unwrap();
    assert_eq!(b, NormalizedBox::new(0.5, 0.5, 0.5, 0.5));

    let json = serde_json::to_string(&b).unwrap();
    let back: NormalizedBox = serde_json::from_str(&json).unwrap();
    assert_eq!(back, b);
}
