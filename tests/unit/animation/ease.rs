use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn clamp01_bounds_and_nan() {
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
    assert_eq!(clamp01(7.0), 1.0);
    assert_eq!(clamp01(f64::NAN), 0.0);
}

#[test]
fn lerp_clamps_t() {
    assert_eq!(lerp(10.0, 20.0, 0.5), 15.0);
    assert_eq!(lerp(10.0, 20.0, -1.0), 10.0);
    assert_eq!(lerp(10.0, 20.0, 3.0), 20.0);
}

#[test]
fn cubic_curves_match_closed_forms() {
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    assert_eq!(ease_in_out_cubic(0.5), 0.5);
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        let sym = ease_in_out_cubic(t) + ease_in_out_cubic(1.0 - t);
        assert!((sym - 1.0).abs() < 1e-12, "asymmetric at t={t}");
    }
}

#[test]
fn progress_guards_zero_duration() {
    assert_eq!(progress(5.0, 0.0), 1.0);
    assert_eq!(progress(0.0, 0.0), 1.0);
    assert_eq!(progress(50.0, 100.0), 0.5);
    assert_eq!(progress(500.0, 100.0), 1.0);
}
