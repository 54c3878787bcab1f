use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frame_duration_ms() - 33.333_333).abs() < 1e-3);
    assert_eq!(fps.frame_duration(), Duration::from_secs_f64(1.0 / 30.0));
}

#[test]
fn fps_rejects_rates_with_vanishing_frames() {
    assert!(Fps::new(u32::MAX, 1).is_err());
    assert!(Fps::new(1001, 1).is_err());
    assert!(Fps::new(1000, 1).is_ok());
    assert!(Fps::new(2000, 2).is_ok());
    let raw = Fps { num: u32::MAX, den: 1 };
    assert!(raw.validate().is_err());
    assert_eq!(Fps::new(1000, 1).unwrap().frame_duration(), Duration::from_millis(1));
}

#[test]
fn canvas_validation() {
    assert!(Canvas { width: 0, height: 2 }.validate().is_err());
    assert!(Canvas { width: 3, height: 2 }.validate().is_err());
    assert!(Canvas { width: 70_000, height: 2 }.validate().is_err());
    assert!(Canvas { width: 64, height: 48 }.validate().is_ok());
    assert_eq!(Canvas { width: 64, height: 48 }.min_side(), 48.0);
}

#[test]
fn canvas_relative_points() {
    let c = Canvas {
        width: 200,
        height: 100,
    };
    let p = c.at(Vec2::new(0.5, 0.25));
    assert_eq!((p.x, p.y), (100.0, 25.0));
}

#[test]
fn with_alpha_keeps_rgb() {
    assert_eq!(Rgba8::rgb(1, 2, 3).with_alpha(7), Rgba8([1, 2, 3, 7]));
}
