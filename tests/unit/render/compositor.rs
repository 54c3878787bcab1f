use super::*;
use std::sync::Arc;

use crate::assets::logo::LogoImage;
use crate::foundation::core::Canvas;
use crate::scene::catalog::smartygym_scripts;

fn surface() -> Surface {
    Surface::new(
        Canvas {
            width: 64,
            height: 64,
        },
        None,
    )
    .unwrap()
}

#[test]
fn rejects_script_count_mismatch() {
    let mut scripts = smartygym_scripts();
    scripts.pop();
    let err = Compositor::new(SceneTimeline::smartygym(), scripts, FrameStyle::default())
        .unwrap_err()
        .to_string();
    assert!(err.contains("8 scenes"), "{err}");
}

#[test]
fn rejects_non_positive_footer_size() {
    let style = FrameStyle {
        footer_size: 0.0,
        ..FrameStyle::default()
    };
    assert!(Compositor::smartygym(style).is_err());
}

#[test]
fn same_time_renders_identical_frames() {
    let c = Compositor::smartygym(FrameStyle::default()).unwrap();
    let mut s = surface();
    let assets = RenderAssets::default();
    let a = c.render_frame(&mut s, &assets, 5_432.0).unwrap();
    let _ = c.render_frame(&mut s, &assets, 100.0).unwrap();
    let _ = c.render_frame(&mut s, &assets, 19_000.0).unwrap();
    let b = c.render_frame(&mut s, &assets, 5_432.0).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a, b);
}

#[test]
fn frame_starts_from_background() {
    let style = FrameStyle {
        background: Rgba8::rgb(1, 2, 3),
        ..FrameStyle::default()
    };
    let c = Compositor::smartygym(style).unwrap();
    let mut s = surface();
    let f = c.render_frame(&mut s, &RenderAssets::default(), 0.0).unwrap();
    assert_eq!(f.pixel(0, 0), Some([1, 2, 3, 255]));
}

#[test]
fn failing_scene_still_flushes_the_frame() {
    let style = FrameStyle {
        background: Rgba8::rgb(4, 5, 6),
        ..FrameStyle::default()
    };
    let c = Compositor::smartygym(style).unwrap();
    let mut s = surface();
    let broken = RenderAssets::with_logo(Arc::new(LogoImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![0; 3]),
    }));
    assert!(c.draw_frame(&mut s, &broken, 900.0).is_err());
    assert_eq!(s.snapshot().pixel(0, 0), Some([4, 5, 6, 255]));
}

#[test]
fn past_end_renders_final_scene_held() {
    let c = Compositor::smartygym(FrameStyle::default()).unwrap();
    let mut s = surface();
    let assets = RenderAssets::default();
    let total = c.duration_ms() as f64;
    let a = c.render_frame(&mut s, &assets, total).unwrap();
    let b = c.render_frame(&mut s, &assets, total + 10_000.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn accessors_expose_configuration() {
    let c = Compositor::smartygym(FrameStyle::default()).unwrap();
    assert_eq!(c.timeline().len(), 8);
    assert_eq!(c.duration_ms(), SceneTimeline::smartygym().total_ms());
    assert_eq!(c.style().footer_text, "smartygym.com");
}
