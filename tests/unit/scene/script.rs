use super::*;

#[test]
fn rel_rect_maps_to_pixels() {
    let canvas = Canvas {
        width: 200,
        height: 100,
    };
    let r = RelRect::new(0.25, 0.5, 0.5, 0.25).to_px(canvas);
    assert_eq!(r, Rect::new(50.0, 50.0, 150.0, 75.0));
}

#[test]
fn directive_json_uses_kind_tag_and_defaults() {
    let d: Directive = serde_json::from_str(
        r#"{"kind":"text","text":"Hi","center":{"x":0.5,"y":0.5},"size":0.1,
            "color":[255,255,255,255]}"#,
    )
    .unwrap();
    match d {
        Directive::Text {
            motion,
            delay_ms,
            ease,
            ..
        } => {
            assert_eq!(motion, Motion::Fade);
            assert_eq!(delay_ms, 0.0);
            assert_eq!(ease, Ease::OutCubic);
        }
        other => panic!("unexpected directive: {other:?}"),
    }
}

#[test]
fn invalid_directives_are_rejected() {
    let bad_text = Directive::Text {
        text: String::new(),
        center: Vec2::new(0.5, 0.5),
        size: 0.1,
        color: Rgba8::rgb(0, 0, 0),
        motion: Motion::Fade,
        delay_ms: 0.0,
        ease: Ease::Linear,
    };
    assert!(bad_text.validate().is_err());

    let bad_chips = Directive::Chips {
        labels: vec!["a".into()],
        center_y: 0.5,
        size: 0.1,
        per_row: 0,
        cycle_ms: 100.0,
        stagger_ms: 0.0,
        color: Rgba8::rgb(0, 0, 0),
        text_color: Rgba8::rgb(0, 0, 0),
        accent: Rgba8::rgb(0, 0, 0),
    };
    assert!(bad_chips.validate().is_err());

    let bar = Directive::Bar {
        center: Vec2::new(0.5, 0.5),
        width: 0.2,
        height: 0.01,
        color: Rgba8::rgb(0, 0, 0),
        delay_ms: f64::NAN,
    };
    let script = SceneScript {
        name: "broken".into(),
        directives: vec![bar],
    };
    let err = script.validate().unwrap_err().to_string();
    assert!(err.contains("broken"), "{err}");
    assert!(err.contains("bar"), "{err}");
}
