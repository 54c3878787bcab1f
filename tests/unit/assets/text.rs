use super::*;

#[test]
fn explicit_missing_font_is_an_error() {
    assert!(resolve_font(Some(Path::new("target/no-such-font.ttf"))).is_err());
}

#[test]
fn garbage_font_bytes_are_rejected() {
    assert!(TextLayoutEngine::new(b"not a font").is_err());
}

#[test]
fn system_font_lays_out_when_available() {
    let Some(face) = resolve_font(None).unwrap() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&face.bytes).unwrap();
    assert!(!engine.family_name().is_empty());
    let brush = TextBrushRgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    let short = engine.layout_line("Hi", 24.0, brush).unwrap();
    let long = engine.layout_line("Hi there, athlete", 24.0, brush).unwrap();
    assert!(long.width() > short.width());
    assert!(engine.layout_line("x", 0.0, brush).is_err());
}
