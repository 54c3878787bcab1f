use super::*;
use crate::timeline::model::SceneTiming;

#[test]
fn empty_json_is_the_builtin_promo() {
    let cfg = PromoConfig::from_reader(&b"{}"[..]).unwrap();
    assert_eq!(cfg, PromoConfig::default());
    cfg.validate().unwrap();
    assert_eq!(cfg.timeline(), SceneTimeline::smartygym());
    assert_eq!(cfg.scripts().len(), 8);
    assert_eq!(cfg.capture_options().asset_timeout, Duration::from_millis(3_000));
    assert!(matches!(cfg.logo_source(), LogoSource::None));
}

#[test]
fn partial_json_overrides_fields() {
    let cfg = PromoConfig::from_reader(
        &br#"{"canvas":{"width":640,"height":360},"fps":{"num":24,"den":1},
             "style":{"footer_text":"hello"},"label":"Launch"}"#[..],
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas.width, 640);
    assert_eq!(cfg.fps.num, 24);
    assert_eq!(cfg.frame_style().footer_text, "hello");
    assert_eq!(cfg.frame_style().footer_size, FrameStyle::default().footer_size);
    assert_eq!(cfg.label, "Launch");
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(PromoConfig::from_reader(&br#"{"canvass":{}}"#[..]).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let odd = PromoConfig {
        canvas: Canvas {
            width: 101,
            height: 100,
        },
        ..PromoConfig::default()
    };
    assert!(odd.validate().is_err());

    let no_timeout = PromoConfig {
        asset_timeout_ms: 0,
        ..PromoConfig::default()
    };
    assert!(no_timeout.validate().is_err());

    let runaway_fps = PromoConfig::from_reader(&br#"{"fps":{"num":4294967295,"den":1}}"#[..])
        .unwrap();
    assert!(runaway_fps.validate().is_err());

    let mismatch = PromoConfig {
        timeline: Some(SceneTimeline::new(vec![SceneTiming::new(1, 1, 1)]).unwrap()),
        ..PromoConfig::default()
    };
    assert!(mismatch.validate().is_err());

    let matched = PromoConfig {
        timeline: Some(SceneTimeline::new(vec![SceneTiming::new(1, 1, 1)]).unwrap()),
        scenes: Some(vec![smartygym_scripts().remove(0)]),
        ..PromoConfig::default()
    };
    matched.validate().unwrap();
}

#[test]
fn from_path_rebases_relative_asset_paths() {
    let dir = std::env::temp_dir().join(format!("smartygym-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("promo.json");
    std::fs::write(
        &file,
        br#"{"logo_path":"brand/logo.svg","font_path":"/abs/font.ttf"}"#,
    )
    .unwrap();

    let cfg = PromoConfig::from_path(&file).unwrap();
    assert_eq!(cfg.logo_path, Some(dir.join("brand/logo.svg")));
    assert_eq!(cfg.font_path, Some(PathBuf::from("/abs/font.ttf")));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_an_error() {
    assert!(PromoConfig::from_path("target/does-not-exist/promo.json").is_err());
}
