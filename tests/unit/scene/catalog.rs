use super::*;
use crate::timeline::model::SceneTimeline;

#[test]
fn one_script_per_timeline_scene() {
    let scripts = smartygym_scripts();
    assert_eq!(scripts.len(), SceneTimeline::smartygym().len());
    assert_eq!(scripts.len(), 8);
}

#[test]
fn every_builtin_script_validates() {
    for script in smartygym_scripts() {
        script.validate().unwrap();
        assert!(!script.directives.is_empty(), "{} is empty", script.name);
    }
}

#[test]
fn scripts_round_trip_through_json() {
    let scripts = smartygym_scripts();
    let json = serde_json::to_string(&scripts).unwrap();
    let back: Vec<SceneScript> = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), scripts.len());
    for (a, b) in back.iter().zip(&scripts) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.directives.len(), b.directives.len());
        a.validate().unwrap();
    }
}

#[test]
fn intro_and_outro_carry_the_logo() {
    let scripts = smartygym_scripts();
    let has_logo = |s: &SceneScript| {
        s.directives
            .iter()
            .any(|d| matches!(d, Directive::Logo { .. }))
    };
    assert!(has_logo(&scripts[0]));
    assert!(has_logo(&scripts[7]));
}
