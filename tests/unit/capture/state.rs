use super::*;

#[test]
fn generate_allowed_only_when_settled() {
    assert!(CaptureState::Idle.can_generate());
    assert!(CaptureState::Complete.can_generate());
    assert!(CaptureState::Failed.can_generate());
    for s in [
        CaptureState::Priming,
        CaptureState::Recording,
        CaptureState::Finalizing,
    ] {
        assert!(!s.can_generate());
        assert!(s.is_active());
    }
    assert!(!CaptureState::Idle.is_active());
}

#[test]
fn serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&CaptureState::Finalizing).unwrap(),
        "\"finalizing\""
    );
    assert_eq!(CaptureState::Recording.to_string(), "recording");
    assert_eq!(CaptureState::default(), CaptureState::Idle);
}
