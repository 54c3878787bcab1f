use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PromoError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PromoError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(PromoError::asset("x").to_string().contains("asset error:"));
    assert!(PromoError::encode("x").to_string().contains("encode error:"));
    assert!(
        PromoError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PromoError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn capture_failures_convert_transparently() {
    let err: PromoError = CaptureFailure::EmptyCapture.into();
    assert!(matches!(err, PromoError::Capture(CaptureFailure::EmptyCapture)));
    assert_eq!(err.to_string(), CaptureFailure::EmptyCapture.to_string());
}
