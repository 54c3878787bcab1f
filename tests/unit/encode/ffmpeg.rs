use super::*;

const LISTING: &str = "\
Encoders:
 V..... = Video
 ------
 V....D libx264              libx264 H.264 / AVC / MPEG-4 AVC (codec h264)
 V....D libvpx               libvpx VP8 (codec vp8)
 V....D libvpx-vp9           libvpx VP9 (codec vp9)
";

#[test]
fn select_prefers_vp9() {
    assert_eq!(select_mime(LISTING), Some(VideoMime::WebmVp9));
}

#[test]
fn select_falls_back_through_preferences() {
    let vp8_only: String = LISTING
        .lines()
        .filter(|l| !l.contains("libvpx-vp9"))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(select_mime(&vp8_only), Some(VideoMime::WebmVp8));

    let h264_only = " V....D libx264              libx264 H.264\n";
    assert_eq!(select_mime(h264_only), Some(VideoMime::Mp4));
}

#[test]
fn select_nothing_when_no_encoder_matches() {
    assert_eq!(select_mime(""), None);
    assert_eq!(select_mime(" V....D mpeg4   MPEG-4 part 2\n"), None);
}

#[test]
fn missing_program_is_unsupported() {
    let backend = FfmpegBackend::with_program("/nonexistent/ffmpeg-for-tests");
    assert_eq!(backend.probe(), None);
}

#[test]
fn start_with_missing_program_fails() {
    let mut backend = FfmpegBackend::with_program("/nonexistent/ffmpeg-for-tests");
    let cfg = EncoderConfig {
        width: 4,
        height: 4,
        fps: crate::foundation::core::Fps::default(),
        mime: VideoMime::WebmVp9,
        background: Rgba8::rgb(0, 0, 0),
    };
    let err = backend.start(&cfg).err().unwrap().to_string();
    assert!(err.contains("spawn ffmpeg"), "{err}");
}

#[test]
fn output_args_match_container() {
    let b = FfmpegBackend::new();
    let vp9 = b.output_args(VideoMime::WebmVp9);
    assert!(vp9.iter().any(|a| a == "libvpx-vp9"));
    assert_eq!(vp9.last().map(String::as_str), Some("webm"));
    let mp4 = b.output_args(VideoMime::Mp4);
    assert!(mp4.iter().any(|a| a == "frag_keyframe+empty_moov"));
}
