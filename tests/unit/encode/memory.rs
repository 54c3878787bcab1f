use super::*;
use crate::foundation::core::{Fps, Rgba8};

fn cfg(mime: VideoMime) -> EncoderConfig {
    EncoderConfig {
        width: 2,
        height: 2,
        fps: Fps::default(),
        mime,
        background: Rgba8::rgb(0, 0, 0),
    }
}

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: vec![v; 16],
        premultiplied: true,
    }
}

fn drain(rx: &Receiver<EncoderEvent>) -> Vec<EncoderEvent> {
    rx.try_iter().collect()
}

#[test]
fn probe_respects_preference_order() {
    assert_eq!(MemoryBackend::new().probe(), Some(VideoMime::WebmVp9));
    let b = MemoryBackend::new().with_supported(vec![VideoMime::Mp4, VideoMime::Webm]);
    assert_eq!(b.probe(), Some(VideoMime::Webm));
    assert_eq!(MemoryBackend::new().with_supported(vec![]).probe(), None);
}

#[test]
fn chunks_then_stopped() {
    let mut b = MemoryBackend::new().with_chunk_every(2);
    let (mut enc, rx) = b.start(&cfg(VideoMime::WebmVp9)).unwrap();
    for v in 0..5 {
        enc.push_frame(&frame(v)).unwrap();
    }
    enc.request_stop().unwrap();
    let events = drain(&rx);
    assert_eq!(events.len(), 4);
    assert_eq!(events.last(), Some(&EncoderEvent::Stopped));
    let bytes: Vec<u8> = events
        .iter()
        .filter_map(|e| match e {
            EncoderEvent::Chunk(c) => Some(c.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    assert!(bytes.starts_with(MEMORY_CONTAINER_MAGIC));
    assert!(bytes.ends_with(&frame(4).fingerprint().to_le_bytes()));
}

#[test]
fn output_is_deterministic() {
    let run = || {
        let mut b = MemoryBackend::new().with_chunk_every(3);
        let (mut enc, rx) = b.start(&cfg(VideoMime::Mp4)).unwrap();
        for v in 0..7 {
            enc.push_frame(&frame(v)).unwrap();
        }
        enc.request_stop().unwrap();
        drain(&rx)
    };
    assert_eq!(run(), run());
}

#[test]
fn deliver_nothing_still_stops() {
    let mut b = MemoryBackend::new().delivering_nothing();
    let (mut enc, rx) = b.start(&cfg(VideoMime::WebmVp9)).unwrap();
    for v in 0..20 {
        enc.push_frame(&frame(v)).unwrap();
    }
    enc.request_stop().unwrap();
    assert_eq!(drain(&rx), vec![EncoderEvent::Stopped]);
}

#[test]
fn fault_after_n_frames() {
    let mut b = MemoryBackend::new().with_chunk_every(100).faulting_after(3);
    let (mut enc, rx) = b.start(&cfg(VideoMime::WebmVp9)).unwrap();
    for v in 0..3 {
        enc.push_frame(&frame(v)).unwrap();
    }
    assert!(matches!(drain(&rx).as_slice(), [EncoderEvent::Fault(_)]));
    assert!(enc.push_frame(&frame(9)).is_err());
}

#[test]
fn stall_never_acknowledges_stop() {
    let mut b = MemoryBackend::new().stalling_on_stop();
    let (mut enc, rx) = b.start(&cfg(VideoMime::WebmVp9)).unwrap();
    enc.push_frame(&frame(1)).unwrap();
    enc.request_stop().unwrap();
    assert!(drain(&rx).is_empty());
    enc.abort();
    assert!(rx.recv().is_err());
}

#[test]
fn start_failures_and_counter() {
    let mut b = MemoryBackend::new().with_supported(vec![VideoMime::Mp4]);
    let counter = b.start_counter();
    assert!(b.start(&cfg(VideoMime::WebmVp9)).is_err());
    assert!(b.start(&cfg(VideoMime::Mp4)).is_ok());
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let mut failing = MemoryBackend::new().failing_start("no encoder");
    let err = failing.start(&cfg(VideoMime::WebmVp9)).err().unwrap();
    assert!(err.to_string().contains("no encoder"));
}

#[test]
fn abort_discards_pending_output() {
    let mut b = MemoryBackend::new().with_chunk_every(100);
    let (mut enc, rx) = b.start(&cfg(VideoMime::WebmVp9)).unwrap();
    enc.push_frame(&frame(1)).unwrap();
    enc.abort();
    enc.abort();
    assert!(rx.recv().is_err());
}
