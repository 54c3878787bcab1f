use std::sync::mpsc::Receiver;

use crate::foundation::core::{Fps, Rgba8};
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::FrameRGBA;

/// Container/codec combinations, in preference order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VideoMime {
    /// `video/webm;codecs=vp9`
    WebmVp9,
    /// `video/webm;codecs=vp8`
    WebmVp8,
    /// `video/webm`
    Webm,
    /// `video/mp4`
    Mp4,
}

/// Probe order: the first supported entry wins.
pub const PREFERRED_MIME_TYPES: [VideoMime; 4] = [
    VideoMime::WebmVp9,
    VideoMime::WebmVp8,
    VideoMime::Webm,
    VideoMime::Mp4,
];

impl VideoMime {
    /// MIME string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WebmVp9 => "video/webm;codecs=vp9",
            Self::WebmVp8 => "video/webm;codecs=vp8",
            Self::Webm => "video/webm",
            Self::Mp4 => "video/mp4",
        }
    }

    /// File extension including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => ".mp4",
            _ => ".webm",
        }
    }

    /// Parse a MIME string as listed in [`PREFERRED_MIME_TYPES`].
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        PREFERRED_MIME_TYPES
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(&normalized))
    }
}

impl std::fmt::Display for VideoMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asynchronous encoder output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncoderEvent {
    /// A piece of the encoded container. Concatenating all chunks yields the file.
    Chunk(Vec<u8>),
    /// The encoder finished after a stop request. No events follow.
    Stopped,
    /// The encoder failed. No events follow.
    Fault(String),
}

/// Parameters fixed for one encoding run.
#[derive(Clone, Debug, PartialEq)]
pub struct EncoderConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Nominal frame rate.
    pub fps: Fps,
    /// Output format.
    pub mime: VideoMime,
    /// Color that transparent pixels are flattened over.
    pub background: Rgba8,
}

impl EncoderConfig {
    /// Reject configurations no backend can encode.
    pub fn validate(&self) -> PromoResult<()> {
        self.fps.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(PromoError::validation(
                "encoder width/height must be non-zero",
            ));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(PromoError::validation(
                "encoder width/height must be even (required for yuv420p output)",
            ));
        }
        Ok(())
    }

    /// Byte length of one RGBA8 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// A running encoder.
///
/// Frames must be pushed in presentation order. After [`VideoEncoder::request_stop`] the
/// encoder delivers any remaining chunks followed by [`EncoderEvent::Stopped`].
pub trait VideoEncoder: Send {
    /// Encode one frame.
    fn push_frame(&mut self, frame: &FrameRGBA) -> PromoResult<()>;
    /// Ask the encoder to finish. Completion is signalled on the event channel.
    fn request_stop(&mut self) -> PromoResult<()>;
    /// Tear down immediately, discarding pending output. Safe to call more than once.
    fn abort(&mut self);
}

/// Factory for encoders plus the format capability probe.
pub trait EncoderBackend: Send {
    /// First supported entry of [`PREFERRED_MIME_TYPES`], or `None` when recording is unsupported.
    fn probe(&self) -> Option<VideoMime>;
    /// Start encoding. Events arrive on the returned receiver.
    fn start(
        &mut self,
        cfg: &EncoderConfig,
    ) -> PromoResult<(Box<dyn VideoEncoder>, Receiver<EncoderEvent>)>;
}

impl<B: EncoderBackend + ?Sized> EncoderBackend for Box<B> {
    fn probe(&self) -> Option<VideoMime> {
        (**self).probe()
    }

    fn start(
        &mut self,
        cfg: &EncoderConfig,
    ) -> PromoResult<(Box<dyn VideoEncoder>, Receiver<EncoderEvent>)> {
        (**self).start(cfg)
    }
}

/// Flatten premultiplied RGBA8 over an opaque background color.
pub fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg: Rgba8) -> PromoResult<()> {
    use crate::foundation::math::mul_div255_u16;

    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(PromoError::validation(
            "flatten_premul_over_bg expects equal-length rgba8 buffers",
        ));
    }

    let [bg_r, bg_g, bg_b, _] = bg.0.map(u16::from);
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        d[0] = (u16::from(s[0]) + mul_div255_u16(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255_u16(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255_u16(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/encoder.rs"]
mod tests;
