use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::encode::encoder::{
    EncoderBackend, EncoderConfig, EncoderEvent, PREFERRED_MIME_TYPES, VideoEncoder, VideoMime,
};
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::FrameRGBA;

/// Magic bytes opening every in-memory container.
pub const MEMORY_CONTAINER_MAGIC: &[u8; 4] = b"SGVM";

/// In-process encoder backend for tests and dry runs.
///
/// The "container" is a header followed by one little-endian frame fingerprint per frame, so
/// its bytes are a deterministic function of the rendered frames.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    supported: Vec<VideoMime>,
    chunk_every: u32,
    deliver_nothing: bool,
    stall_on_stop: bool,
    fault_after: Option<u32>,
    start_error: Option<String>,
    starts: Arc<AtomicUsize>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            supported: PREFERRED_MIME_TYPES.to_vec(),
            chunk_every: 10,
            deliver_nothing: false,
            stall_on_stop: false,
            fault_after: None,
            start_error: None,
            starts: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl MemoryBackend {
    /// Backend supporting every preferred format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the formats reported by [`EncoderBackend::probe`].
    pub fn with_supported(mut self, supported: Vec<VideoMime>) -> Self {
        self.supported = supported;
        self
    }

    /// Emit a chunk every `frames` frames.
    pub fn with_chunk_every(mut self, frames: u32) -> Self {
        self.chunk_every = frames.max(1);
        self
    }

    /// Never emit chunks; stopping still succeeds.
    pub fn delivering_nothing(mut self) -> Self {
        self.deliver_nothing = true;
        self
    }

    /// Never acknowledge a stop request.
    pub fn stalling_on_stop(mut self) -> Self {
        self.stall_on_stop = true;
        self
    }

    /// Emit a fault event once `frames` frames were pushed.
    pub fn faulting_after(mut self, frames: u32) -> Self {
        self.fault_after = Some(frames);
        self
    }

    /// Make [`EncoderBackend::start`] fail.
    pub fn failing_start(mut self, msg: impl Into<String>) -> Self {
        self.start_error = Some(msg.into());
        self
    }

    /// Shared counter of successful starts.
    pub fn start_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.starts)
    }
}

impl EncoderBackend for MemoryBackend {
    fn probe(&self) -> Option<VideoMime> {
        PREFERRED_MIME_TYPES
            .into_iter()
            .find(|m| self.supported.contains(m))
    }

    fn start(
        &mut self,
        cfg: &EncoderConfig,
    ) -> PromoResult<(Box<dyn VideoEncoder>, Receiver<EncoderEvent>)> {
        cfg.validate()?;
        if let Some(msg) = &self.start_error {
            return Err(PromoError::encode(msg.clone()));
        }
        if !self.supported.contains(&cfg.mime) {
            return Err(PromoError::encode(format!("unsupported format {}", cfg.mime)));
        }
        self.starts.fetch_add(1, Ordering::SeqCst);

        let mut pending = MEMORY_CONTAINER_MAGIC.to_vec();
        pending.extend_from_slice(&cfg.width.to_le_bytes());
        pending.extend_from_slice(&cfg.height.to_le_bytes());
        pending.extend_from_slice(cfg.mime.as_str().as_bytes());
        pending.push(0);

        let (tx, rx) = mpsc::channel();
        Ok((
            Box::new(MemoryEncoder {
                tx: Some(tx),
                pending,
                frames: 0,
                width: cfg.width,
                height: cfg.height,
                chunk_every: self.chunk_every.max(1),
                deliver_nothing: self.deliver_nothing,
                stall_on_stop: self.stall_on_stop,
                fault_after: self.fault_after,
            }),
            rx,
        ))
    }
}

struct MemoryEncoder {
    tx: Option<Sender<EncoderEvent>>,
    pending: Vec<u8>,
    frames: u32,
    width: u32,
    height: u32,
    chunk_every: u32,
    deliver_nothing: bool,
    stall_on_stop: bool,
    fault_after: Option<u32>,
}

impl MemoryEncoder {
    fn send(&self, event: EncoderEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    fn flush(&mut self) {
        if self.deliver_nothing || self.pending.is_empty() {
            self.pending.clear();
            return;
        }
        let chunk = std::mem::take(&mut self.pending);
        self.send(EncoderEvent::Chunk(chunk));
    }
}

impl VideoEncoder for MemoryEncoder {
    fn push_frame(&mut self, frame: &FrameRGBA) -> PromoResult<()> {
        if self.tx.is_none() {
            return Err(PromoError::encode("memory encoder is not running"));
        }
        if frame.width != self.width || frame.height != self.height {
            return Err(PromoError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        self.frames += 1;
        self.pending
            .extend_from_slice(&frame.fingerprint().to_le_bytes());
        if self.fault_after == Some(self.frames) {
            self.send(EncoderEvent::Fault(format!(
                "simulated encoder fault after {} frames",
                self.frames
            )));
            self.tx = None;
            return Ok(());
        }
        if self.frames.is_multiple_of(self.chunk_every) {
            self.flush();
        }
        Ok(())
    }

    fn request_stop(&mut self) -> PromoResult<()> {
        if self.stall_on_stop {
            return Ok(());
        }
        self.flush();
        self.send(EncoderEvent::Stopped);
        self.tx = None;
        Ok(())
    }

    fn abort(&mut self) {
        self.pending.clear();
        self.tx = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/memory.rs"]
mod tests;
