use std::time::Duration;

/// Per-attempt recording state owned by the pipeline.
///
/// `chunks` is append-only until [`CaptureSession::take_blob`] drains it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptureSession {
    /// Clock reading when recording started.
    pub started_at: Option<Duration>,
    chunks: Vec<Vec<u8>>,
    progress_pct: f64,
    /// Frames handed to the encoder.
    pub frames_rendered: u64,
    /// The logo was unavailable and the wordmark was drawn instead.
    pub asset_fallback: bool,
}

impl CaptureSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one encoded chunk. Empty chunks are ignored.
    pub fn append_chunk(&mut self, chunk: Vec<u8>) {
        if !chunk.is_empty() {
            self.chunks.push(chunk);
        }
    }

    /// Number of collected chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total collected bytes.
    pub fn byte_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// Current progress in percent.
    pub fn progress_pct(&self) -> f64 {
        self.progress_pct
    }

    /// Raise progress to `pct`, clamped to `[0, 100]`. Never lowers it.
    ///
    /// Returns the stored value.
    pub fn set_progress(&mut self, pct: f64) -> f64 {
        if pct.is_finite() {
            self.progress_pct = self.progress_pct.max(pct.clamp(0.0, 100.0));
        }
        self.progress_pct
    }

    /// Concatenate and drain all chunks. `None` when nothing was collected.
    pub fn take_blob(&mut self) -> Option<Vec<u8>> {
        if self.chunks.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.chunks).concat())
    }

    /// Drop partial output and reset to an empty session.
    pub fn discard(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
