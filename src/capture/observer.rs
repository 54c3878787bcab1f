use crate::capture::state::CaptureState;

/// Receives pipeline notifications while [`generate`](crate::CapturePipeline::generate) runs.
pub trait CaptureObserver {
    /// The pipeline entered `state`.
    fn on_state(&mut self, state: CaptureState) {
        let _ = state;
    }
    /// Progress changed. Values are non-decreasing within one attempt.
    fn on_progress(&mut self, pct: f64) {
        let _ = pct;
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl CaptureObserver for NullObserver {}
