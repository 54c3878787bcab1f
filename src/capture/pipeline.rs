use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::{Duration, Instant};

use crate::assets::logo::{LogoLoad, LogoSource, RenderAssets, load_logo_cancellable};
use crate::capture::artifact::{ArtifactRegistry, GeneratedArtifact, artifact_file_name};
use crate::capture::clock::FrameClock;
use crate::capture::error::CaptureFailure;
use crate::capture::observer::CaptureObserver;
use crate::capture::session::CaptureSession;
use crate::capture::state::CaptureState;
use crate::encode::encoder::{EncoderBackend, EncoderConfig, EncoderEvent, VideoEncoder, VideoMime};
use crate::foundation::core::Fps;
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::FrameRGBA;
use crate::render::compositor::Compositor;
use crate::render::surface::Surface;

const EVENT_POLL: Duration = Duration::from_millis(10);

/// Knobs for a [`CapturePipeline`].
#[derive(Clone, Debug)]
pub struct CaptureOptions {
    /// Frame rate handed to the encoder.
    pub fps: Fps,
    /// Brand logo, loaded during priming.
    pub logo: LogoSource,
    /// Longest wait for the logo before falling back to the wordmark.
    pub asset_timeout: Duration,
    /// Longest wait for the encoder to confirm it stopped.
    pub finalize_timeout: Duration,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            logo: LogoSource::None,
            asset_timeout: Duration::from_millis(3_000),
            finalize_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared flag asking a running capture to stop.
///
/// Checked before every frame and while waiting for assets or the encoder.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Snapshot of what the UI shell should show.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptureStatus {
    /// Current state.
    pub state: CaptureState,
    /// Status line, if any.
    pub message: Option<String>,
    /// Progress of the current or last attempt.
    pub progress_pct: f64,
    /// Whether the generate control is enabled.
    pub can_generate: bool,
    /// Whether a retry control should be offered.
    pub can_retry: bool,
}

/// Explicit capture state machine: renders the timeline into an encoder and publishes the
/// result as a [`GeneratedArtifact`].
pub struct CapturePipeline {
    compositor: Compositor,
    surface: Surface,
    backend: Box<dyn EncoderBackend>,
    clock: Box<dyn FrameClock>,
    opts: CaptureOptions,

    assets: RenderAssets,
    registry: ArtifactRegistry,
    state: CaptureState,
    session: CaptureSession,
    artifact: Option<GeneratedArtifact>,
    message: Option<String>,
    last_failure: Option<CaptureFailure>,
    capability: Option<Option<VideoMime>>,
    cancel: CancelHandle,
    encoder: Option<Box<dyn VideoEncoder>>,
    events: Option<Receiver<EncoderEvent>>,
}

impl std::fmt::Debug for CapturePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturePipeline")
            .field("state", &self.state)
            .field("session", &self.session)
            .field("artifact", &self.artifact.as_ref().map(|a| &a.url))
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

impl CapturePipeline {
    /// Assemble a pipeline in the `Idle` state.
    pub fn new(
        compositor: Compositor,
        surface: Surface,
        backend: impl EncoderBackend + 'static,
        clock: impl FrameClock + 'static,
        opts: CaptureOptions,
    ) -> Self {
        Self {
            compositor,
            surface,
            backend: Box::new(backend),
            clock: Box::new(clock),
            opts,
            assets: RenderAssets::default(),
            registry: ArtifactRegistry::new(),
            state: CaptureState::Idle,
            session: CaptureSession::new(),
            artifact: None,
            message: None,
            last_failure: None,
            capability: None,
            cancel: CancelHandle::default(),
            encoder: None,
            events: None,
        }
    }

    /// Preferred supported format. Probed once, then cached.
    pub fn capability(&mut self) -> Option<VideoMime> {
        *self.capability.get_or_insert_with(|| {
            let mime = self.backend.probe();
            match mime {
                Some(m) => tracing::info!(mime = %m, "video recording supported"),
                None => tracing::warn!("no supported video format"),
            }
            mime
        })
    }

    /// Handle for cancelling from another thread or an observer.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Current state.
    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Current attempt's bookkeeping.
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// Finished video, while its reference is live.
    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        self.artifact.as_ref()
    }

    /// Live artifact references.
    pub fn registry(&self) -> &ArtifactRegistry {
        &self.registry
    }

    /// What the UI shell should show.
    pub fn status(&self) -> CaptureStatus {
        let supported = !matches!(self.capability, Some(None));
        CaptureStatus {
            state: self.state,
            message: self.message.clone(),
            progress_pct: self.session.progress_pct(),
            can_generate: supported && self.state.can_generate(),
            can_retry: supported
                && (self.state == CaptureState::Failed
                    || self
                        .last_failure
                        .as_ref()
                        .is_some_and(CaptureFailure::is_retryable)),
        }
    }

    /// Static preview at time zero.
    pub fn preview_frame(&mut self) -> PromoResult<FrameRGBA> {
        if self.state.is_active() {
            return Err(PromoError::validation(
                "preview is unavailable while a capture is running",
            ));
        }
        self.compositor
            .render_frame(&mut self.surface, &self.assets, 0.0)
    }

    /// Render the whole timeline into a video.
    ///
    /// Any failure leaves the pipeline in `Idle` or `Failed` with no encoder running and no
    /// partial chunks kept.
    #[tracing::instrument(skip(self, observer))]
    pub fn generate(
        &mut self,
        label: &str,
        observer: &mut dyn CaptureObserver,
    ) -> PromoResult<GeneratedArtifact> {
        if self.state.is_active() {
            return Err(PromoError::validation("a capture is already running"));
        }
        let Some(mime) = self.capability() else {
            let failure = CaptureFailure::UnsupportedEnvironment;
            self.message = Some(failure.user_message().to_string());
            self.last_failure = Some(failure.clone());
            return Err(failure.into());
        };

        self.cancel.reset();
        self.message = None;
        self.last_failure = None;
        match self.run(label, mime, observer) {
            Ok(artifact) => {
                tracing::info!(
                    url = %artifact.url,
                    bytes = artifact.bytes.len(),
                    frames = self.session.frames_rendered,
                    "capture complete"
                );
                Ok(artifact)
            }
            Err(failure) => Err(self.fail(failure, observer).into()),
        }
    }

    /// Force to `Idle`: stop the loop, abort the encoder, drop partial output and release the
    /// current artifact. Safe in every state.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.teardown();
        self.release_artifact();
        self.session.discard();
        self.state = CaptureState::Idle;
        self.message = None;
        tracing::debug!("capture reset to idle");
    }

    /// Reset after a failed or finished attempt so `generate` can run again.
    pub fn retry(&mut self) {
        self.cancel();
        self.last_failure = None;
    }

    /// The UI shell closed; same as [`CapturePipeline::cancel`].
    pub fn close(&mut self) {
        self.cancel();
    }

    fn run(
        &mut self,
        label: &str,
        mime: VideoMime,
        observer: &mut dyn CaptureObserver,
    ) -> Result<GeneratedArtifact, CaptureFailure> {
        self.enter(CaptureState::Priming, observer);
        self.release_artifact();
        self.session.discard();
        self.check_cancel()?;
        self.prime_assets()?;

        let canvas = self.surface.canvas();
        let cfg = EncoderConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.opts.fps,
            mime,
            background: self.compositor.style().background,
        };
        let (encoder, events) = self
            .backend
            .start(&cfg)
            .map_err(|e| CaptureFailure::EncoderFault(e.to_string()))?;
        self.encoder = Some(encoder);
        self.events = Some(events);

        self.enter(CaptureState::Recording, observer);
        self.record(observer)?;

        self.enter(CaptureState::Finalizing, observer);
        self.encoder_mut()?
            .request_stop()
            .map_err(|e| CaptureFailure::EncoderFault(e.to_string()))?;
        self.await_stop()?;
        self.teardown();

        let blob = self.session.take_blob().ok_or(CaptureFailure::EmptyCapture)?;
        let artifact = self
            .registry
            .register(blob, mime, artifact_file_name(label, mime));
        self.artifact = Some(artifact.clone());
        self.report_progress(100.0, observer);
        self.enter(CaptureState::Complete, observer);
        Ok(artifact)
    }

    fn prime_assets(&mut self) -> Result<(), CaptureFailure> {
        let cancel = self.cancel.clone();
        let load = load_logo_cancellable(&self.opts.logo, self.opts.asset_timeout, || {
            cancel.is_cancelled()
        })
        .ok_or(CaptureFailure::Cancelled)?;

        self.session.asset_fallback = !matches!(load, LogoLoad::Ready(_) | LogoLoad::Absent);
        if matches!(load, LogoLoad::TimedOut) {
            let note = CaptureFailure::AssetLoadTimeout;
            tracing::warn!(%note, "recording with wordmark");
            self.message = Some(note.user_message().to_string());
        }
        self.assets = RenderAssets { logo: load.image() };
        self.check_cancel()
    }

    fn record(&mut self, observer: &mut dyn CaptureObserver) -> Result<(), CaptureFailure> {
        let total_ms = self.compositor.duration_ms() as f64;
        let start = self.clock.now();
        self.session.started_at = Some(start);

        loop {
            self.check_cancel()?;
            let elapsed_ms = self.clock.now().saturating_sub(start).as_secs_f64() * 1000.0;

            self.compositor
                .draw_frame(&mut self.surface, &self.assets, elapsed_ms)
                .map_err(|e| CaptureFailure::EncoderFault(format!("frame render failed: {e}")))?;
            let frame = self.surface.snapshot();
            self.encoder_mut()?
                .push_frame(&frame)
                .map_err(|e| CaptureFailure::EncoderFault(e.to_string()))?;
            self.session.frames_rendered += 1;

            if self.drain_events()? {
                return Err(CaptureFailure::EncoderFault(
                    "encoder stopped before recording finished".to_string(),
                ));
            }
            self.report_progress((elapsed_ms / total_ms).min(1.0) * 100.0, observer);

            if elapsed_ms >= total_ms {
                return Ok(());
            }
            self.clock.wait_next_frame();
        }
    }

    /// Collect available events without blocking. Returns `true` once the encoder stopped.
    fn drain_events(&mut self) -> Result<bool, CaptureFailure> {
        let Some(events) = self.events.as_ref() else {
            return Err(CaptureFailure::EncoderFault("encoder is not running".to_string()));
        };
        loop {
            match events.try_recv() {
                Ok(EncoderEvent::Chunk(chunk)) => self.session.append_chunk(chunk),
                Ok(EncoderEvent::Stopped) => return Ok(true),
                Ok(EncoderEvent::Fault(msg)) => return Err(CaptureFailure::EncoderFault(msg)),
                Err(TryRecvError::Empty) => return Ok(false),
                Err(TryRecvError::Disconnected) => {
                    return Err(CaptureFailure::EncoderFault(
                        "encoder closed its event channel".to_string(),
                    ));
                }
            }
        }
    }

    fn await_stop(&mut self) -> Result<(), CaptureFailure> {
        let deadline = Instant::now() + self.opts.finalize_timeout;
        loop {
            self.check_cancel()?;
            let Some(events) = self.events.as_ref() else {
                return Err(CaptureFailure::EncoderFault("encoder is not running".to_string()));
            };
            match events.recv_timeout(EVENT_POLL) {
                Ok(EncoderEvent::Chunk(chunk)) => self.session.append_chunk(chunk),
                Ok(EncoderEvent::Stopped) => return Ok(()),
                Ok(EncoderEvent::Fault(msg)) => return Err(CaptureFailure::EncoderFault(msg)),
                Err(RecvTimeoutError::Timeout) => {
                    if Instant::now() >= deadline {
                        return Err(CaptureFailure::EncoderFault(format!(
                            "encoder did not stop within {:?}",
                            self.opts.finalize_timeout
                        )));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(CaptureFailure::EncoderFault(
                        "encoder exited without confirming stop".to_string(),
                    ));
                }
            }
        }
    }

    fn fail(
        &mut self,
        failure: CaptureFailure,
        observer: &mut dyn CaptureObserver,
    ) -> CaptureFailure {
        self.teardown();
        self.session.discard();
        self.release_artifact();

        let next = match failure {
            CaptureFailure::EmptyCapture => CaptureState::Failed,
            _ => CaptureState::Idle,
        };
        match &failure {
            CaptureFailure::Cancelled => {
                tracing::info!("capture cancelled");
                self.message = None;
            }
            other => {
                tracing::warn!(error = %other, state = %self.state, "capture failed");
                self.message = Some(other.user_message().to_string());
                self.last_failure = Some(other.clone());
            }
        }
        self.enter(next, observer);
        failure
    }

    fn enter(&mut self, state: CaptureState, observer: &mut dyn CaptureObserver) {
        tracing::debug!(from = %self.state, to = %state, "capture state");
        self.state = state;
        observer.on_state(state);
    }

    fn report_progress(&mut self, pct: f64, observer: &mut dyn CaptureObserver) {
        let before = self.session.progress_pct();
        let after = self.session.set_progress(pct);
        if after > before {
            observer.on_progress(after);
        }
    }

    fn check_cancel(&self) -> Result<(), CaptureFailure> {
        if self.cancel.is_cancelled() {
            Err(CaptureFailure::Cancelled)
        } else {
            Ok(())
        }
    }

    fn encoder_mut(&mut self) -> Result<&mut Box<dyn VideoEncoder>, CaptureFailure> {
        self.encoder
            .as_mut()
            .ok_or_else(|| CaptureFailure::EncoderFault("encoder is not running".to_string()))
    }

    fn teardown(&mut self) {
        if let Some(mut encoder) = self.encoder.take() {
            encoder.abort();
        }
        self.events = None;
    }

    fn release_artifact(&mut self) {
        if let Some(previous) = self.artifact.take() {
            self.registry.revoke(&previous.url);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/pipeline.rs"]
mod tests;
