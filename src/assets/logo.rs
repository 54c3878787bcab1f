//! Brand logo loading.
//!
//! The logo is loaded once per capture session on a worker thread. The caller waits at most a
//! bounded time; on timeout or failure rendering continues with the text wordmark.

use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use anyhow::Context as _;

use crate::assets::decode::{decode_image, looks_like_svg, parse_svg};
use crate::assets::svg_raster::{
    SVG_LOGO_RASTER_PX, rasterize_svg_to_premul_rgba8, svg_raster_size,
};
use crate::foundation::error::{PromoError, PromoResult};

const CANCEL_POLL: Duration = Duration::from_millis(10);

/// Decoded logo pixels (premultiplied RGBA8, row-major).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Where the logo comes from.
#[derive(Clone, Debug, Default)]
pub enum LogoSource {
    /// No logo configured; scenes always draw the wordmark.
    #[default]
    None,
    /// Raster or SVG file on disk.
    Path(PathBuf),
    /// Encoded raster or SVG bytes already in memory.
    Bytes(Arc<[u8]>),
}

/// Outcome of a bounded logo load.
#[derive(Clone, Debug)]
pub enum LogoLoad {
    /// Logo decoded in time.
    Ready(Arc<LogoImage>),
    /// The loader did not answer before the deadline.
    TimedOut,
    /// The loader answered with an error.
    Failed(String),
    /// No source configured.
    Absent,
}

impl LogoLoad {
    /// Logo to render with, if any.
    pub fn image(&self) -> Option<Arc<LogoImage>> {
        match self {
            Self::Ready(img) => Some(img.clone()),
            _ => None,
        }
    }
}

/// Read-only assets shared by every scene renderer for one session.
#[derive(Clone, Debug, Default)]
pub struct RenderAssets {
    /// Brand logo; `None` selects the wordmark fallback.
    pub logo: Option<Arc<LogoImage>>,
}

impl RenderAssets {
    /// Assets with a decoded logo.
    pub fn with_logo(logo: Arc<LogoImage>) -> Self {
        Self { logo: Some(logo) }
    }
}

/// Decode a logo synchronously.
pub fn load_logo(source: &LogoSource) -> PromoResult<Option<LogoImage>> {
    match source {
        LogoSource::None => Ok(None),
        LogoSource::Path(path) => {
            let bytes = read_bytes(path)?;
            decode_logo_bytes(&bytes, path.extension().is_some_and(|e| e == "svg")).map(Some)
        }
        LogoSource::Bytes(bytes) => decode_logo_bytes(bytes, false).map(Some),
    }
}

/// Load a logo on a worker thread, waiting at most `timeout`.
#[tracing::instrument(skip(source))]
pub fn load_logo_with_timeout(source: &LogoSource, timeout: Duration) -> LogoLoad {
    load_logo_cancellable(source, timeout, || false).unwrap_or(LogoLoad::TimedOut)
}

/// Like [`load_logo_with_timeout`], but gives up early once `cancelled` returns `true`.
///
/// Returns `None` when cancelled.
pub fn load_logo_cancellable<C>(
    source: &LogoSource,
    timeout: Duration,
    cancelled: C,
) -> Option<LogoLoad>
where
    C: FnMut() -> bool,
{
    if matches!(source, LogoSource::None) {
        return Some(LogoLoad::Absent);
    }
    let source = source.clone();
    run_until(move || load_logo(&source), timeout, cancelled)
}

/// Run `load` on a worker thread and wait for its answer until `timeout` or `cancelled`.
///
/// A loader that misses the deadline is left to finish on its own; its result is dropped.
fn run_until<F, C>(load: F, timeout: Duration, mut cancelled: C) -> Option<LogoLoad>
where
    F: FnOnce() -> PromoResult<Option<LogoImage>> + Send + 'static,
    C: FnMut() -> bool,
{
    let (tx, rx) = mpsc::sync_channel(1);
    let spawned = std::thread::Builder::new()
        .name("logo-load".to_string())
        .spawn(move || {
            let _ = tx.send(load());
        });
    if let Err(e) = spawned {
        return Some(LogoLoad::Failed(format!("failed to spawn logo loader: {e}")));
    }

    let deadline = Instant::now() + timeout;
    let answer = loop {
        if cancelled() {
            return None;
        }
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining.min(CANCEL_POLL)) {
            Err(mpsc::RecvTimeoutError::Timeout) if !remaining.is_zero() => continue,
            other => break other,
        }
    };

    Some(match answer {
        Ok(Ok(Some(img))) => {
            tracing::debug!(width = img.width, height = img.height, "logo ready");
            LogoLoad::Ready(Arc::new(img))
        }
        Ok(Ok(None)) => LogoLoad::Absent,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "logo failed to load, using wordmark");
            LogoLoad::Failed(e.to_string())
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            tracing::warn!(?timeout, "logo load timed out, using wordmark");
            LogoLoad::TimedOut
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            LogoLoad::Failed("logo loader exited without a result".to_string())
        }
    })
}

fn read_bytes(path: &Path) -> PromoResult<Vec<u8>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read logo '{}'", path.display()))?;
    Ok(bytes)
}

fn decode_logo_bytes(bytes: &[u8], svg_hint: bool) -> PromoResult<LogoImage> {
    if bytes.is_empty() {
        return Err(PromoError::asset("logo bytes are empty"));
    }
    if !(svg_hint || looks_like_svg(bytes)) {
        return decode_image(bytes);
    }

    let tree = parse_svg(bytes)?;
    let (width, height) = svg_raster_size(&tree, SVG_LOGO_RASTER_PX)?;
    let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, width, height)?;
    Ok(LogoImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo.rs"]
mod tests;
