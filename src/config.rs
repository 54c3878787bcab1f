//! JSON configuration for the renderer and the capture pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::assets::logo::LogoSource;
use crate::capture::pipeline::CaptureOptions;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::compositor::{Compositor, FrameStyle};
use crate::scene::catalog::smartygym_scripts;
use crate::scene::script::SceneScript;
use crate::timeline::model::SceneTimeline;

/// Renderer configuration. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromoConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Capture frame rate.
    pub fps: Fps,
    /// Background and footer.
    pub style: FrameStyle,
    /// Brand logo (PNG, JPEG, WebP or SVG).
    pub logo_path: Option<PathBuf>,
    /// Font for all text; system fonts are searched when unset.
    pub font_path: Option<PathBuf>,
    /// Longest wait for the logo before using the wordmark.
    pub asset_timeout_ms: u64,
    /// Longest wait for the encoder to finish after the last frame.
    pub finalize_timeout_ms: u64,
    /// Default download label.
    pub label: String,
    /// Replaces the built-in scene schedule.
    pub timeline: Option<SceneTimeline>,
    /// Replaces the built-in scenes; must match the timeline length.
    pub scenes: Option<Vec<SceneScript>>,
}

impl Default for PromoConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            style: FrameStyle::default(),
            logo_path: None,
            font_path: None,
            asset_timeout_ms: 3_000,
            finalize_timeout_ms: 30_000,
            label: "promo".to_string(),
            timeline: None,
            scenes: None,
        }
    }
}

impl PromoConfig {
    /// Parse configuration JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> PromoResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| PromoError::serde(format!("parse config JSON: {e}")))
    }

    /// Load a JSON file. Relative asset paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> PromoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PromoError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let Some(root) = path.parent() {
            cfg.rebase_paths(root);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    fn rebase_paths(&mut self, root: &Path) {
        for p in [&mut self.logo_path, &mut self.font_path].into_iter().flatten() {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        }
    }

    /// Check every value, including that scenes and timeline agree.
    pub fn validate(&self) -> PromoResult<()> {
        self.canvas.validate()?;
        self.fps.validate()?;
        if self.asset_timeout_ms == 0 {
            return Err(PromoError::validation("asset_timeout_ms must be > 0"));
        }
        if self.finalize_timeout_ms == 0 {
            return Err(PromoError::validation("finalize_timeout_ms must be > 0"));
        }
        self.compositor().map(|_| ())
    }

    /// Configured or built-in schedule.
    pub fn timeline(&self) -> SceneTimeline {
        self.timeline.clone().unwrap_or_else(SceneTimeline::smartygym)
    }

    /// Configured or built-in scenes.
    pub fn scripts(&self) -> Vec<SceneScript> {
        self.scenes.clone().unwrap_or_else(smartygym_scripts)
    }

    /// Frame styling.
    pub fn frame_style(&self) -> FrameStyle {
        self.style.clone()
    }

    /// Compositor for the configured timeline and scenes.
    pub fn compositor(&self) -> PromoResult<Compositor> {
        Compositor::new(self.timeline(), self.scripts(), self.frame_style())
    }

    /// Logo source for the capture pipeline.
    pub fn logo_source(&self) -> LogoSource {
        self.logo_path
            .clone()
            .map_or(LogoSource::None, LogoSource::Path)
    }

    /// Capture pipeline options.
    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            fps: self.fps,
            logo: self.logo_source(),
            asset_timeout: Duration::from_millis(self.asset_timeout_ms),
            finalize_timeout: Duration::from_millis(self.finalize_timeout_ms),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
