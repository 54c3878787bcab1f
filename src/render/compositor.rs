use crate::assets::logo::RenderAssets;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PromoError, PromoResult};
use crate::render::backend::FrameRGBA;
use crate::render::surface::Surface;
use crate::scene::draw::render_scene;
use crate::scene::script::SceneScript;
use crate::timeline::model::SceneTimeline;

/// Frame-wide styling shared by every scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    /// Canvas clear color.
    pub background: Rgba8,
    /// Text drawn at the bottom of every frame.
    pub footer_text: String,
    /// Footer color.
    pub footer_color: Rgba8,
    /// Footer size as a fraction of the shorter canvas side.
    pub footer_size: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(11, 18, 32),
            footer_text: "smartygym.com".to_string(),
            footer_color: Rgba8::rgb(160, 174, 192),
            footer_size: 0.03,
        }
    }
}

/// Composes one frame: background, the active scene, then the footer.
#[derive(Clone, Debug)]
pub struct Compositor {
    timeline: SceneTimeline,
    scripts: Vec<SceneScript>,
    style: FrameStyle,
}

impl Compositor {
    /// Pair a timeline with one script per scene.
    pub fn new(
        timeline: SceneTimeline,
        scripts: Vec<SceneScript>,
        style: FrameStyle,
    ) -> PromoResult<Self> {
        if scripts.len() != timeline.len() {
            return Err(PromoError::validation(format!(
                "timeline has {} scenes but {} scene scripts were provided",
                timeline.len(),
                scripts.len()
            )));
        }
        for script in &scripts {
            script.validate()?;
        }
        if !(style.footer_size > 0.0) {
            return Err(PromoError::validation("footer_size must be > 0"));
        }
        Ok(Self {
            timeline,
            scripts,
            style,
        })
    }

    /// The built-in SmartyGym timeline and scenes.
    pub fn smartygym(style: FrameStyle) -> PromoResult<Self> {
        Self::new(
            SceneTimeline::smartygym(),
            crate::scene::catalog::smartygym_scripts(),
            style,
        )
    }

    /// Scene schedule.
    pub fn timeline(&self) -> &SceneTimeline {
        &self.timeline
    }

    /// Frame styling.
    pub fn style(&self) -> &FrameStyle {
        &self.style
    }

    /// Total video length.
    pub fn duration_ms(&self) -> u64 {
        self.timeline.total_ms()
    }

    /// Paint the frame for `elapsed_ms` onto `surface`.
    pub fn draw_frame(
        &self,
        surface: &mut Surface,
        assets: &RenderAssets,
        elapsed_ms: f64,
    ) -> PromoResult<()> {
        let pos = self.timeline.resolve(elapsed_ms);
        surface.begin_frame(self.style.background);
        let scene = match self.scripts.get(pos.scene_index) {
            Some(script) => render_scene(surface, script, assets, &pos),
            None => {
                tracing::warn!(scene_index = pos.scene_index, "no script for scene");
                Ok(())
            }
        };
        // Footer and flush run even when the scene fails.
        let footer = self.draw_footer(surface);
        surface.end_frame();
        scene.and(footer)
    }

    /// [`Compositor::draw_frame`] followed by a snapshot.
    pub fn render_frame(
        &self,
        surface: &mut Surface,
        assets: &RenderAssets,
        elapsed_ms: f64,
    ) -> PromoResult<FrameRGBA> {
        self.draw_frame(surface, assets, elapsed_ms)?;
        Ok(surface.snapshot())
    }

    fn draw_footer(&self, surface: &mut Surface) -> PromoResult<()> {
        if self.style.footer_text.is_empty() {
            return Ok(());
        }
        let canvas = surface.canvas();
        let size = self.style.footer_size * canvas.min_side();
        let at = kurbo::Point::new(
            f64::from(canvas.width) / 2.0,
            f64::from(canvas.height) - size * 1.6,
        );
        surface.draw_text(&self.style.footer_text, size, self.style.footer_color, at, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
