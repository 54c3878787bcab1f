use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Rect, Rgba8, Vec2};
use crate::foundation::error::{PromoError, PromoResult};

/// Rectangle in canvas-relative units (`0..1` of width and height).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl RelRect {
    /// Construct a relative rectangle.
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Map to pixels on `canvas`.
    pub fn to_px(self, canvas: Canvas) -> Rect {
        let (cw, ch) = (f64::from(canvas.width), f64::from(canvas.height));
        Rect::new(
            self.x * cw,
            self.y * ch,
            (self.x + self.w) * cw,
            (self.y + self.h) * ch,
        )
    }
}

/// How an eased visibility value drives a directive's geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Opacity only.
    #[default]
    Fade,
    /// Fade while rising into place from below.
    Rise,
    /// Fade while growing from 80% to full size.
    Scale,
    /// Fade while sliding in from the right.
    SlideLeft,
}

/// One drawing instruction inside a scene.
///
/// Positions are canvas-relative; sizes are fractions of the shorter canvas side.
/// `delay_ms` postpones the directive's entrance within the scene's `in` phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Brand logo with an optional pulsing glow; falls back to a wordmark badge.
    Logo {
        /// Center of the logo.
        center: Vec2,
        /// Longest logo side.
        size: f64,
        /// Draw a pulsing halo behind the logo.
        glow: bool,
        /// Halo and badge color.
        accent: Rgba8,
        /// Text drawn when no logo image is available.
        wordmark: String,
        /// Entrance delay.
        #[serde(default)]
        delay_ms: f64,
    },
    /// One line of text.
    Text {
        /// Line text.
        text: String,
        /// Center of the line.
        center: Vec2,
        /// Font size.
        size: f64,
        /// Fill color.
        color: Rgba8,
        /// Entrance/exit motion.
        #[serde(default)]
        motion: Motion,
        /// Entrance delay.
        #[serde(default)]
        delay_ms: f64,
        /// Entrance curve.
        #[serde(default)]
        ease: Ease,
    },
    /// Rounded card behind other content.
    Panel {
        /// Card bounds.
        rect: RelRect,
        /// Corner radius.
        radius: f64,
        /// Fill color.
        color: Rgba8,
        /// Optional outline color.
        #[serde(default)]
        border: Option<Rgba8>,
        /// Entrance/exit motion.
        #[serde(default)]
        motion: Motion,
        /// Entrance delay.
        #[serde(default)]
        delay_ms: f64,
    },
    /// Accent underline that grows from its center.
    Bar {
        /// Center of the bar.
        center: Vec2,
        /// Full width, relative to canvas width.
        width: f64,
        /// Thickness.
        height: f64,
        /// Fill color.
        color: Rgba8,
        /// Entrance delay.
        #[serde(default)]
        delay_ms: f64,
    },
    /// Rows of rounded label chips with a highlight that rotates while the scene holds.
    Chips {
        /// Chip labels, in order.
        labels: Vec<String>,
        /// Vertical center of the chip block.
        center_y: f64,
        /// Label font size.
        size: f64,
        /// Chips per row.
        per_row: usize,
        /// How long each chip stays highlighted.
        cycle_ms: f64,
        /// Entrance offset between consecutive chips.
        #[serde(default)]
        stagger_ms: f64,
        /// Chip fill.
        color: Rgba8,
        /// Label color.
        text_color: Rgba8,
        /// Highlighted chip fill.
        accent: Rgba8,
    },
}

impl Directive {
    /// Check geometry and timing values.
    pub fn validate(&self) -> PromoResult<()> {
        let finite_non_neg = |v: f64| v.is_finite() && v >= 0.0;
        let ok = match self {
            Self::Logo { size, delay_ms, .. } => *size > 0.0 && finite_non_neg(*delay_ms),
            Self::Text {
                size,
                delay_ms,
                text,
                ..
            } => *size > 0.0 && finite_non_neg(*delay_ms) && !text.is_empty(),
            Self::Panel {
                rect,
                radius,
                delay_ms,
                ..
            } => {
                rect.w > 0.0
                    && rect.h > 0.0
                    && finite_non_neg(*radius)
                    && finite_non_neg(*delay_ms)
            }
            Self::Bar {
                width,
                height,
                delay_ms,
                ..
            } => *width > 0.0 && *height > 0.0 && finite_non_neg(*delay_ms),
            Self::Chips {
                labels,
                size,
                per_row,
                cycle_ms,
                stagger_ms,
                ..
            } => {
                !labels.is_empty()
                    && *size > 0.0
                    && *per_row > 0
                    && *cycle_ms > 0.0
                    && finite_non_neg(*stagger_ms)
            }
        };
        if ok {
            Ok(())
        } else {
            Err(PromoError::validation(format!(
                "invalid {} directive",
                self.kind_name()
            )))
        }
    }

    /// Short name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Logo { .. } => "logo",
            Self::Text { .. } => "text",
            Self::Panel { .. } => "panel",
            Self::Bar { .. } => "bar",
            Self::Chips { .. } => "chips",
        }
    }
}

/// Content descriptor of one scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneScript {
    /// Human-readable scene name.
    pub name: String,
    /// Directives, drawn in order.
    pub directives: Vec<Directive>,
}

impl SceneScript {
    /// Validate every directive.
    pub fn validate(&self) -> PromoResult<()> {
        for d in &self.directives {
            d.validate()
                .map_err(|e| PromoError::validation(format!("scene '{}': {e}", self.name)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/script.rs"]
mod tests;
