//! Generic scene renderer.
//!
//! Every function here is a pure function of its inputs: the same script, assets and
//! playback position always paint the same pixels, regardless of call order.

use std::f64::consts::TAU;

use crate::animation::ease::{Ease, clamp01, ease_out_cubic, lerp, progress};
use crate::assets::logo::RenderAssets;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::PromoResult;
use crate::render::surface::Surface;
use crate::scene::script::{Directive, Motion, RelRect, SceneScript};
use crate::timeline::model::{Phase, PlaybackPosition};

const GLOW_RINGS: u32 = 6;
const GLOW_PERIOD_MS: f64 = 1_600.0;
const CHIP_PULSE_PERIOD_MS: f64 = 900.0;

/// Visibility of a directive at the given phase position, in `[0, 1]`.
///
/// `in` eases up from 0 once `delay_ms` has passed, `hold` is fully visible and `out`
/// fades with an inverted ease-out.
pub fn phase_envelope(
    phase: Phase,
    elapsed_ms: f64,
    duration_ms: f64,
    delay_ms: f64,
    ease: Ease,
) -> f64 {
    match phase {
        Phase::In => {
            let delay = delay_ms.max(0.0);
            if elapsed_ms < delay {
                return 0.0;
            }
            let span = (duration_ms - delay).max(0.0);
            ease.apply(progress(elapsed_ms - delay, span))
        }
        Phase::Hold => 1.0,
        Phase::Out => 1.0 - ease_out_cubic(progress(elapsed_ms, duration_ms)),
    }
}

/// Smooth oscillation in `[0, 1]` that starts at 0 and peaks every `period_ms`.
pub fn hold_pulse(elapsed_ms: f64, period_ms: f64) -> f64 {
    if !(period_ms > 0.0) || !elapsed_ms.is_finite() {
        return 0.0;
    }
    0.5 - 0.5 * (TAU * elapsed_ms / period_ms).cos()
}

/// Geometry derived from an envelope value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct MotionFrame {
    pub(crate) opacity: f64,
    pub(crate) offset: Vec2,
    pub(crate) scale: f64,
}

impl MotionFrame {
    pub(crate) fn of(motion: Motion, v: f64, canvas: Canvas) -> Self {
        let v = clamp01(v);
        let rest = 1.0 - v;
        let (offset, scale) = match motion {
            Motion::Fade => (Vec2::ZERO, 1.0),
            Motion::Rise => (Vec2::new(0.0, rest * 0.05 * canvas.min_side()), 1.0),
            Motion::Scale => (Vec2::ZERO, lerp(0.8, 1.0, v)),
            Motion::SlideLeft => (Vec2::new(rest * 0.08 * f64::from(canvas.width), 0.0), 1.0),
        };
        Self {
            opacity: v,
            offset,
            scale,
        }
    }
}

fn envelope(pos: &PlaybackPosition, delay_ms: f64, ease: Ease) -> f64 {
    phase_envelope(
        pos.phase,
        pos.phase_elapsed_ms,
        pos.phase_duration_ms,
        delay_ms,
        ease,
    )
}

fn hold_elapsed(pos: &PlaybackPosition) -> Option<f64> {
    (pos.phase == Phase::Hold).then_some(pos.phase_elapsed_ms)
}

fn scale_about_center(rect: Rect, scale: f64) -> Rect {
    let c = rect.center();
    let (hw, hh) = (rect.width() * scale / 2.0, rect.height() * scale / 2.0);
    Rect::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh)
}

/// Paint one scene script at `pos`.
pub fn render_scene(
    surface: &mut Surface,
    script: &SceneScript,
    assets: &RenderAssets,
    pos: &PlaybackPosition,
) -> PromoResult<()> {
    for directive in &script.directives {
        draw_directive(surface, directive, assets, pos)?;
    }
    Ok(())
}

fn draw_directive(
    surface: &mut Surface,
    directive: &Directive,
    assets: &RenderAssets,
    pos: &PlaybackPosition,
) -> PromoResult<()> {
    let canvas = surface.canvas();
    let unit = canvas.min_side();
    match directive {
        Directive::Logo {
            center,
            size,
            glow,
            accent,
            wordmark,
            delay_ms,
        } => {
            let v = envelope(pos, *delay_ms, Ease::OutCubic);
            let scale = lerp(0.6, 1.0, v);
            draw_logo(
                surface,
                assets,
                LogoParams {
                    center: canvas.at(*center),
                    side: size * unit * scale,
                    opacity: v,
                    glow: *glow,
                    pulse: hold_elapsed(pos)
                        .map(|t| hold_pulse(t, GLOW_PERIOD_MS))
                        .unwrap_or(0.0),
                    accent: *accent,
                    wordmark,
                },
            )
        }
        Directive::Text {
            text,
            center,
            size,
            color,
            motion,
            delay_ms,
            ease,
        } => {
            let m = MotionFrame::of(*motion, envelope(pos, *delay_ms, *ease), canvas);
            let at = canvas.at(*center) + m.offset;
            surface.draw_text(text, size * unit * m.scale, *color, at, m.opacity)
        }
        Directive::Panel {
            rect,
            radius,
            color,
            border,
            motion,
            delay_ms,
        } => {
            let m = MotionFrame::of(*motion, envelope(pos, *delay_ms, Ease::OutCubic), canvas);
            let px = scale_about_center(rect.to_px(canvas), m.scale) + m.offset;
            let r = radius * unit * m.scale;
            surface.fill_rounded_rect(px, r, *color, m.opacity);
            if let Some(border) = border {
                surface.stroke_rounded_rect(px, r, (unit * 0.003).max(1.0), *border, m.opacity);
            }
            Ok(())
        }
        Directive::Bar {
            center,
            width,
            height,
            color,
            delay_ms,
        } => {
            let v = envelope(pos, *delay_ms, Ease::InOutCubic);
            let c = canvas.at(*center);
            let w = width * f64::from(canvas.width) * v;
            let h = height * unit;
            let rect = Rect::new(c.x - w / 2.0, c.y - h / 2.0, c.x + w / 2.0, c.y + h / 2.0);
            surface.fill_rounded_rect(rect, h / 2.0, *color, v.min(1.0));
            Ok(())
        }
        Directive::Chips {
            labels,
            center_y,
            size,
            per_row,
            cycle_ms,
            stagger_ms,
            color,
            text_color,
            accent,
        } => draw_chips(
            surface,
            pos,
            ChipParams {
                labels,
                center_y: *center_y,
                font_px: size * unit,
                per_row: *per_row,
                cycle_ms: *cycle_ms,
                stagger_ms: *stagger_ms,
                color: *color,
                text_color: *text_color,
                accent: *accent,
            },
        ),
    }
}

struct LogoParams<'a> {
    center: Point,
    side: f64,
    opacity: f64,
    glow: bool,
    pulse: f64,
    accent: Rgba8,
    wordmark: &'a str,
}

fn draw_logo(surface: &mut Surface, assets: &RenderAssets, p: LogoParams<'_>) -> PromoResult<()> {
    if p.opacity <= 0.0 || p.side <= 0.0 {
        return Ok(());
    }
    let half = p.side / 2.0;

    if p.glow {
        let grow = 1.0 + 0.06 * p.pulse;
        for ring in (1..=GLOW_RINGS).rev() {
            let radius = half * (1.0 + 0.09 * f64::from(ring)) * grow;
            let strength = 0.10 + 0.05 * p.pulse;
            surface.fill_circle(p.center, radius, p.accent, p.opacity * strength);
        }
    }

    match assets.logo.as_ref() {
        Some(logo) if logo.width > 0 && logo.height > 0 => {
            let (lw, lh) = (f64::from(logo.width), f64::from(logo.height));
            let k = p.side / lw.max(lh);
            let (w, h) = (lw * k, lh * k);
            let dest = Rect::new(
                p.center.x - w / 2.0,
                p.center.y - h / 2.0,
                p.center.x + w / 2.0,
                p.center.y + h / 2.0,
            );
            surface.draw_image(logo, dest, p.opacity)
        }
        _ => {
            let badge = Rect::new(
                p.center.x - half,
                p.center.y - half * 0.45,
                p.center.x + half,
                p.center.y + half * 0.45,
            );
            surface.fill_rounded_rect(badge, half * 0.2, p.accent, p.opacity);
            surface.draw_text(
                p.wordmark,
                p.side * 0.16,
                Rgba8::rgb(255, 255, 255),
                p.center,
                p.opacity,
            )
        }
    }
}

struct ChipParams<'a> {
    labels: &'a [String],
    center_y: f64,
    font_px: f64,
    per_row: usize,
    cycle_ms: f64,
    stagger_ms: f64,
    color: Rgba8,
    text_color: Rgba8,
    accent: Rgba8,
}

fn chip_width(surface: &mut Surface, label: &str, font_px: f64) -> PromoResult<f64> {
    let text_w = match surface.measure_text(label, font_px)? {
        Some((w, _)) => w,
        None => label.chars().count() as f64 * font_px * 0.58,
    };
    Ok(text_w + font_px * 1.6)
}

/// Index of the highlighted chip, if any.
pub(crate) fn highlighted_chip(
    pos: &PlaybackPosition,
    count: usize,
    cycle_ms: f64,
) -> Option<usize> {
    let t = hold_elapsed(pos)?;
    if count == 0 || !(cycle_ms > 0.0) {
        return None;
    }
    Some(((t / cycle_ms).floor() as usize) % count)
}

fn draw_chips(surface: &mut Surface, pos: &PlaybackPosition, p: ChipParams<'_>) -> PromoResult<()> {
    let canvas = surface.canvas();
    let per_row = p.per_row.max(1);
    let chip_h = p.font_px * 1.9;
    let gap = p.font_px * 0.6;
    let rows = p.labels.len().div_ceil(per_row);
    let block_h = rows as f64 * chip_h + rows.saturating_sub(1) as f64 * gap;
    let top = p.center_y * f64::from(canvas.height) - block_h / 2.0;
    let active = highlighted_chip(pos, p.labels.len(), p.cycle_ms);
    let pulse = hold_elapsed(pos)
        .map(|t| hold_pulse(t, CHIP_PULSE_PERIOD_MS))
        .unwrap_or(0.0);

    for (row, chunk) in p.labels.chunks(per_row).enumerate() {
        let mut widths = Vec::with_capacity(chunk.len());
        for label in chunk {
            widths.push(chip_width(surface, label, p.font_px)?);
        }
        let row_w = widths.iter().sum::<f64>() + gap * chunk.len().saturating_sub(1) as f64;
        let y = top + row as f64 * (chip_h + gap);
        let mut x = (f64::from(canvas.width) - row_w) / 2.0;

        for (col, (label, w)) in chunk.iter().zip(widths).enumerate() {
            let index = row * per_row + col;
            let delay = p.stagger_ms * index as f64;
            let m = MotionFrame::of(
                Motion::Rise,
                envelope(pos, delay, Ease::OutCubic),
                canvas,
            );
            let mut rect = Rect::new(x, y, x + w, y + chip_h) + m.offset;
            let fill = if active == Some(index) {
                rect = scale_about_center(rect, 1.0 + 0.05 * pulse);
                p.accent
            } else {
                p.color
            };
            surface.fill_rounded_rect(rect, chip_h / 2.0, fill, m.opacity);
            surface.draw_text(label, p.font_px, p.text_color, rect.center(), m.opacity)?;
            x += w + gap;
        }
    }
    Ok(())
}

/// Relative rectangle centered on `center`.
pub(crate) fn rel_rect_centered(center: Vec2, w: f64, h: f64) -> RelRect {
    RelRect::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/draw.rs"]
mod tests;
