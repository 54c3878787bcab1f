//! CPU drawing surface the scene renderers paint onto.
//!
//! The surface is the only writer of its pixmap. A frame is produced by
//! [`Surface::begin_frame`], any number of draw calls, then [`Surface::end_frame`].

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape as _;

use crate::assets::logo::LogoImage;
use crate::assets::text::{FontFace, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{PromoError, PromoResult};
use crate::foundation::math::{mul_div255_u8, unit_to_u8};
use crate::render::backend::FrameRGBA;

const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextKey {
    text: String,
    size_bits: u32,
    brush: TextBrushRgba8,
}

struct TextPainter {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
    layouts: HashMap<TextKey, parley::Layout<TextBrushRgba8>>,
}

/// Raster surface backed by `vello_cpu`.
pub struct Surface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    text: Option<TextPainter>,
    logo_paint: Option<(Arc<LogoImage>, vello_cpu::Image)>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("canvas", &self.canvas)
            .field("text", &self.text.is_some())
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a surface. Without a font, text draw calls are no-ops.
    pub fn new(canvas: Canvas, font: Option<&FontFace>) -> PromoResult<Self> {
        canvas.validate()?;
        let (w, h) = canvas_u16(canvas)?;

        let text = match font {
            Some(face) => {
                let engine = TextLayoutEngine::new(&face.bytes)?;
                tracing::debug!(
                    family = engine.family_name(),
                    font = %face.path.display(),
                    "text enabled"
                );
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
                    0,
                );
                Some(TextPainter {
                    engine,
                    font,
                    layouts: HashMap::new(),
                })
            }
            None => None,
        };

        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            text,
            logo_paint: None,
        })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Whether a font is loaded.
    pub fn text_available(&self) -> bool {
        self.text.is_some()
    }

    /// Start a new frame filled with `background`.
    pub fn begin_frame(&mut self, background: Rgba8) {
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.fill_rect(
            Rect::new(
                0.0,
                0.0,
                f64::from(self.canvas.width),
                f64::from(self.canvas.height),
            ),
            background,
            1.0,
        );
    }

    /// Rasterize all pending draw calls into the pixmap.
    pub fn end_frame(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Copy out the current pixmap.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8, opacity: f64) {
        self.fill_path(&rect.to_path(PATH_TOLERANCE), color, opacity);
    }

    /// Fill a rounded "card" rectangle.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8, opacity: f64) {
        let shape = kurbo::RoundedRect::from_rect(rect, radius.max(0.0));
        self.fill_path(&shape.to_path(PATH_TOLERANCE), color, opacity);
    }

    /// Outline a rounded rectangle.
    pub fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        width: f64,
        color: Rgba8,
        opacity: f64,
    ) {
        if width <= 0.0 {
            return;
        }
        let shape = kurbo::RoundedRect::from_rect(rect, radius.max(0.0));
        let outline = kurbo::stroke(
            shape.path_elements(PATH_TOLERANCE),
            &kurbo::Stroke::new(width),
            &kurbo::StrokeOpts::default(),
            PATH_TOLERANCE,
        );
        self.fill_path(&outline, color, opacity);
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8, opacity: f64) {
        if radius <= 0.0 {
            return;
        }
        let shape = kurbo::Circle::new(center, radius);
        self.fill_path(&shape.to_path(PATH_TOLERANCE), color, opacity);
    }

    /// Fill an arbitrary path in pixel space.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8, opacity: f64) {
        let [r, g, b, a] = color.0;
        let alpha = mul_div255_u8(u16::from(a), u16::from(unit_to_u8(opacity)));
        if alpha == 0 {
            return;
        }
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, alpha));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Blit `logo` stretched into `dest`.
    pub fn draw_image(
        &mut self,
        logo: &Arc<LogoImage>,
        dest: Rect,
        opacity: f64,
    ) -> PromoResult<()> {
        let opacity = opacity.clamp(0.0, 1.0) as f32;
        if opacity <= 0.0 || dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.logo_paint_for(logo)?;
        let (w, h) = (f64::from(logo.width), f64::from(logo.height));
        let transform = Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / w, dest.height() / h);

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    /// Measure a single line of text as `(width, height)` in pixels.
    ///
    /// Returns `None` when no font is loaded.
    pub fn measure_text(&mut self, text: &str, size_px: f64) -> PromoResult<Option<(f64, f64)>> {
        let Some(painter) = self.text.as_mut() else {
            return Ok(None);
        };
        let key = TextKey {
            text: text.to_string(),
            size_bits: (size_px as f32).to_bits(),
            brush: TextBrushRgba8::default(),
        };
        let layout = painter.layout_for(&key)?;
        Ok(Some((f64::from(layout.width()), f64::from(layout.height()))))
    }

    /// Draw a single line of text centered on `center`.
    pub fn draw_text(
        &mut self,
        text: &str,
        size_px: f64,
        color: Rgba8,
        center: Point,
        opacity: f64,
    ) -> PromoResult<()> {
        let opacity = opacity.clamp(0.0, 1.0) as f32;
        if opacity <= 0.0 || text.is_empty() {
            return Ok(());
        }
        let Some(painter) = self.text.as_mut() else {
            return Ok(());
        };

        let [r, g, b, a] = color.0;
        let key = TextKey {
            text: text.to_string(),
            size_bits: (size_px as f32).to_bits(),
            brush: TextBrushRgba8 { r, g, b, a },
        };
        painter.ensure_layout(&key)?;
        let layout = painter
            .layouts
            .get(&key)
            .ok_or_else(|| PromoError::evaluation("text layout cache miss"))?;
        let origin = Affine::translate((
            center.x - f64::from(layout.width()) / 2.0,
            center.y - f64::from(layout.height()) / 2.0,
        ));

        let ctx = &mut self.ctx;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(origin));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&painter.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn logo_paint_for(&mut self, logo: &Arc<LogoImage>) -> PromoResult<vello_cpu::Image> {
        if let Some((cached, paint)) = &self.logo_paint
            && Arc::ptr_eq(cached, logo)
        {
            return Ok(paint.clone());
        }
        let pixmap = image_premul_bytes_to_pixmap(&logo.rgba8_premul, logo.width, logo.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.logo_paint = Some((logo.clone(), paint.clone()));
        Ok(paint)
    }
}

impl TextPainter {
    fn ensure_layout(&mut self, key: &TextKey) -> PromoResult<()> {
        if !self.layouts.contains_key(key) {
            let layout =
                self.engine
                    .layout_line(&key.text, f32::from_bits(key.size_bits), key.brush)?;
            self.layouts.insert(key.clone(), layout);
        }
        Ok(())
    }

    fn layout_for(&mut self, key: &TextKey) -> PromoResult<&parley::Layout<TextBrushRgba8>> {
        self.ensure_layout(key)?;
        self.layouts
            .get(key)
            .ok_or_else(|| PromoError::evaluation("text layout cache miss"))
    }
}

fn canvas_u16(canvas: Canvas) -> PromoResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PromoError::validation("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PromoError::validation("surface height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PromoResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PromoError::asset("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PromoError::asset("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PromoError::asset("logo image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
