use crate::foundation::error::{PromoError, PromoResult};

/// Longest side, in pixels, used when rasterizing vector logos.
pub const SVG_LOGO_RASTER_PX: u32 = 512;

/// Pick a raster size that keeps the SVG aspect ratio with the longest side at `max_side`.
pub fn svg_raster_size(tree: &usvg::Tree, max_side: u32) -> PromoResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(PromoError::asset("svg has invalid width/height"));
    }
    let scale = max_side as f32 / w.max(h);
    let rw = ((w * scale).round() as u32).max(1);
    let rh = ((h * scale).round() as u32).max(1);
    Ok((rw, rh))
}

/// Rasterize an SVG tree into premultiplied RGBA8 at exactly `width` x `height`.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PromoResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PromoError::asset("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
