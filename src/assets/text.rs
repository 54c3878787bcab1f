//! Text shaping (Parley) and font discovery.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{PromoError, PromoResult};

/// Font files probed, in order, when no font is configured explicitly.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Raw font file bytes plus where they came from.
#[derive(Clone, Debug)]
pub struct FontFace {
    /// Font file contents.
    pub bytes: Arc<Vec<u8>>,
    /// Origin of the bytes, for diagnostics.
    pub path: PathBuf,
}

impl FontFace {
    /// Read a font file.
    pub fn from_path(path: &Path) -> PromoResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(PromoError::asset(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            path: path.to_path_buf(),
        })
    }
}

/// Resolve the font used for all text.
///
/// An explicit path must load. Without one, the first readable system candidate wins; `None`
/// means text directives will be skipped.
pub fn resolve_font(explicit: Option<&Path>) -> PromoResult<Option<FontFace>> {
    if let Some(path) = explicit {
        return FontFace::from_path(path).map(Some);
    }
    for candidate in SYSTEM_FONT_CANDIDATES {
        let path = Path::new(candidate);
        if path.is_file()
            && let Ok(face) = FontFace::from_path(path)
        {
            tracing::debug!(font = %path.display(), "using system font");
            return Ok(Some(face));
        }
    }
    tracing::warn!("no usable font found; text will not be drawn");
    Ok(None)
}

/// Shaping state: Parley contexts plus the registered family.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl std::fmt::Debug for TextLayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextLayoutEngine")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl TextLayoutEngine {
    /// Register `font_bytes` and prepare fresh Parley contexts.
    pub fn new(font_bytes: &[u8]) -> PromoResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| PromoError::asset("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PromoError::asset("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape a single unwrapped line of text.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PromoResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PromoError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
