use std::time::Duration;

use crate::foundation::error::{PromoError, PromoResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Highest accepted rate; one frame must last at least a millisecond.
    pub const MAX_FRAMES_PER_SEC: u32 = 1000;

    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> PromoResult<Self> {
        let fps = Self { num, den };
        fps.validate()?;
        Ok(fps)
    }

    /// Reject zero parts and rates whose frame duration would round to nothing.
    pub fn validate(self) -> PromoResult<()> {
        if self.den == 0 {
            return Err(PromoError::validation("Fps den must be > 0"));
        }
        if self.num == 0 {
            return Err(PromoError::validation("Fps num must be > 0"));
        }
        if u64::from(self.num) > u64::from(self.den) * u64::from(Self::MAX_FRAMES_PER_SEC) {
            return Err(PromoError::validation(format!(
                "Fps {}/{} exceeds {} frames per second",
                self.num,
                self.den,
                Self::MAX_FRAMES_PER_SEC
            )));
        }
        Ok(())
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of one frame.
    pub fn frame_duration(self) -> Duration {
        Duration::from_secs_f64(f64::from(self.den) / f64::from(self.num))
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject sizes the raster surface or a yuv420p encoder cannot handle.
    pub fn validate(self) -> PromoResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PromoError::validation("canvas width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(PromoError::validation("canvas width/height must fit in u16"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(PromoError::validation(
                "canvas width/height must be even (required for yuv420p output)",
            ));
        }
        Ok(())
    }

    /// Length of the shorter side, the unit for relative sizes in scene scripts.
    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Map a canvas-relative point (`0..1` on both axes) to pixels.
    pub fn at(self, rel: Vec2) -> Point {
        Point::new(rel.x * f64::from(self.width), rel.y * f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
        }
    }
}

/// Straight-alpha RGBA8 color as used in configuration and scene scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], a])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
