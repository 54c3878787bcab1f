//! SmartyGym promo renderer.
//!
//! A fixed schedule of scenes is rendered procedurally onto a CPU raster surface, frame by
//! frame, and captured into a video file:
//!
//! - [`SceneTimeline`] maps elapsed time to a [`PlaybackPosition`]
//! - [`Compositor`] paints one frame from a [`SceneScript`] per scene
//! - [`CapturePipeline`] drives the compositor into a [`VideoEncoder`] and publishes a
//!   [`GeneratedArtifact`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod capture;
mod config;
mod encode;
mod foundation;
mod render;
mod scene;
mod timeline;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Fps, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{PromoError, PromoResult};

pub use crate::animation::ease::{
    Ease, clamp01, ease_in_out_cubic, ease_out_cubic, lerp, progress,
};
pub use crate::timeline::model::{Phase, PlaybackPosition, SceneTimeline, SceneTiming};

pub use crate::assets::logo::{
    LogoImage, LogoLoad, LogoSource, RenderAssets, load_logo, load_logo_cancellable,
    load_logo_with_timeout,
};
pub use crate::assets::text::{FontFace, SYSTEM_FONT_CANDIDATES, resolve_font};

pub use crate::scene::catalog::smartygym_scripts;
pub use crate::scene::draw::{hold_pulse, phase_envelope, render_scene};
pub use crate::scene::script::{Directive, Motion, RelRect, SceneScript};

pub use crate::render::backend::FrameRGBA;
pub use crate::render::compositor::{Compositor, FrameStyle};
pub use crate::render::surface::Surface;

pub use crate::encode::encoder::{
    EncoderBackend, EncoderConfig, EncoderEvent, PREFERRED_MIME_TYPES, VideoEncoder, VideoMime,
};
pub use crate::encode::ffmpeg::{FfmpegBackend, select_mime};
pub use crate::encode::memory::{MEMORY_CONTAINER_MAGIC, MemoryBackend};

pub use crate::capture::artifact::{ArtifactRegistry, GeneratedArtifact, artifact_file_name};
pub use crate::capture::clock::{FrameClock, SteppedClock, SystemClock};
pub use crate::capture::error::CaptureFailure;
pub use crate::capture::observer::{CaptureObserver, NullObserver};
pub use crate::capture::pipeline::{CancelHandle, CaptureOptions, CapturePipeline, CaptureStatus};
pub use crate::capture::session::CaptureSession;
pub use crate::capture::state::CaptureState;

pub use crate::config::PromoConfig;
