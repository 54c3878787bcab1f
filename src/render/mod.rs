//! Raster surface, frame type and the frame compositor.

pub(crate) mod backend;
pub(crate) mod compositor;
pub(crate) mod surface;
