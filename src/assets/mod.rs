pub(crate) mod decode;
pub(crate) mod logo;
pub(crate) mod svg_raster;
pub(crate) mod text;
