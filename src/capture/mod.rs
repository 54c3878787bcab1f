//! Capture/record pipeline.
//!
//! Drives the compositor frame by frame into a video encoder and turns the collected chunks
//! into a downloadable artifact. See [`CapturePipeline`](pipeline::CapturePipeline).

pub(crate) mod artifact;
pub(crate) mod clock;
pub(crate) mod error;
pub(crate) mod observer;
pub(crate) mod pipeline;
pub(crate) mod session;
pub(crate) mod state;
