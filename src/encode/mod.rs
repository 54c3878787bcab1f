//! Video encoders.
//!
//! An encoder consumes rendered frames in order and delivers encoded bytes asynchronously as
//! [`EncoderEvent`](encoder::EncoderEvent)s over a channel, ending with exactly one terminal
//! event.

pub(crate) mod encoder;
pub(crate) mod ffmpeg;
pub(crate) mod memory;
