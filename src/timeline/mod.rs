//! Scene timeline: fixed in/hold/out schedule and time-to-position resolution.

pub(crate) mod model;
