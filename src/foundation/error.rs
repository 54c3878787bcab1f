use crate::capture::error::CaptureFailure;

/// Result alias used throughout the crate.
pub type PromoResult<T> = Result<T, PromoError>;

/// Crate-level error type.
#[derive(thiserror::Error, Debug)]
pub enum PromoError {
    /// Invalid configuration, timeline or input value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure while evaluating or rasterizing a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Failure while decoding or preparing a render asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failure reported by a video encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Capture session failure surfaced to the UI shell.
    #[error(transparent)]
    Capture(#[from] CaptureFailure),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromoError {
    /// Build a [`PromoError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PromoError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`PromoError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PromoError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PromoError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
