/// Failures surfaced to the UI shell by the capture pipeline.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum CaptureFailure {
    /// No supported video format.
    #[error("no supported video encoder is available")]
    UnsupportedEnvironment,
    /// The logo missed its load deadline. Recording continues with the wordmark.
    #[error("logo did not load in time")]
    AssetLoadTimeout,
    /// The encoder stopped without producing any data.
    #[error("encoder produced no data")]
    EmptyCapture,
    /// The encoder failed to start, accept a frame, or stop.
    #[error("encoder fault: {0}")]
    EncoderFault(String),
    /// The attempt was cancelled.
    #[error("capture cancelled")]
    Cancelled,
}

impl CaptureFailure {
    /// Short message for the status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedEnvironment => {
                "Video recording is not supported here. Try a different runtime."
            }
            Self::AssetLoadTimeout => "Logo took too long to load; using the text logo.",
            Self::EmptyCapture => "No video data captured. Please try again.",
            Self::EncoderFault(_) => "Video generation failed. Please try again.",
            Self::Cancelled => "Video generation cancelled.",
        }
    }

    /// Whether the attempt is over but may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::EmptyCapture | Self::EncoderFault(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/error.rs"]
mod tests;
