/// Lifecycle of one capture attempt.
///
/// `Idle → Priming → Recording → Finalizing → Complete | Failed`. Cancellation returns to
/// `Idle` from any state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureState {
    /// No session. A static preview may be shown.
    #[default]
    Idle,
    /// Loading assets and resetting previous output.
    Priming,
    /// Rendering frames into the encoder.
    Recording,
    /// Waiting for the encoder to confirm it stopped.
    Finalizing,
    /// An artifact is available.
    Complete,
    /// The last attempt produced no usable output.
    Failed,
}

impl CaptureState {
    /// Whether a new attempt may start from this state.
    pub fn can_generate(self) -> bool {
        matches!(self, Self::Idle | Self::Complete | Self::Failed)
    }

    /// Whether a session is in flight.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Priming | Self::Recording | Self::Finalizing)
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Priming => "priming",
            Self::Recording => "recording",
            Self::Finalizing => "finalizing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for CaptureState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/state.rs"]
mod tests;
