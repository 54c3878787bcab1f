use crate::foundation::error::{PromoError, PromoResult};

/// Durations of the three phases of one scene, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneTiming {
    /// Enter phase.
    pub in_ms: u64,
    /// Hold phase.
    pub hold_ms: u64,
    /// Exit phase.
    pub out_ms: u64,
}

impl SceneTiming {
    /// Construct a timing triple.
    pub const fn new(in_ms: u64, hold_ms: u64, out_ms: u64) -> Self {
        Self {
            in_ms,
            hold_ms,
            out_ms,
        }
    }

    /// `in + hold + out`.
    pub fn total_ms(self) -> u64 {
        self.in_ms
            .saturating_add(self.hold_ms)
            .saturating_add(self.out_ms)
    }
}

/// One of the three sub-states of a scene's lifetime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Entering.
    In,
    /// Fully visible.
    Hold,
    /// Exiting.
    Out,
}

/// Where a timeline is at a given elapsed time.
///
/// Always satisfies `0 <= phase_elapsed_ms <= phase_duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PlaybackPosition {
    /// Index into the timeline.
    pub scene_index: usize,
    /// Active phase.
    pub phase: Phase,
    /// Time spent inside the active phase.
    pub phase_elapsed_ms: f64,
    /// Length of the active phase.
    pub phase_duration_ms: f64,
}

impl PlaybackPosition {
    /// Normalized progress through the active phase.
    pub fn phase_progress(&self) -> f64 {
        crate::animation::ease::progress(self.phase_elapsed_ms, self.phase_duration_ms)
    }
}

/// Fixed, ordered list of scene timings. Its total is the video duration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<SceneTiming>", into = "Vec<SceneTiming>")]
pub struct SceneTimeline {
    scenes: Vec<SceneTiming>,
    total_ms: u64,
}

impl SceneTimeline {
    /// Build a validated timeline: at least one scene, every scene with a positive total.
    pub fn new(scenes: Vec<SceneTiming>) -> PromoResult<Self> {
        if scenes.is_empty() {
            return Err(PromoError::validation("timeline must contain at least one scene"));
        }
        if let Some(i) = scenes.iter().position(|s| s.total_ms() == 0) {
            return Err(PromoError::validation(format!(
                "scene {i} has zero total duration"
            )));
        }
        let total_ms = scenes
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.total_ms()));
        Ok(Self { scenes, total_ms })
    }

    /// The eight-scene SmartyGym promo schedule.
    pub fn smartygym() -> Self {
        let scenes = vec![
            SceneTiming::new(800, 1400, 500),
            SceneTiming::new(600, 1800, 500),
            SceneTiming::new(600, 1800, 500),
            SceneTiming::new(600, 2000, 500),
            SceneTiming::new(500, 2600, 500),
            SceneTiming::new(600, 1800, 500),
            SceneTiming::new(600, 1600, 500),
            SceneTiming::new(800, 2200, 600),
        ];
        let total_ms = scenes.iter().map(|s| s.total_ms()).sum();
        Self { scenes, total_ms }
    }

    /// Canonical video duration.
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false` for a validated timeline.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Scene timings in order.
    pub fn scenes(&self) -> &[SceneTiming] {
        &self.scenes
    }

    /// Absolute start of scene `index`, or `None` when out of range.
    pub fn scene_start_ms(&self, index: usize) -> Option<u64> {
        if index >= self.scenes.len() {
            return None;
        }
        Some(self.scenes[..index].iter().map(|s| s.total_ms()).sum())
    }

    /// Resolve an absolute elapsed time to a [`PlaybackPosition`].
    ///
    /// Never fails: negative input counts as `0`, and anything at or past the end resolves to
    /// the last scene holding with a unit phase duration.
    pub fn resolve(&self, elapsed_ms: f64) -> PlaybackPosition {
        let t = if elapsed_ms.is_nan() {
            0.0
        } else {
            elapsed_ms.max(0.0)
        };

        let mut cursor = 0.0;
        for (scene_index, s) in self.scenes.iter().enumerate() {
            let total = s.total_ms() as f64;
            if t < cursor + total {
                return classify(scene_index, *s, t - cursor);
            }
            cursor += total;
        }

        PlaybackPosition {
            scene_index: self.scenes.len() - 1,
            phase: Phase::Hold,
            phase_elapsed_ms: 0.0,
            phase_duration_ms: 1.0,
        }
    }

    /// Like [`SceneTimeline::resolve`] but rejects times outside `[0, total)`.
    pub fn resolve_strict(&self, elapsed_ms: f64) -> PromoResult<PlaybackPosition> {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 || elapsed_ms >= self.total_ms as f64 {
            return Err(PromoError::validation(format!(
                "elapsed time {elapsed_ms}ms is outside timeline [0, {})",
                self.total_ms
            )));
        }
        Ok(self.resolve(elapsed_ms))
    }
}

fn classify(scene_index: usize, s: SceneTiming, local: f64) -> PlaybackPosition {
    let in_ms = s.in_ms as f64;
    let hold_ms = s.hold_ms as f64;
    let out_ms = s.out_ms as f64;

    let (phase, phase_elapsed_ms, phase_duration_ms) = if local < in_ms {
        (Phase::In, local, in_ms)
    } else if local < in_ms + hold_ms {
        (Phase::Hold, local - in_ms, hold_ms)
    } else {
        (Phase::Out, (local - in_ms - hold_ms).min(out_ms), out_ms)
    };

    PlaybackPosition {
        scene_index,
        phase,
        phase_elapsed_ms,
        phase_duration_ms,
    }
}

impl TryFrom<Vec<SceneTiming>> for SceneTimeline {
    type Error = PromoError;

    fn try_from(scenes: Vec<SceneTiming>) -> Result<Self, Self::Error> {
        Self::new(scenes)
    }
}

impl From<SceneTimeline> for Vec<SceneTiming> {
    fn from(t: SceneTimeline) -> Self {
        t.scenes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
