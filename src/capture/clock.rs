use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

const MIN_STEP: Duration = Duration::from_nanos(1);

/// Monotonic time source that also paces the render loop.
pub trait FrameClock: Send {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
    /// Block until the next frame should be drawn.
    fn wait_next_frame(&mut self);
}

/// Wall-clock pacing at a target frame rate.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    frame: Duration,
    next_deadline: Option<Instant>,
}

impl SystemClock {
    /// Clock ticking at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            origin: Instant::now(),
            frame: fps.frame_duration(),
            next_deadline: None,
        }
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = match self.next_deadline {
            // Fell behind: restart pacing from now instead of bursting.
            Some(d) if d + self.frame >= now => d + self.frame,
            _ => now + self.frame,
        };
        self.next_deadline = Some(deadline);
        let wait = deadline.saturating_duration_since(now);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

/// Deterministic clock that advances by a fixed step per frame and never sleeps.
#[derive(Clone, Debug)]
pub struct SteppedClock {
    now: Duration,
    step: Duration,
}

impl SteppedClock {
    /// One step per frame at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self::with_step(fps.frame_duration())
    }

    /// Explicit step, at least one nanosecond so time always moves forward.
    pub fn with_step(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step: step.max(MIN_STEP),
        }
    }
}

impl FrameClock for SteppedClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn wait_next_frame(&mut self) {
        self.now += self.step;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/clock.rs"]
mod tests;
