//! Speed-scaled animation time.

/// Noise phase accumulator driven by host frame timestamps.
///
/// `elapsed` only ever moves by `clamp(delta, 0, max_delta) * speed`, so a
/// tab that was backgrounded for minutes resumes with a single small step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
    last_frame_ms: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated, speed-scaled animation time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Host timestamp of the last frame, in milliseconds.
    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    /// Returns the clock after a frame at `timestamp_ms`, plus the clamped
    /// wall-clock delta in seconds (before speed scaling).
    ///
    /// Timestamps running backwards yield a zero delta. Non-finite inputs
    /// leave `elapsed` untouched.
    pub fn advance(self, timestamp_ms: f64, speed: f64, max_delta: f64) -> (Self, f64) {
        if !timestamp_ms.is_finite() {
            return (self, 0.0);
        }
        let raw = (timestamp_ms - self.last_frame_ms) / 1000.0;
        let delta = raw.clamp(0.0, max_delta.max(0.0));
        let step = delta * speed;
        let elapsed = if step.is_finite() {
            self.elapsed + step
        } else {
            self.elapsed
        };
        (
            Self {
                elapsed,
                last_frame_ms: timestamp_ms,
            },
            delta,
        )
    }
}
