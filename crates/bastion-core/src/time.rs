//! Time Management
//!
//! The simulator advances exactly one step per rendered frame. The frame
//! pacing itself belongs to whatever drives the loop; this module only keeps
//! the bookkeeping.

/// Longest step the simulation will accept before clamping
pub const MAX_STEP_SECS: f64 = 0.25;

/// Delta time wrapper for type safety
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f64);

impl DeltaTime {
    /// A zero-length step
    pub const ZERO: Self = Self(0.0);

    /// Create a new delta time from seconds
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// Create a delta time for one frame at the given rate
    pub fn from_hz(hz: f64) -> Self {
        Self(1.0 / hz)
    }

    /// Get the delta time in seconds
    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Get the delta time as f32 (what the vector math wants)
    pub fn as_secs_f32(&self) -> f32 {
        self.0 as f32
    }
}

impl Default for DeltaTime {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}

/// Per-run frame bookkeeping
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total simulated time
    total_time: f64,
    /// Delta time of the last frame, after clamping
    delta_time: f64,
    /// Frame count
    frame_count: u64,
}

impl FrameClock {
    /// Create a new frame clock
    pub fn new() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by one frame and return the step the simulation should use
    ///
    /// Negative or non-finite input becomes zero; long frames are clamped to
    /// [`MAX_STEP_SECS`].
    pub fn tick(&mut self, delta: DeltaTime) -> DeltaTime {
        let raw = if delta.0.is_finite() { delta.0 } else { 0.0 };
        let step = raw.clamp(0.0, MAX_STEP_SECS);

        self.delta_time = step;
        self.total_time += step;
        self.frame_count += 1;

        DeltaTime(step)
    }

    /// Get the delta time for the current frame
    pub fn delta_time(&self) -> DeltaTime {
        DeltaTime(self.delta_time)
    }

    /// Get the total elapsed simulated time
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_time() {
        let dt = DeltaTime::from_secs(0.016);
        assert!((dt.as_secs() - 0.016).abs() < 0.0001);
        assert!((dt.as_secs_f32() - 0.016).abs() < 0.0001);
        assert!((DeltaTime::from_hz(60.0).as_secs() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new();

        let step = clock.tick(DeltaTime::from_secs(0.016));
        assert_eq!(clock.frame_count(), 1);
        assert!((step.as_secs() - 0.016).abs() < 0.0001);
        assert!((clock.total_time() - 0.016).abs() < 0.0001);
        assert_eq!(clock.delta_time(), step);
    }

    #[test]
    fn test_frame_clock_clamps() {
        let mut clock = FrameClock::new();

        assert_eq!(clock.tick(DeltaTime::from_secs(3.0)).as_secs(), MAX_STEP_SECS);
        assert_eq!(clock.tick(DeltaTime::from_secs(-1.0)).as_secs(), 0.0);
        assert_eq!(clock.tick(DeltaTime::from_secs(f64::NAN)).as_secs(), 0.0);
        assert_eq!(clock.frame_count(), 3);
    }
}
