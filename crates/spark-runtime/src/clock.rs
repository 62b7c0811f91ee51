//! Time sources and a fixed-interval frame clock

use std::time::Instant;

/// Longest frame delta the clock will accept (avoids a burst of catch-up
/// frames after the host stalls)
const MAX_FRAME_DELTA_MS: f64 = 250.0;

/// Tolerance for accumulated float error when comparing against the interval
const STEP_EPSILON_MS: f64 = 1e-6;

/// A source of millisecond timestamps
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock, measured from when the source was created
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually driven clock for tests and deterministic headless runs
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now_ms: f64,
}

impl ManualTimeSource {
    pub fn new(start_ms: f64) -> Self {
        Self { now_ms: start_ms }
    }

    /// Move time forward by `ms`
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn set(&mut self, ms: f64) {
        self.now_ms = ms;
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// Tracks frame time and accumulates it against a fixed frame interval
pub struct FrameClock {
    /// Total elapsed time in milliseconds since the first tick
    pub total_time_ms: f64,
    /// Time since last tick in milliseconds
    pub delta_ms: f64,
    /// Fixed frame interval (default: 1/60 second)
    pub frame_interval_ms: f64,
    /// Accumulated time waiting to be consumed as frames
    accumulator: f64,
    /// Timestamp of the previous tick, `None` before the first one
    last_ms: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::with_rate(60.0)
    }
}

impl FrameClock {
    /// Create a frame clock at 60Hz
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame clock ticking at `hz` frames per second
    pub fn with_rate(hz: f64) -> Self {
        Self {
            total_time_ms: 0.0,
            delta_ms: 0.0,
            frame_interval_ms: 1000.0 / hz,
            accumulator: 0.0,
            last_ms: None,
        }
    }

    /// Feed the current timestamp. Call once per host frame.
    pub fn tick(&mut self, now_ms: f64) {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            self.delta_ms = 0.0;
            return;
        };
        self.last_ms = Some(now_ms);

        // Clamp to avoid a spiral of catch-up frames; negative deltas mean a
        // non-monotonic source and count as zero
        self.delta_ms = (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS);
        self.total_time_ms += self.delta_ms;
        self.accumulator += self.delta_ms;
    }

    /// Returns true if a full frame interval has accumulated
    pub fn should_step(&self) -> bool {
        self.accumulator + STEP_EPSILON_MS >= self.frame_interval_ms
    }

    /// Consume one frame interval and discard any whole intervals of backlog,
    /// so a late host frame yields one step rather than a burst
    pub fn consume_step(&mut self) {
        let rest = (self.accumulator - self.frame_interval_ms).max(0.0) % self.frame_interval_ms;
        self.accumulator = if rest + STEP_EPSILON_MS >= self.frame_interval_ms {
            0.0
        } else {
            rest
        };
    }

    /// Make the next `should_step` true without waiting a full interval
    pub fn prime(&mut self) {
        self.accumulator = self.frame_interval_ms;
    }

    /// Forget all accumulated time and the previous timestamp
    pub fn reset(&mut self) {
        self.total_time_ms = 0.0;
        self.delta_ms = 0.0;
        self.accumulator = 0.0;
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = FrameClock::new();
        assert!((clock.frame_interval_ms - 1000.0 / 60.0).abs() < 1e-10);
        assert_eq!(clock.total_time_ms, 0.0);
        assert_eq!(clock.delta_ms, 0.0);
    }

    #[test]
    fn test_first_tick_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(5000.0);
        assert_eq!(clock.delta_ms, 0.0);
        assert!(!clock.should_step());
    }

    #[test]
    fn test_accumulates_to_step() {
        let mut clock = FrameClock::with_rate(100.0);
        clock.tick(0.0);
        clock.tick(6.0);
        assert!(!clock.should_step());
        clock.tick(10.0);
        assert!(clock.should_step());
        clock.consume_step();
        assert!(!clock.should_step());
    }

    #[test]
    fn test_backlog_is_dropped() {
        let mut clock = FrameClock::with_rate(100.0);
        clock.tick(0.0);
        clock.tick(55.0);
        assert!(clock.should_step());
        clock.consume_step();
        assert!(!clock.should_step());
    }

    #[test]
    fn test_delta_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(10_000.0);
        assert_eq!(clock.delta_ms, MAX_FRAME_DELTA_MS);
        clock.tick(9_000.0);
        assert_eq!(clock.delta_ms, 0.0);
    }

    #[test]
    fn test_prime_and_reset() {
        let mut clock = FrameClock::new();
        clock.prime();
        assert!(clock.should_step());
        clock.reset();
        assert!(!clock.should_step());
    }

    #[test]
    fn test_manual_time_source() {
        let mut time = ManualTimeSource::new(100.0);
        time.advance(16.5);
        assert!((time.now_ms() - 116.5).abs() < 1e-12);
        time.set(0.0);
        assert_eq!(time.now_ms(), 0.0);
    }

    #[test]
    fn test_system_time_is_monotonic() {
        let time = SystemTimeSource::new();
        let a = time.now_ms();
        let b = time.now_ms();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
