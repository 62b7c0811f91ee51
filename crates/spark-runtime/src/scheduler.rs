//! Tick scheduling — the cancelable per-frame tick source a simulation drives.
//!
//! A scheduler holds at most one outstanding tick request. `start` arms it,
//! `stop` disarms it synchronously, and the host calls `poll` once per frame to
//! learn whether the armed tick fires on that frame.

use crate::clock::FrameClock;
use tracing::trace;

/// A cancelable source of simulation ticks
pub trait TickScheduler {
    /// Arm the scheduler. Arming an already armed scheduler is a no-op, so
    /// there is never more than one outstanding tick.
    fn start(&mut self);

    /// Disarm the scheduler. No tick fires after this returns until `start`
    /// is called again.
    fn stop(&mut self);

    /// Whether a tick is currently scheduled
    fn is_armed(&self) -> bool;

    /// Called by the host once per frame. Returns true when the scheduled
    /// tick fires on this frame.
    fn poll(&mut self, now_ms: f64) -> bool;
}

/// Scheduler that fires on every polled frame while armed.
///
/// Records how often it was started and stopped so tests can check the
/// controller's scheduling.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    armed: bool,
    /// Number of transitions from disarmed to armed
    pub starts: u32,
    /// Number of transitions from armed to disarmed
    pub stops: u32,
    /// Number of ticks that fired
    pub fired: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding tick requests (0 or 1)
    pub fn outstanding(&self) -> usize {
        usize::from(self.armed)
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self) {
        if !self.armed {
            self.armed = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.armed {
            self.armed = false;
            self.stops += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn poll(&mut self, _now_ms: f64) -> bool {
        if self.armed {
            self.fired += 1;
        }
        self.armed
    }
}

/// Scheduler paced by a fixed frame rate, for real hosts.
///
/// The first poll after `start` fires immediately; after that at most one
/// tick fires per frame interval, however late the host polls.
pub struct FrameScheduler {
    clock: FrameClock,
    armed: bool,
}

impl FrameScheduler {
    pub fn new(hz: f64) -> Self {
        Self {
            clock: FrameClock::with_rate(hz),
            armed: false,
        }
    }

    pub fn frame_interval_ms(&self) -> f64 {
        self.clock.frame_interval_ms
    }
}

impl TickScheduler for FrameScheduler {
    fn start(&mut self) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.clock.reset();
        self.clock.prime();
        trace!(interval_ms = self.clock.frame_interval_ms, "frame scheduler armed");
    }

    fn stop(&mut self) {
        if self.armed {
            self.armed = false;
            trace!("frame scheduler disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn poll(&mut self, now_ms: f64) -> bool {
        if !self.armed {
            return false;
        }
        self.clock.tick(now_ms);
        if self.clock.should_step() {
            self.clock.consume_step();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_start_is_idempotent() {
        let mut sched = ManualScheduler::new();
        sched.start();
        sched.start();
        assert_eq!(sched.starts, 1);
        assert_eq!(sched.outstanding(), 1);
    }

    #[test]
    fn manual_stop_cancels_ticks() {
        let mut sched = ManualScheduler::new();
        sched.start();
        assert!(sched.poll(0.0));
        sched.stop();
        assert!(!sched.poll(16.0));
        assert_eq!(sched.outstanding(), 0);
        assert_eq!(sched.fired, 1);
        assert_eq!(sched.stops, 1);
    }

    #[test]
    fn frame_scheduler_fires_immediately_after_start() {
        let mut sched = FrameScheduler::new(60.0);
        assert!(!sched.poll(0.0));
        sched.start();
        assert!(sched.poll(1000.0));
        // Same instant again: no second tick
        assert!(!sched.poll(1000.0));
    }

    #[test]
    fn frame_scheduler_paces_ticks() {
        let mut sched = FrameScheduler::new(100.0);
        sched.start();
        assert!(sched.poll(0.0));
        assert!(!sched.poll(4.0));
        assert!(sched.poll(10.0));
        // A long stall still yields a single tick
        assert!(sched.poll(200.0));
        assert!(!sched.poll(201.0));
    }

    #[test]
    fn frame_scheduler_steady_frames_each_fire() {
        let mut sched = FrameScheduler::new(60.0);
        sched.start();
        let interval = sched.frame_interval_ms();
        let fired = (0..120)
            .filter(|&frame| sched.poll(frame as f64 * interval))
            .count();
        assert_eq!(fired, 120);
    }

    #[test]
    fn frame_scheduler_stop_then_restart() {
        let mut sched = FrameScheduler::new(60.0);
        sched.start();
        assert!(sched.poll(0.0));
        sched.stop();
        assert!(!sched.is_armed());
        assert!(!sched.poll(100.0));
        sched.start();
        assert!(sched.poll(101.0));
    }
}
