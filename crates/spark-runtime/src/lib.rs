//! Spark Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a host uses to drive a simulation:
//! - `TimeSource` — monotonic millisecond timestamps (system or manual)
//! - `FrameClock` — fixed-interval frame accumulator
//! - `TickScheduler` — cancelable per-frame tick source (`start` / `stop` / `poll`)
//! - `EventBus` — typed event queue drained by the host each frame
//! - `RuntimeSystem` — trait for systems ticked by the frame loop

mod clock;
mod event_bus;
mod scheduler;
mod system;

pub use clock::{FrameClock, ManualTimeSource, SystemTimeSource, TimeSource};
pub use event_bus::EventBus;
pub use scheduler::{FrameScheduler, ManualScheduler, TickScheduler};
pub use system::RuntimeSystem;
