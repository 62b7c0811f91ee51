//! Runtime system trait

use spark_core::Result;

/// A system that can be ticked by the host frame loop
///
/// The host calls `update` once per display frame with the current timestamp.
/// Whether that frame actually advances the simulation is up to the system and
/// its scheduler.
pub trait RuntimeSystem {
    /// Called once per frame
    fn update(&mut self, now_ms: f64) -> Result<()>;

    /// Called when the host is shutting down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
