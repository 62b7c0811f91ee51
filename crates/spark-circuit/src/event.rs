//! Events published by the simulation controller

use crate::state::Snapshot;
use spark_core::ParticleId;

/// Something a host or renderer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitEvent {
    /// The switch changed position
    SwitchChanged { energized: bool },
    /// The bulb turned on or off
    BulbChanged { lit: bool },
    ParticleSpawned(ParticleId),
    /// A particle went all the way around the loop and was removed
    LapCompleted(ParticleId),
    /// State after a committed tick or toggle, ready to paint
    Frame(Snapshot),
}
