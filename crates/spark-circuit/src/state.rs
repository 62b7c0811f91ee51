//! Simulation state owned by the controller, and the snapshot renderers read

use crate::particle::{ParticleStore, ParticleView};
use serde::Serialize;
use spark_core::ParticleId;

/// Everything that changes while the circuit runs.
///
/// The spawn timer and id counter live here rather than beside the state so
/// the motion engine can stay a pure `state -> state` transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub energized: bool,
    pub bulb_lit: bool,
    pub particles: ParticleStore,
    /// Time of the last spawn; `None` makes the next energized tick spawn
    pub last_spawn_ms: Option<f64>,
    /// Id the next spawned particle receives. Never reset.
    pub next_particle_id: ParticleId,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all particles, darken the bulb, and forget the spawn timer
    pub fn power_down(&mut self) {
        self.energized = false;
        self.bulb_lit = false;
        self.particles.clear();
        self.last_spawn_ms = None;
    }

    /// Close the switch with a fresh spawn timer
    pub fn power_up(&mut self) {
        self.energized = true;
        self.last_spawn_ms = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            energized: self.energized,
            bulb_lit: self.bulb_lit,
            particles: self.particles.views(),
        }
    }
}

/// Read-only copy of the simulation state for one rendered frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub energized: bool,
    pub bulb_lit: bool,
    pub particles: Vec<ParticleView>,
}
