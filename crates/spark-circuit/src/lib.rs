//! Spark Circuit - electron flow through a battery, switch, and bulb
//!
//! Provides the simulation core behind the animated circuit:
//! - `MotionEngine` — spawns electrons on a fixed cadence, walks them along the
//!   wire loop one step per tick, and prunes them after one lap
//! - `BulbSensor` — lights the bulb while any electron is close to it
//! - `SimulationController` — the on/off switch state machine driving ticks
//!   through a `TickScheduler`
//! - `Snapshot` — what a renderer reads after every tick and toggle

pub mod config;
pub mod controller;
pub mod engine;
pub mod event;
pub mod lighting;
pub mod particle;
pub mod state;

pub use config::CircuitConfig;
pub use controller::{PowerState, SimulationController};
pub use engine::{MotionEngine, TickReport};
pub use event::CircuitEvent;
pub use lighting::BulbSensor;
pub use particle::{Particle, ParticleStore, ParticleView};
pub use state::{SimulationState, Snapshot};
