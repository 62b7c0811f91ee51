//! Simulation controller - the switch state machine.
//!
//! Two states, `DeEnergized` (initial) and `Energized`. Toggling on arms the
//! tick scheduler; toggling off disarms it and clears particles and bulb in
//! the same call. While energized, every fired tick runs the motion engine and
//! replaces the owned state.

use crate::config::CircuitConfig;
use crate::engine::MotionEngine;
use crate::event::CircuitEvent;
use crate::particle::Particle;
use crate::state::{SimulationState, Snapshot};
use spark_core::Result;
use spark_runtime::{EventBus, RuntimeSystem, TickScheduler};
use tracing::debug;

/// Position of the circuit switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    DeEnergized,
    Energized,
}

/// Owns the simulation state and drives the motion engine through a scheduler.
pub struct SimulationController<S: TickScheduler> {
    engine: MotionEngine,
    scheduler: S,
    state: SimulationState,
    events: EventBus<CircuitEvent>,
}

impl<S: TickScheduler> SimulationController<S> {
    /// Create a de-energized controller. Fails if the config is invalid.
    pub fn new(config: &CircuitConfig, scheduler: S) -> Result<Self> {
        Ok(Self::with_engine(MotionEngine::new(config)?, scheduler))
    }

    pub fn with_engine(engine: MotionEngine, scheduler: S) -> Self {
        Self {
            engine,
            scheduler,
            state: SimulationState::new(),
            events: EventBus::new(),
        }
    }

    /// Flip the switch. Never fails; returns the new power state.
    pub fn toggle(&mut self) -> PowerState {
        if self.state.energized {
            // Disarm first so no tick can land between the reset and the stop
            self.scheduler.stop();
            let was_lit = self.state.bulb_lit;
            self.state.power_down();
            if was_lit {
                self.events.push(CircuitEvent::BulbChanged { lit: false });
            }
        } else {
            self.state.power_up();
            self.scheduler.start();
        }

        let energized = self.state.energized;
        debug!(energized, "switch toggled");
        self.events.push(CircuitEvent::SwitchChanged { energized });
        self.events.push(CircuitEvent::Frame(self.state.snapshot()));
        self.power_state()
    }

    /// Host frame callback: ticks when the scheduler fires. Returns whether a
    /// tick ran.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        if self.scheduler.poll(now_ms) {
            self.tick(now_ms)
        } else {
            false
        }
    }

    /// Run one tick at `now_ms`. Ignored while de-energized or disarmed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.state.energized || !self.scheduler.is_armed() {
            return false;
        }

        let was_lit = self.state.bulb_lit;
        let (state, report) = self.engine.step(std::mem::take(&mut self.state), now_ms);
        self.state = state;

        if let Some(id) = report.spawned {
            self.events.push(CircuitEvent::ParticleSpawned(id));
        }
        for id in report.completed {
            self.events.push(CircuitEvent::LapCompleted(id));
        }
        if self.state.bulb_lit != was_lit {
            debug!(lit = self.state.bulb_lit, now_ms, "bulb changed");
            self.events.push(CircuitEvent::BulbChanged {
                lit: self.state.bulb_lit,
            });
        }
        self.events.push(CircuitEvent::Frame(self.state.snapshot()));
        true
    }

    pub fn power_state(&self) -> PowerState {
        if self.state.energized {
            PowerState::Energized
        } else {
            PowerState::DeEnergized
        }
    }

    pub fn is_energized(&self) -> bool {
        self.state.energized
    }

    pub fn is_bulb_lit(&self) -> bool {
        self.state.bulb_lit
    }

    pub fn particle_count(&self) -> usize {
        self.state.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        self.state.particles.as_slice()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Take all events published since the last drain
    pub fn drain_events(&mut self) -> Vec<CircuitEvent> {
        self.events.drain()
    }
}

impl<S: TickScheduler> RuntimeSystem for SimulationController<S> {
    fn update(&mut self, now_ms: f64) -> Result<()> {
        self.on_frame(now_ms);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        self.scheduler.stop();
        Ok(())
    }

    fn name(&self) -> &str {
        "circuit"
    }
}
