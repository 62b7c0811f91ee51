//! Motion engine: one tick of spawning, movement, bulb proximity, and lap pruning

use crate::config::CircuitConfig;
use crate::lighting::BulbSensor;
use crate::particle::Particle;
use crate::state::SimulationState;
use spark_core::{ParticleId, PathGeometry, Result};
use tracing::trace;

/// Slack on the snap test so float error on an exact multiple of the step
/// size never leaves a particle parked just short of a waypoint
const SNAP_EPSILON: f64 = 1e-9;

/// What happened during one tick besides the state change itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<ParticleId>,
    /// Particles that finished their lap and were removed, in spawn order
    pub completed: Vec<ParticleId>,
}

/// Advances particles along a fixed path. Holds only immutable parameters;
/// all changing data arrives in and leaves through `SimulationState`.
#[derive(Debug, Clone)]
pub struct MotionEngine {
    path: PathGeometry,
    step_size: f64,
    spawn_interval_ms: f64,
    sensor: BulbSensor,
}

impl MotionEngine {
    /// Build an engine from a config, failing on any invalid parameter
    pub fn new(config: &CircuitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            path: config.path_geometry()?,
            step_size: config.step_size,
            spawn_interval_ms: config.spawn_interval_ms,
            sensor: BulbSensor::new(config.bulb_position, config.bulb_radius, config.hit_margin),
        })
    }

    pub fn path(&self) -> &PathGeometry {
        &self.path
    }

    pub fn sensor(&self) -> &BulbSensor {
        &self.sensor
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn spawn_interval_ms(&self) -> f64 {
        self.spawn_interval_ms
    }

    /// Advance the state by one tick at time `now_ms`
    pub fn advance(&self, state: SimulationState, now_ms: f64) -> SimulationState {
        self.step(state, now_ms).0
    }

    /// Advance by one tick and report spawns and completed laps.
    ///
    /// Order is fixed: spawn, move, proximity, prune. Proximity and pruning
    /// both look at post-move positions.
    pub fn step(&self, mut state: SimulationState, now_ms: f64) -> (SimulationState, TickReport) {
        let mut report = TickReport::default();

        let spawn_due = match state.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last > self.spawn_interval_ms,
        };
        if spawn_due {
            let id = state.next_particle_id;
            state.particles.push(Particle::at_start(id, &self.path));
            state.next_particle_id = id.next();
            state.last_spawn_ms = Some(now_ms);
            report.spawned = Some(id);
            trace!(%id, now_ms, "particle spawned");
        }

        for particle in state.particles.iter_mut() {
            self.move_particle(particle);
        }
        state.bulb_lit = self.sensor.resolve(state.particles.iter());

        report.completed = state.particles.remove_completed();
        for id in &report.completed {
            trace!(%id, "particle completed lap");
        }

        (state, report)
    }

    fn move_particle(&self, particle: &mut Particle) {
        let target = self.path.waypoint(particle.target_index);
        let to_target = target - particle.position;
        let distance = to_target.length();

        if distance <= self.step_size + SNAP_EPSILON {
            // Snap exactly so the next segment starts on the waypoint
            particle.position = target;
            if particle.target_index == 0 {
                particle.completed_lap = true;
            }
            particle.target_index = self.path.next_index(particle.target_index);
        } else {
            particle.position = particle.position + to_target * (self.step_size / distance);
        }
    }

    /// Ticks a particle needs to go around the loop once, or `None` when
    /// particles never move
    pub fn lap_ticks(&self) -> Option<u64> {
        if self.step_size <= 0.0 {
            return None;
        }
        let ticks: f64 = (0..self.path.waypoint_count())
            .map(|i| {
                let len = self.path.waypoint(i).distance(self.path.waypoint(i + 1));
                // A segment always costs at least one tick: arrival is a snap
                (len / self.step_size).ceil().max(1.0)
            })
            .sum();
        if !ticks.is_finite() || ticks >= u64::MAX as f64 {
            return None;
        }
        Some(ticks as u64)
    }

    /// Upper bound on live particles when ticking every `tick_interval_ms`
    pub fn max_live_particles(&self, tick_interval_ms: f64) -> Option<u64> {
        let lap_ms = self.lap_ticks()? as f64 * tick_interval_ms;
        let spacing_ms = self.spawn_interval_ms.max(tick_interval_ms);
        if spacing_ms <= 0.0 {
            return None;
        }
        Some((lap_ms / spacing_ms).ceil() as u64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::{SparkError, Vec2};

    fn rect_config() -> CircuitConfig {
        CircuitConfig {
            path: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(40.0, 0.0),
                Vec2::new(40.0, 20.0),
                Vec2::new(0.0, 20.0),
            ],
            bulb_position: Vec2::new(0.0, 20.0),
            bulb_radius: 5.0,
            hit_margin: 0.0,
            step_size: 4.0,
            spawn_interval_ms: 1_000_000.0,
            frame_rate: 60.0,
        }
    }

    fn energized() -> SimulationState {
        let mut state = SimulationState::new();
        state.power_up();
        state
    }

    #[test]
    fn first_tick_spawns_and_moves() {
        let engine = MotionEngine::new(&rect_config()).unwrap();
        let (state, report) = engine.step(energized(), 0.0);

        assert_eq!(report.spawned, Some(ParticleId(0)));
        assert_eq!(state.next_particle_id, ParticleId(1));
        assert_eq!(state.last_spawn_ms, Some(0.0));
        let p = &state.particles.as_slice()[0];
        assert_eq!(p.position, Vec2::new(4.0, 0.0));
        assert_eq!(p.target_index, 1);
    }

    #[test]
    fn spawn_requires_strictly_more_than_interval() {
        let config = CircuitConfig {
            spawn_interval_ms: 300.0,
            ..rect_config()
        };
        let engine = MotionEngine::new(&config).unwrap();
        let state = engine.advance(energized(), 0.0);
        let state = engine.advance(state, 300.0);
        assert_eq!(state.particles.len(), 1);
        let state = engine.advance(state, 300.5);
        assert_eq!(state.particles.len(), 2);
        assert_eq!(state.last_spawn_ms, Some(300.5));
    }

    #[test]
    fn snaps_exactly_onto_waypoint() {
        let config = CircuitConfig {
            step_size: 3.0,
            ..rect_config()
        };
        let engine = MotionEngine::new(&config).unwrap();
        let mut state = energized();
        // 40 / 3 = 13.33 → the 14th tick lands on the corner
        for tick in 0..14 {
            state = engine.advance(state, tick as f64);
        }
        let p = &state.particles.as_slice()[0];
        assert_eq!(p.position, Vec2::new(40.0, 0.0));
        assert_eq!(p.target_index, 2);
    }

    #[test]
    fn exact_step_distance_snaps_in_same_tick() {
        let engine = MotionEngine::new(&rect_config()).unwrap();
        let mut state = energized();
        // 40 px at 4 px/tick: the 10th tick arrives and already targets corner 2
        for tick in 0..10 {
            state = engine.advance(state, tick as f64);
        }
        let p = &state.particles.as_slice()[0];
        assert_eq!(p.position, Vec2::new(40.0, 0.0));
        assert_eq!(p.target_index, 2);
    }

    #[test]
    fn lap_completion_removes_particle_in_completing_tick() {
        let engine = MotionEngine::new(&rect_config()).unwrap();
        assert_eq!(engine.lap_ticks(), Some(30));

        let mut state = energized();
        for tick in 0..29 {
            let (next, report) = engine.step(state, tick as f64);
            assert!(report.completed.is_empty());
            state = next;
        }
        let p = &state.particles.as_slice()[0];
        assert_eq!(p.position, Vec2::new(0.0, 4.0));
        assert_eq!(p.target_index, 0);

        let (state, report) = engine.step(state, 29.0);
        assert_eq!(report.completed, vec![ParticleId(0)]);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn lighting_follows_current_tick_only() {
        let engine = MotionEngine::new(&rect_config()).unwrap();
        let mut state = energized();
        let mut lit_ticks = Vec::new();
        for tick in 0..30 {
            state = engine.advance(state, tick as f64);
            if state.bulb_lit {
                lit_ticks.push(tick);
            }
        }
        // Within 5 px of (0, 20): 4 px before the corner and 4 px after it
        assert_eq!(lit_ticks, vec![23, 24, 25]);
        assert!(!state.bulb_lit);
    }

    #[test]
    fn zero_step_never_produces_nan() {
        let config = CircuitConfig {
            step_size: 0.0,
            ..rect_config()
        };
        let engine = MotionEngine::new(&config).unwrap();
        let mut state = energized();
        for tick in 0..5 {
            state = engine.advance(state, tick as f64);
        }
        let p = &state.particles.as_slice()[0];
        assert_eq!(p.position, Vec2::ZERO);
        assert!(p.position.is_finite());
        assert_eq!(engine.lap_ticks(), None);
    }

    #[test]
    fn two_waypoint_loop_goes_out_and_back() {
        let config = CircuitConfig {
            path: vec![Vec2::ZERO, Vec2::new(8.0, 0.0)],
            ..rect_config()
        };
        let engine = MotionEngine::new(&config).unwrap();
        let mut state = energized();
        for tick in 0..3 {
            state = engine.advance(state, tick as f64);
        }
        assert_eq!(state.particles.as_slice()[0].position, Vec2::new(4.0, 0.0));
        assert_eq!(state.particles.as_slice()[0].target_index, 0);
        let (state, report) = engine.step(state, 3.0);
        assert_eq!(report.completed, vec![ParticleId(0)]);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn degenerate_path_rejected_at_construction() {
        let config = CircuitConfig {
            path: vec![Vec2::ZERO],
            ..rect_config()
        };
        let err = MotionEngine::new(&config).unwrap_err();
        assert!(matches!(err, SparkError::InvalidPath(_)));
    }

    #[test]
    fn max_live_particles_bound() {
        let config = CircuitConfig {
            spawn_interval_ms: 10.0,
            ..rect_config()
        };
        let engine = MotionEngine::new(&config).unwrap();
        // 30 ticks of 1 ms, spaced at least 10 ms
        assert_eq!(engine.max_live_particles(1.0), Some(4));
    }

    #[test]
    fn tiny_step_lap_is_unbounded() {
        let config = CircuitConfig {
            step_size: 1e-20,
            ..CircuitConfig::default()
        };
        let engine = MotionEngine::new(&config).unwrap();
        assert_eq!(engine.lap_ticks(), None);
        assert_eq!(engine.max_live_particles(16.0), None);
    }
}
