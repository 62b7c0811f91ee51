//! Particle types: simulation state and the read-only view handed to renderers

use serde::Serialize;
use spark_core::{ParticleId, PathGeometry, Vec2};

/// An electron travelling along the wire loop
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub position: Vec2,
    /// Index of the waypoint this particle is moving toward
    pub target_index: usize,
    /// Set when the particle arrives back at the first waypoint
    pub completed_lap: bool,
}

impl Particle {
    /// A fresh particle sitting on the first waypoint, heading for the second
    pub fn at_start(id: ParticleId, path: &PathGeometry) -> Self {
        Self {
            id,
            position: path.start(),
            target_index: path.next_index(0),
            completed_lap: false,
        }
    }

    pub fn view(&self) -> ParticleView {
        ParticleView {
            id: self.id,
            x: self.position.x,
            y: self.position.y,
        }
    }
}

/// What a renderer sees of one particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub id: ParticleId,
    pub x: f64,
    pub y: f64,
}

/// Live particles in spawn order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// Remove every particle that finished its lap, keeping spawn order of the
    /// rest. Returns the removed ids.
    pub fn remove_completed(&mut self) -> Vec<ParticleId> {
        let mut removed = Vec::new();
        self.particles.retain(|p| {
            if p.completed_lap {
                removed.push(p.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn views(&self) -> Vec<ParticleView> {
        self.particles.iter().map(Particle::view).collect()
    }
}
