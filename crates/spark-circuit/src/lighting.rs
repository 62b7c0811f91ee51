//! Bulb lighting: the bulb glows while any particle passes close to it.

use crate::particle::Particle;
use spark_core::Vec2;

/// Proximity detector around the bulb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulbSensor {
    pub position: Vec2,
    pub radius: f64,
    pub margin: f64,
}

impl BulbSensor {
    pub fn new(position: Vec2, radius: f64, margin: f64) -> Self {
        Self {
            position,
            radius,
            margin,
        }
    }

    /// Distance under which a particle lights the bulb
    pub fn threshold(&self) -> f64 {
        self.radius + self.margin
    }

    /// Whether a particle at `point` lights the bulb (strictly inside the threshold)
    pub fn detects(&self, point: Vec2) -> bool {
        point.distance(self.position) < self.threshold()
    }

    /// Lit state for a set of particles. Not sticky: an empty set is dark.
    pub fn resolve<'a>(&self, particles: impl IntoIterator<Item = &'a Particle>) -> bool {
        particles.into_iter().any(|p| self.detects(p.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_core::ParticleId;

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle {
            id: ParticleId(0),
            position: Vec2::new(x, y),
            target_index: 1,
            completed_lap: false,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let sensor = BulbSensor::new(Vec2::new(300.0, 300.0), 25.0, 10.0);
        assert!(sensor.detects(Vec2::new(266.0, 300.0)));
        assert!(!sensor.detects(Vec2::new(265.0, 300.0)));
    }

    #[test]
    fn resolve_is_any_particle() {
        let sensor = BulbSensor::new(Vec2::ZERO, 5.0, 0.0);
        let far = particle_at(100.0, 0.0);
        let near = particle_at(3.0, 4.0 - 1e-9);
        assert!(!sensor.resolve([&far]));
        assert!(sensor.resolve([&far, &near]));
        assert!(!sensor.resolve(std::iter::empty::<&Particle>()));
    }
}
