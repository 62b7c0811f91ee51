//! Particle identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A particle identifier, unique within one simulation instance.
///
/// Ids are handed out in spawn order from a counter the simulation state
/// carries, so they increase monotonically and are never reused, even across
/// power cycles of the same circuit.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub u64);

impl ParticleId {
    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticleId({})", self.0)
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
