//! Closed polyline paths - the wire loop particles travel along.
//!
//! A path is an ordered, cyclic list of waypoints. Indices wrap modulo the
//! waypoint count, so the segment leading into waypoint 0 starts at the last
//! waypoint.

use crate::error::{Result, SparkError};
use crate::Vec2;

/// An immutable closed loop of at least two waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PathGeometry {
    waypoints: Vec<Vec2>,
}

impl PathGeometry {
    /// Build a path from waypoints. Fails on fewer than two waypoints or on
    /// non-finite coordinates, both of which would leave the direction of
    /// travel undefined.
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(SparkError::InvalidPath(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if let Some(i) = waypoints.iter().position(|w| !w.is_finite()) {
            return Err(SparkError::InvalidPath(format!(
                "waypoint {i} has a non-finite coordinate"
            )));
        }
        Ok(Self { waypoints })
    }

    /// Axis-aligned rectangle traversed clockwise (screen coordinates) from
    /// its top-left corner.
    pub fn rectangle(origin: Vec2, width: f64, height: f64) -> Result<Self> {
        Self::new(vec![
            origin,
            Vec2::new(origin.x + width, origin.y),
            Vec2::new(origin.x + width, origin.y + height),
            Vec2::new(origin.x, origin.y + height),
        ])
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Waypoint at `index`, wrapping around the loop
    pub fn waypoint(&self, index: usize) -> Vec2 {
        self.waypoints[index % self.waypoints.len()]
    }

    /// The start of the loop, where particles are spawned
    pub fn start(&self) -> Vec2 {
        self.waypoints[0]
    }

    /// Index following `index` on the loop
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.waypoints.len()
    }

    /// Total length of the closed loop, including the closing segment
    pub fn perimeter(&self) -> f64 {
        (0..self.waypoints.len())
            .map(|i| self.waypoint(i).distance(self.waypoint(i + 1)))
            .sum()
    }
}
