//! Spark Core - Foundational types for the Spark circuit simulation
//!
//! This crate provides the core types that all other Spark crates depend on:
//! - `Vec2` - 2D coordinates on the drawing surface
//! - `ParticleId` - Monotonic particle identifiers
//! - `PathGeometry` - The closed loop of waypoints particles travel along
//! - Error types and Result alias

mod error;
mod id;
mod path;
mod types;

pub use error::{Result, SparkError};
pub use id::ParticleId;
pub use path::PathGeometry;
pub use types::Vec2;
