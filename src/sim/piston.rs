//! The piston record: a rigid moving boundary in the simulation.

use super::{Rgba, Vec2};

/// Configuration of the simulation's piston.
///
/// Serialized field order is fixed (position, velocity, mass, color,
/// thickness) and owned by [`crate::sim::wire`].
#[derive(Debug, Clone, PartialEq)]
pub struct Piston {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub color: Rgba,
    pub thickness: f64,
}

impl Default for Piston {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mass: 1.0,
            color: Rgba::BLACK,
            thickness: 1.0,
        }
    }
}
