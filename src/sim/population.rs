//! Particle populations: one group of identical particles per table row.

use super::{Polygon, Rgba};

/// One configured group of identical particles plus the polygon its
/// members spawn within.
///
/// The scalar fields are the five table columns, in column order. The
/// polygon lives in the same struct so the table and the polygon panel
/// can never disagree about how many entries exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    pub count: u32,
    pub radius: f64,
    pub mass: f64,
    pub speed: f64,
    pub color: Rgba,
    pub polygon: Polygon,
}

impl Population {
    /// The values a freshly added row starts from.
    pub fn stock() -> Self {
        Self {
            count: 10,
            radius: 1.0,
            mass: 1.0,
            speed: 1.0,
            color: Rgba::BLACK,
            polygon: Polygon::new(),
        }
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::stock()
    }
}
