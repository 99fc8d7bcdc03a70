//! Simulation domain model: scenes, their parts, and the wire format.

mod color;
mod geometry;
mod piston;
mod population;
mod scene;
pub mod wire;

pub use color::Rgba;
pub use geometry::{Polygon, Vec2};
pub use piston::Piston;
pub use population::Population;
pub use scene::Scene;
