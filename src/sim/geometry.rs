//! Plane geometry primitives: 2D vectors and polygon shapes.

use std::fmt;

/// A 2D vector with `f64` components.
///
/// Used for the piston's position and velocity and for polygon vertices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A polygon shape: an ordered list of vertices.
///
/// This is the per-population detail object. The editor only manages the
/// vertex list; closing the ring and rasterizing are the simulator's concern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vertices(vertices: Vec<Vec2>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Append a vertex at the end of the ring.
    pub fn add_vertex(&mut self, vertex: Vec2) {
        self.vertices.push(vertex);
    }

    /// Remove the vertex at `index`. Out-of-range indices are ignored.
    pub fn remove_vertex(&mut self, index: usize) -> Option<Vec2> {
        if index < self.vertices.len() {
            Some(self.vertices.remove(index))
        } else {
            None
        }
    }

    /// Replace the vertex at `index`. Out-of-range indices are ignored.
    pub fn set_vertex(&mut self, index: usize, vertex: Vec2) {
        if let Some(slot) = self.vertices.get_mut(index) {
            *slot = vertex;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_vertex_edits() {
        let mut poly = Polygon::new();
        assert!(poly.is_empty());

        poly.add_vertex(Vec2::new(0.0, 0.0));
        poly.add_vertex(Vec2::new(1.0, 0.0));
        poly.add_vertex(Vec2::new(0.0, 1.0));
        assert_eq!(poly.len(), 3);

        assert_eq!(poly.remove_vertex(1), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.remove_vertex(5), None);
        assert_eq!(poly.len(), 2);

        poly.set_vertex(0, Vec2::new(2.0, 2.0));
        assert_eq!(poly.vertices()[0], Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_vec2_display() {
        assert_eq!(Vec2::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
