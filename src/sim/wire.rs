//! Binary wire format for scene files.
//!
//! Every value is written big-endian, field by field, in a fixed order with
//! no tags and no version marker. Readers and writers must agree on the
//! exact shape; adding or removing a field is a breaking format change with
//! no migration path. The piston record in particular is always position,
//! velocity, mass, color, thickness.

use bytes::{Buf, BufMut};
use std::fmt;

use super::{Piston, Polygon, Population, Rgba, Scene, Vec2};

/// Decode failure for a scene byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// The stream ended mid-field. No partial value is returned; the
    /// remainder of the stream is unusable.
    Truncated { needed: usize, remaining: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, remaining } => write!(
                f,
                "truncated stream: next field needs {} byte(s), {} left",
                needed, remaining
            ),
        }
    }
}

impl std::error::Error for WireError {}

/// Types that write themselves to a byte stream.
pub trait Encode {
    fn encode<B: BufMut>(&self, buf: &mut B);
}

/// Types that read themselves back from a byte stream.
pub trait Decode: Sized {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError>;
}

fn need<B: Buf>(buf: &B, bytes: usize) -> Result<(), WireError> {
    if buf.remaining() < bytes {
        return Err(WireError::Truncated {
            needed: bytes,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

fn get_f64<B: Buf>(buf: &mut B) -> Result<f64, WireError> {
    need(buf, 8)?;
    Ok(buf.get_f64())
}

fn get_u32<B: Buf>(buf: &mut B) -> Result<u32, WireError> {
    need(buf, 4)?;
    Ok(buf.get_u32())
}

fn get_u8<B: Buf>(buf: &mut B) -> Result<u8, WireError> {
    need(buf, 1)?;
    Ok(buf.get_u8())
}

impl Encode for Vec2 {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_f64(self.x);
        buf.put_f64(self.y);
    }
}

impl Decode for Vec2 {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let x = get_f64(buf)?;
        let y = get_f64(buf)?;
        Ok(Vec2 { x, y })
    }
}

impl Encode for Rgba {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(self.r);
        buf.put_u8(self.g);
        buf.put_u8(self.b);
        buf.put_u8(self.a);
    }
}

impl Decode for Rgba {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let r = get_u8(buf)?;
        let g = get_u8(buf)?;
        let b = get_u8(buf)?;
        let a = get_u8(buf)?;
        Ok(Rgba { r, g, b, a })
    }
}

impl Encode for Piston {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        self.position.encode(buf);
        self.velocity.encode(buf);
        buf.put_f64(self.mass);
        self.color.encode(buf);
        buf.put_f64(self.thickness);
    }
}

impl Decode for Piston {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let position = Vec2::decode(buf)?;
        let velocity = Vec2::decode(buf)?;
        let mass = get_f64(buf)?;
        let color = Rgba::decode(buf)?;
        let thickness = get_f64(buf)?;
        Ok(Piston {
            position,
            velocity,
            mass,
            color,
            thickness,
        })
    }
}

impl Encode for Polygon {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.vertices().len() as u32);
        for vertex in self.vertices() {
            vertex.encode(buf);
        }
    }
}

impl Decode for Polygon {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let count = get_u32(buf)?;
        // No preallocation from the count: a corrupt length fails at the
        // first missing vertex instead of reserving garbage.
        let mut vertices = Vec::new();
        for _ in 0..count {
            vertices.push(Vec2::decode(buf)?);
        }
        Ok(Polygon::from_vertices(vertices))
    }
}

impl Encode for Population {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.count);
        buf.put_f64(self.radius);
        buf.put_f64(self.mass);
        buf.put_f64(self.speed);
        self.color.encode(buf);
        self.polygon.encode(buf);
    }
}

impl Decode for Population {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let count = get_u32(buf)?;
        let radius = get_f64(buf)?;
        let mass = get_f64(buf)?;
        let speed = get_f64(buf)?;
        let color = Rgba::decode(buf)?;
        let polygon = Polygon::decode(buf)?;
        Ok(Population {
            count,
            radius,
            mass,
            speed,
            color,
            polygon,
        })
    }
}

impl Encode for Scene {
    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.populations.len() as u32);
        for population in &self.populations {
            population.encode(buf);
        }
        self.piston.encode(buf);
    }
}

impl Decode for Scene {
    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        let count = get_u32(buf)?;
        let mut populations = Vec::new();
        for _ in 0..count {
            populations.push(Population::decode(buf)?);
        }
        let piston = Piston::decode(buf)?;
        Ok(Scene {
            populations,
            piston,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_piston() -> Piston {
        Piston {
            position: Vec2::new(1.25, -2.5),
            velocity: Vec2::new(0.5, 3.0),
            mass: 42.0,
            color: Rgba::new(10, 20, 30, 40),
            thickness: 0.75,
        }
    }

    #[test]
    fn test_piston_round_trip() {
        let piston = sample_piston();
        let mut buf = Vec::new();
        piston.encode(&mut buf);

        let decoded = Piston::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, piston);
    }

    #[test]
    fn test_piston_field_order_is_fixed() {
        // Pins the wire shape: position.x, position.y, velocity.x,
        // velocity.y, mass (all big-endian f64), then r, g, b, a bytes,
        // then thickness. 45 bytes total.
        let piston = sample_piston();
        let mut buf = Vec::new();
        piston.encode(&mut buf);

        let mut expected = Vec::new();
        expected.extend_from_slice(&1.25f64.to_be_bytes());
        expected.extend_from_slice(&(-2.5f64).to_be_bytes());
        expected.extend_from_slice(&0.5f64.to_be_bytes());
        expected.extend_from_slice(&3.0f64.to_be_bytes());
        expected.extend_from_slice(&42.0f64.to_be_bytes());
        expected.extend_from_slice(&[10, 20, 30, 40]);
        expected.extend_from_slice(&0.75f64.to_be_bytes());
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_piston_decode_rejects_every_truncation() {
        let piston = sample_piston();
        let mut buf = Vec::new();
        piston.encode(&mut buf);

        for cut in 0..buf.len() {
            let result = Piston::decode(&mut &buf[..cut]);
            assert!(
                matches!(result, Err(WireError::Truncated { .. })),
                "decode of {} of {} bytes should fail",
                cut,
                buf.len()
            );
        }
    }

    #[test]
    fn test_truncation_error_reports_shortfall() {
        let err = Piston::decode(&mut &[0u8; 3][..]).unwrap_err();
        assert_eq!(
            err,
            WireError::Truncated {
                needed: 8,
                remaining: 3
            }
        );
    }

    #[test]
    fn test_polygon_round_trip() {
        let poly = Polygon::from_vertices(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 3.0),
        ]);
        let mut buf = Vec::new();
        poly.encode(&mut buf);
        assert_eq!(buf.len(), 4 + 3 * 16);

        let decoded = Polygon::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, poly);
    }

    #[test]
    fn test_empty_polygon_is_four_bytes() {
        let mut buf = Vec::new();
        Polygon::new().encode(&mut buf);
        assert_eq!(buf, vec![0, 0, 0, 0]);
        assert_eq!(Polygon::decode(&mut buf.as_slice()).unwrap(), Polygon::new());
    }

    #[test]
    fn test_polygon_corrupt_count_fails_instead_of_allocating() {
        // Claims u32::MAX vertices but carries none.
        let buf = u32::MAX.to_be_bytes();
        let result = Polygon::decode(&mut &buf[..]);
        assert!(matches!(result, Err(WireError::Truncated { .. })));
    }

    #[test]
    fn test_scene_round_trip() {
        let scene = Scene::sample();
        let mut buf = Vec::new();
        scene.encode(&mut buf);

        let decoded = Scene::decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, scene);
    }

    #[test]
    fn test_scene_decode_never_returns_partial() {
        let scene = Scene::sample();
        let mut buf = Vec::new();
        scene.encode(&mut buf);

        // Drop the trailing piston record entirely.
        let cut = buf.len() - 45;
        let result = Scene::decode(&mut &buf[..cut]);
        assert!(matches!(result, Err(WireError::Truncated { .. })));
    }
}
