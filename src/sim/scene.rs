//! A complete scene file: particle populations plus the piston.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::wire::{Decode, Encode};
use super::{Piston, Polygon, Population, Rgba, Vec2};

/// Everything a scene file holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub populations: Vec<Population>,
    pub piston: Piston,
}

impl Scene {
    /// A small demonstration scene, used by `--sample` and as a test fixture.
    pub fn sample() -> Self {
        let chamber = Polygon::from_vertices(vec![
            Vec2::new(-5.0, -5.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(-5.0, 5.0),
        ]);
        let wedge = Polygon::from_vertices(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(2.0, 3.0),
        ]);

        Scene {
            populations: vec![
                Population {
                    count: 120,
                    radius: 0.5,
                    mass: 1.0,
                    speed: 2.0,
                    color: Rgba::RED,
                    polygon: chamber,
                },
                Population {
                    count: 40,
                    radius: 1.5,
                    mass: 4.0,
                    speed: 0.8,
                    color: Rgba::BLUE,
                    polygon: wedge,
                },
            ],
            piston: Piston {
                position: Vec2::new(0.0, 6.0),
                velocity: Vec2::new(0.0, -0.25),
                mass: 50.0,
                color: Rgba::GRAY,
                thickness: 0.4,
            },
        }
    }

    /// Read and decode a scene file.
    pub fn load(path: &Path) -> Result<Scene> {
        let data = fs::read(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let scene = Scene::decode(&mut data.as_slice())
            .with_context(|| format!("failed to decode scene file {}", path.display()))?;
        Ok(scene)
    }

    /// Encode and write the scene, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let mut buf = Vec::new();
        self.encode(&mut buf);
        fs::write(path, &buf)
            .with_context(|| format!("failed to write scene file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenes").join("demo.scene");

        let scene = Scene::sample();
        scene.save(&path).unwrap();

        let loaded = Scene::load(&path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Scene::load(&dir.path().join("nope.scene")).is_err());
    }

    #[test]
    fn test_load_truncated_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cut.scene");

        let mut buf = Vec::new();
        Scene::sample().encode(&mut buf);
        buf.truncate(buf.len() / 2);
        fs::write(&path, &buf).unwrap();

        assert!(Scene::load(&path).is_err());
    }
}
