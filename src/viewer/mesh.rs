use glam::Vec3;

use super::Rgba;

/// A cylinder between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    /// First endpoint.
    pub start: Vec3,
    /// Second endpoint.
    pub end: Vec3,
    /// Cylinder radius in Angstroms.
    pub radius: f32,
    /// Whether the ends are closed.
    pub cap: bool,
    /// Tube colour.
    pub color: Rgba,
}

impl Tube {
    /// Distance between the endpoints.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Sphere center.
    pub center: Vec3,
    /// Radius in Angstroms.
    pub radius: f32,
    /// Sphere colour.
    pub color: Rgba,
}

/// Primitives collected under one mesh layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomMesh {
    /// Tubes in insertion order.
    pub tubes: Vec<Tube>,
    /// Spheres in insertion order.
    pub spheres: Vec<Sphere>,
}

impl CustomMesh {
    /// Number of primitives of any kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tubes.len() + self.spheres.len()
    }

    /// Whether the mesh holds no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty() && self.spheres.is_empty()
    }

    /// Summed length of all tubes.
    #[must_use]
    pub fn tube_length(&self) -> f32 {
        self.tubes.iter().map(Tube::length).sum()
    }
}
