//! Trigger volume shapes

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Trigger volume shapes, positioned by their carrying entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerVolume {
    /// Axis-aligned box
    Box {
        /// Half-extents (width/2, height/2, depth/2)
        half_extents: Vec3,
    },
    /// Sphere
    Sphere {
        /// Radius
        radius: f32,
    },
}

impl TriggerVolume {
    /// Create a box trigger volume
    pub fn box_shape(width: f32, height: f32, depth: f32) -> Self {
        Self::Box {
            half_extents: Vec3::new(width / 2.0, height / 2.0, depth / 2.0),
        }
    }

    /// Create a cube trigger volume
    pub fn cube(size: f32) -> Self {
        Self::box_shape(size, size, size)
    }

    /// Create a sphere trigger volume
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Whether a world point lies inside the volume centered at `center`
    pub fn contains(&self, center: Vec3, point: Vec3) -> bool {
        let local = point - center;
        match *self {
            Self::Box { half_extents } => {
                local.x.abs() <= half_extents.x
                    && local.y.abs() <= half_extents.y
                    && local.z.abs() <= half_extents.z
            }
            Self::Sphere { radius } => local.length_squared() <= radius * radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_containment() {
        let volume = TriggerVolume::sphere(2.0);
        let center = Vec3::new(10.0, 0.0, 0.0);
        assert!(volume.contains(center, Vec3::new(11.0, 0.0, 0.0)));
        assert!(volume.contains(center, Vec3::new(10.0, 2.0, 0.0)));
        assert!(!volume.contains(center, Vec3::new(13.0, 0.0, 0.0)));
    }

    #[test]
    fn test_box_containment() {
        let volume = TriggerVolume::box_shape(2.0, 4.0, 2.0);
        assert!(volume.contains(Vec3::ZERO, Vec3::new(0.9, 1.9, -0.9)));
        assert!(!volume.contains(Vec3::ZERO, Vec3::new(1.1, 0.0, 0.0)));
        assert!(!volume.contains(Vec3::ZERO, Vec3::new(0.0, 2.1, 0.0)));
    }
}
