//! Obstacle geometry for the avoidance probes
//!
//! A flat list of axis-aligned boxes with a slab-method ray test. This is
//! the stand-in for the host engine's physics raycast; the AI only ever asks
//! hit-or-miss along short horizontal rays.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use tantrum_ai::world::GeometryQuery;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create from corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create from a center point and full extents
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Ray-AABB intersection using the slab method.
///
/// `direction` must be normalized. Returns the distance along the ray to the
/// first intersection in front of the origin, or `None` on a miss.
pub fn ray_aabb(origin: Vec3, direction: Vec3, aabb: &Aabb) -> Option<f32> {
    let inv = Vec3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z);

    let t1 = (aabb.min.x - origin.x) * inv.x;
    let t2 = (aabb.max.x - origin.x) * inv.x;
    let t3 = (aabb.min.y - origin.y) * inv.y;
    let t4 = (aabb.max.y - origin.y) * inv.y;
    let t5 = (aabb.min.z - origin.z) * inv.z;
    let t6 = (aabb.max.z - origin.z) * inv.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    // tmax < 0: box entirely behind the origin. tmin > tmax: no overlap.
    if tmax < 0.0 || tmin > tmax {
        None
    } else {
        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// The environment the fled child probes against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    boxes: Vec<Aabb>,
}

impl ObstacleField {
    /// Create an empty (fully open) field
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one obstacle
    pub fn push(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    /// Number of obstacles
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether the field is open
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl FromIterator<Aabb> for ObstacleField {
    fn from_iter<I: IntoIterator<Item = Aabb>>(iter: I) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl GeometryQuery for ObstacleField {
    fn blocked(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return false;
        }
        self.boxes
            .iter()
            .filter_map(|aabb| ray_aabb(origin, direction, aabb))
            .any(|t| t <= max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_hits_box_ahead() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.0, 3.0), Vec3::splat(2.0));
        let t = ray_aabb(Vec3::ZERO, Vec3::Z, &aabb).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let aabb = Aabb::from_center_size(Vec3::new(0.0, 0.0, -3.0), Vec3::splat(2.0));
        assert!(ray_aabb(Vec3::ZERO, Vec3::Z, &aabb).is_none());
    }

    #[test]
    fn test_ray_misses_sideways() {
        let aabb = Aabb::from_center_size(Vec3::new(5.0, 0.0, 3.0), Vec3::splat(2.0));
        assert!(ray_aabb(Vec3::ZERO, Vec3::Z, &aabb).is_none());
    }

    #[test]
    fn test_blocked_respects_probe_distance() {
        let field: ObstacleField = [Aabb::from_center_size(
            Vec3::new(0.0, 0.5, 3.0),
            Vec3::splat(2.0),
        )]
        .into_iter()
        .collect();

        let waist = Vec3::new(0.0, 0.5, 0.0);
        // Box face at z = 2: beyond a 1.4 probe, within a 2.5 one.
        assert!(!field.blocked(waist, Vec3::Z, 1.4));
        assert!(field.blocked(waist, Vec3::Z, 2.5));
        // Probing the other way is open.
        assert!(!field.blocked(waist, Vec3::NEG_Z, 10.0));
    }

    #[test]
    fn test_open_field_never_blocks() {
        let field = ObstacleField::new();
        assert!(!field.blocked(Vec3::ZERO, Vec3::X, 100.0));
        assert!(!field.blocked(Vec3::ZERO, Vec3::ZERO, 1.0));
    }
}
