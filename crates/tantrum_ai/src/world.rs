//! Collaborator traits and shared pose type
//!
//! The state machine never talks to an engine directly. Everything it needs
//! from the outside world comes through these seams, so the whole behaviour
//! runs against synthetic stand-ins in tests.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position
    pub position: Vec3,
    /// World orientation
    pub orientation: Quat,
}

impl Pose {
    /// Pose at the origin facing +Z
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Create a new pose
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create a pose at a position with no rotation
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Forward direction (+Z rotated by orientation)
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Left direction (-X rotated by orientation)
    pub fn left(&self) -> Vec3 {
        self.orientation * Vec3::NEG_X
    }

    /// Right direction (+X rotated by orientation)
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Occlusion query against scene geometry
///
/// Used only for the three horizontal probes of the avoidance heuristic.
pub trait GeometryQuery {
    /// Whether anything blocks the ray within `max_distance`
    fn blocked(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool;
}

/// Mood and stinger sink (the audio collaborator)
///
/// Mood setters retarget the looping music blend; the remaining methods
/// request one-shot stingers. `child_wandering` must be a no-op while a
/// child line is still playing.
pub trait MoodSink {
    /// Crossfade the music toward the happy layer
    fn set_happy(&mut self);
    /// Crossfade the music toward the sad layer
    fn set_sad(&mut self);
    /// Crossfade the music toward the lost layer
    fn set_lost(&mut self);
    /// Candy pickup stinger (child voice)
    fn collect_candy(&mut self);
    /// Crying stinger (child voice)
    fn child_sad(&mut self);
    /// Run-away stinger (child voice)
    fn child_leave(&mut self);
    /// Wandering stinger (child voice, skipped while a line is playing)
    fn child_wandering(&mut self);
    /// Reunion stinger (mother voice)
    fn join(&mut self);
    /// Spatial collect sound positioned at the pickup
    fn collect_at(&mut self, position: Vec3);
}

/// Fire-and-forget visual effect sink
pub trait EffectSink {
    /// Particle burst at a world position
    fn burst(&mut self, position: Vec3);
}
