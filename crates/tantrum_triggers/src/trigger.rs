//! Proximity trigger with edge detection

use glam::Vec3;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::volume::TriggerVolume;

/// Boundary crossing observed by a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// The other entity entered the volume this tick
    Entered,
    /// The other entity left the volume this tick
    Exited,
}

/// A trigger volume carried at its owner's position.
///
/// Containment is tracked every tick, but events only fire on edges: one
/// `Entered` per crossing, never one per tick inside. While disabled the
/// trigger keeps tracking silently, so re-enabling it does not fire for an
/// entity that never left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityTrigger {
    /// Volume shape
    pub volume: TriggerVolume,
    /// Whether events are delivered
    pub enabled: bool,
    inside: bool,
}

impl ProximityTrigger {
    /// Create an enabled trigger
    pub fn new(volume: TriggerVolume) -> Self {
        Self {
            volume,
            enabled: true,
            inside: false,
        }
    }

    /// Whether the tracked entity was inside at the last update
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Test the other entity against the volume at `center`
    pub fn update(&mut self, center: Vec3, other: Vec3) -> Option<TriggerEvent> {
        let now_inside = self.volume.contains(center, other);
        let was_inside = self.inside;
        self.inside = now_inside;

        if !self.enabled || now_inside == was_inside {
            return None;
        }

        let event = if now_inside {
            TriggerEvent::Entered
        } else {
            TriggerEvent::Exited
        };
        trace!("proximity trigger {event:?} at {center:?}");
        Some(event)
    }
}
