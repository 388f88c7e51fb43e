//! Movement step queue
//!
//! Discrete movement and rotation steps, advanced by elapsed time and eased
//! with smoothstep. The queue is a pure function of elapsed time; nothing in
//! here touches an engine timeline.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Step construction errors
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StepError {
    /// A non-positive duration has no valid easing fraction
    #[error("step duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
}

/// Payload of a step, selected by kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepKind {
    /// Translate between two points
    Move {
        /// Start position
        from: Vec3,
        /// Destination
        to: Vec3,
    },
    /// Rotate between two orientations (yaw turns in practice)
    Rotate {
        /// Start orientation
        from: Quat,
        /// Destination orientation
        to: Quat,
    },
}

/// One pending or active movement step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    kind: StepKind,
    duration: f32,
}

impl Step {
    /// Create a translation step
    pub fn travel(duration: f32, from: Vec3, to: Vec3) -> Result<Self, StepError> {
        Self::checked(duration, StepKind::Move { from, to })
    }

    /// Create a rotation step
    pub fn turn(duration: f32, from: Quat, to: Quat) -> Result<Self, StepError> {
        Self::checked(duration, StepKind::Rotate { from, to })
    }

    fn checked(duration: f32, kind: StepKind) -> Result<Self, StepError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(StepError::InvalidDuration(duration));
        }
        Ok(Self { kind, duration })
    }

    /// Crate-internal constructor for durations already validated by config
    pub(crate) fn raw(duration: f32, kind: StepKind) -> Self {
        debug_assert!(duration.is_finite() && duration > 0.0);
        Self { kind, duration }
    }

    /// Step payload
    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    /// Step duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether this is a translation step
    pub fn is_move(&self) -> bool {
        matches!(self.kind, StepKind::Move { .. })
    }
}

/// Cubic Hermite easing: `3t^2 - 2t^3` on the clamped fraction
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Result of advancing the queue by one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Advanced {
    /// Rendered position, if the active step translates
    pub position: Option<Vec3>,
    /// Rendered orientation, if the active step rotates
    pub orientation: Option<Quat>,
    /// The step that finished this tick, if any
    pub completed: Option<Step>,
}

impl Advanced {
    /// Whether the queue had nothing to do
    pub fn is_idle(&self) -> bool {
        self.position.is_none() && self.orientation.is_none() && self.completed.is_none()
    }
}

/// FIFO of pending steps plus elapsed time on the head
#[derive(Debug, Default)]
pub struct StepQueue {
    steps: VecDeque<Step>,
    elapsed: f32,
}

impl StepQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the tail
    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    /// Number of pending steps (including the active one)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step is pending
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Advance the active step by `dt` seconds.
    ///
    /// A step completes once `elapsed` reaches its duration, even when `dt`
    /// overshoots by an arbitrary amount; the finished step still renders at
    /// its endpoint this tick and `elapsed` resets for the next head.
    ///
    /// While `follow` is set, the destination of an active Move is replaced
    /// live by the followed target so a resumed follow can interrupt an
    /// in-flight autonomous step smoothly.
    pub fn advance(&mut self, dt: f32, follow: Option<Vec3>) -> Advanced {
        let Some(step) = self.steps.front().copied() else {
            return Advanced::default();
        };

        self.elapsed += dt;
        let mut completed = None;
        let t = if self.elapsed >= step.duration() {
            self.elapsed = 0.0;
            self.steps.pop_front();
            completed = Some(step);
            1.0
        } else {
            self.elapsed / step.duration()
        };
        let eased = smoothstep(t);

        match *step.kind() {
            StepKind::Move { from, to } => {
                let to = follow.unwrap_or(to);
                Advanced {
                    position: Some(from.lerp(to, eased)),
                    orientation: None,
                    completed,
                }
            }
            StepKind::Rotate { from, to } => Advanced {
                position: None,
                orientation: Some(from.slerp(to, eased)),
                completed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_bad_durations() {
        assert!(Step::travel(0.0, Vec3::ZERO, Vec3::X).is_err());
        assert!(Step::travel(-1.0, Vec3::ZERO, Vec3::X).is_err());
        assert!(Step::turn(f32::NAN, Quat::IDENTITY, Quat::IDENTITY).is_err());
        assert!(Step::travel(0.4, Vec3::ZERO, Vec3::X).is_ok());
    }

    #[test]
    fn test_empty_queue_is_idle() {
        let mut queue = StepQueue::new();
        assert!(queue.advance(0.1, None).is_idle());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_exact_duration_completes_and_lands_on_endpoint() {
        let mut queue = StepQueue::new();
        queue.push(Step::travel(0.4, Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)).unwrap());

        let out = queue.advance(0.4, None);
        assert_eq!(out.position, Some(Vec3::new(2.0, 0.0, 0.0)));
        assert!(out.completed.is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_overshoot_completes_exactly_once() {
        let mut queue = StepQueue::new();
        queue.push(Step::travel(0.4, Vec3::ZERO, Vec3::X).unwrap());

        let out = queue.advance(100.0, None);
        assert_eq!(out.position, Some(Vec3::X));
        assert!(out.completed.is_some());

        // Nothing left to complete.
        assert!(queue.advance(100.0, None).is_idle());
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut queue = StepQueue::new();
        queue.push(Step::travel(0.4, Vec3::ZERO, Vec3::X).unwrap());

        let out = queue.advance(0.0, None);
        assert_eq!(out.position, Some(Vec3::ZERO));
        assert!(out.completed.is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_midway_position_is_eased() {
        let mut queue = StepQueue::new();
        queue.push(Step::travel(1.0, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)).unwrap());

        let out = queue.advance(0.5, None);
        // smoothstep(0.5) == 0.5, so the midpoint is exact here
        assert_relative_eq!(out.position.unwrap().x, 5.0, epsilon = 1e-5);

        let out = queue.advance(0.25, None);
        // smoothstep(0.75) = 0.84375
        assert_relative_eq!(out.position.unwrap().x, 8.4375, epsilon = 1e-4);
    }

    #[test]
    fn test_follow_overrides_move_destination() {
        let mut queue = StepQueue::new();
        queue.push(Step::travel(1.0, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)).unwrap());

        let out = queue.advance(0.5, Some(Vec3::new(0.0, 0.0, 8.0)));
        assert_relative_eq!(out.position.unwrap().z, 4.0, epsilon = 1e-5);
        assert_relative_eq!(out.position.unwrap().x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_slerps_to_endpoint() {
        let from = Quat::IDENTITY;
        let to = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let mut queue = StepQueue::new();
        queue.push(Step::turn(0.15, from, to).unwrap());

        let out = queue.advance(0.15, None);
        let rendered = out.orientation.unwrap();
        assert!(rendered.angle_between(to) < 1e-4);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_steps_complete_in_fifo_order() {
        let mut queue = StepQueue::new();
        queue.push(Step::travel(0.4, Vec3::ZERO, Vec3::X).unwrap());
        queue.push(Step::travel(0.4, Vec3::X, Vec3::new(2.0, 0.0, 0.0)).unwrap());

        let out = queue.advance(0.4, None);
        match out.completed.unwrap().kind() {
            StepKind::Move { to, .. } => assert_eq!(*to, Vec3::X),
            other => panic!("unexpected step: {other:?}"),
        }
        assert_eq!(queue.len(), 1);

        // Elapsed was reset for the new head.
        let out = queue.advance(0.2, None);
        assert!(out.completed.is_none());
        let out = queue.advance(0.2, None);
        assert!(out.completed.is_some());
        assert!(queue.is_empty());
    }
}
