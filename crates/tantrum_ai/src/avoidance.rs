//! Obstacle-avoidance heuristic for the fled child
//!
//! Invoked only when the child wanders autonomously and its current step just
//! completed. Probes the horizontal plane and greedily flees the target.

use glam::{Quat, Vec3};
use log::trace;

use crate::child::ChildConfig;
use crate::movement::{Step, StepKind, StepQueue};
use crate::world::{GeometryQuery, Pose};

/// Build an in-place yaw turn from the current orientation
pub(crate) fn turn_step(duration: f32, orientation: Quat, angle: f32) -> Step {
    Step::raw(
        duration,
        StepKind::Rotate {
            from: orientation,
            to: Quat::from_rotation_y(angle) * orientation,
        },
    )
}

/// Build a one-unit translation from the current position
pub(crate) fn move_step(duration: f32, position: Vec3, offset: Vec3) -> Step {
    Step::raw(
        duration,
        StepKind::Move {
            from: position,
            to: position + offset,
        },
    )
}

/// Decide the next autonomous steps and enqueue them.
///
/// Probes left, right and forward at waist height. After a completed Move an
/// open forward keeps the flight straight; otherwise the walkable direction
/// farthest from the target wins, with ties broken in the order left, right,
/// forward. Fully boxed in, the child reverses.
pub fn plan_flee_steps(
    config: &ChildConfig,
    pose: &Pose,
    target: Vec3,
    previous: &Step,
    geometry: &impl GeometryQuery,
    queue: &mut StepQueue,
) {
    let waist = pose.position + Vec3::Y * config.probe_height;
    let left = pose.left();
    let right = pose.right();
    let forward = pose.forward();

    let can_left = !geometry.blocked(waist, left, config.probe_distance);
    let can_right = !geometry.blocked(waist, right, config.probe_distance);
    let can_forward = !geometry.blocked(waist, forward, config.probe_distance);
    trace!(
        "flee probes: left={} right={} forward={}",
        can_left,
        can_right,
        can_forward
    );

    // A finished translation with open ground ahead keeps the flight straight.
    if previous.is_move() && can_forward {
        queue.push(move_step(config.move_time, pose.position, forward));
        return;
    }

    let mut options: Vec<(Vec3, f32)> = Vec::new();
    if can_left {
        options.push((left, -std::f32::consts::FRAC_PI_2));
    }
    if can_right {
        options.push((right, std::f32::consts::FRAC_PI_2));
    }
    if can_forward {
        options.push((forward, 0.0));
    }

    // Boxed in: turn around.
    if options.is_empty() {
        queue.push(turn_step(
            config.turn_time,
            pose.orientation,
            std::f32::consts::PI,
        ));
        return;
    }

    // Prefer the spot that ends up farthest from the target. Strict
    // comparison keeps ties on encounter order.
    let mut best = options[0];
    let mut best_score = (target - pose.position - best.0).length_squared();
    for &option in &options[1..] {
        let score = (target - pose.position - option.0).length_squared();
        if score > best_score {
            best = option;
            best_score = score;
        }
    }

    let (direction, angle) = best;
    if angle != 0.0 {
        queue.push(turn_step(config.turn_time, pose.orientation, angle));
    }
    queue.push(move_step(config.move_time, pose.position, direction));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Probe stub for an identity-oriented child: +Z forward, ±X sideways
    struct Probes {
        left: bool,
        right: bool,
        forward: bool,
    }

    impl GeometryQuery for Probes {
        fn blocked(&self, _origin: Vec3, direction: Vec3, _max_distance: f32) -> bool {
            if direction.z > 0.9 {
                !self.forward
            } else if direction.x > 0.9 {
                !self.right
            } else {
                !self.left
            }
        }
    }

    fn previous_move() -> Step {
        Step::travel(0.4, Vec3::ZERO, Vec3::Z).unwrap()
    }

    fn previous_turn() -> Step {
        Step::turn(0.15, Quat::IDENTITY, Quat::from_rotation_y(1.0)).unwrap()
    }

    fn config() -> ChildConfig {
        ChildConfig::default()
    }

    #[test]
    fn test_continues_forward_after_a_move() {
        let mut queue = StepQueue::new();
        let world = Probes {
            left: true,
            right: true,
            forward: true,
        };
        plan_flee_steps(
            &config(),
            &Pose::IDENTITY,
            Vec3::new(0.0, 0.0, -5.0),
            &previous_move(),
            &world,
            &mut queue,
        );

        assert_eq!(queue.len(), 1);
        let out = queue.advance(0.4, None);
        assert_eq!(out.position, Some(Vec3::Z));
    }

    #[test]
    fn test_reverses_when_boxed_in() {
        let mut queue = StepQueue::new();
        let world = Probes {
            left: false,
            right: false,
            forward: false,
        };
        plan_flee_steps(
            &config(),
            &Pose::IDENTITY,
            Vec3::ZERO,
            &previous_move(),
            &world,
            &mut queue,
        );

        assert_eq!(queue.len(), 1);
        let out = queue.advance(1.0, None);
        let turned = out.orientation.unwrap();
        // Facing has flipped from +Z to -Z.
        assert!((turned * Vec3::Z + Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn test_picks_direction_farthest_from_target() {
        let mut queue = StepQueue::new();
        let world = Probes {
            left: true,
            right: true,
            forward: false,
        };
        // Target off to the right: fleeing should pick left.
        plan_flee_steps(
            &config(),
            &Pose::IDENTITY,
            Vec3::new(5.0, 0.0, 0.0),
            &previous_move(),
            &world,
            &mut queue,
        );

        assert_eq!(queue.len(), 2);
        // First a -90 degree turn, then a move to the left.
        let turn = queue.advance(1.0, None).orientation.unwrap();
        assert!((turn * Vec3::Z - Vec3::NEG_X).length() < 1e-4);
        let out = queue.advance(1.0, None);
        assert_eq!(out.position, Some(Vec3::NEG_X));
    }

    #[test]
    fn test_ties_break_on_encounter_order() {
        let mut queue = StepQueue::new();
        let world = Probes {
            left: true,
            right: true,
            forward: false,
        };
        // Target dead behind: left and right score identically, left wins.
        plan_flee_steps(
            &config(),
            &Pose::IDENTITY,
            Vec3::new(0.0, 0.0, -5.0),
            &previous_turn(),
            &world,
            &mut queue,
        );

        assert_eq!(queue.len(), 2);
        queue.advance(1.0, None);
        let out = queue.advance(1.0, None);
        assert_eq!(out.position, Some(Vec3::NEG_X));
    }

    #[test]
    fn test_scoring_applies_after_a_turn_even_with_open_forward() {
        let mut queue = StepQueue::new();
        let world = Probes {
            left: false,
            right: false,
            forward: true,
        };
        plan_flee_steps(
            &config(),
            &Pose::IDENTITY,
            Vec3::new(0.0, 0.0, -5.0),
            &previous_turn(),
            &world,
            &mut queue,
        );

        // Only forward is walkable, so no extra turn is queued.
        assert_eq!(queue.len(), 1);
        let out = queue.advance(1.0, None);
        assert_eq!(out.position, Some(Vec3::Z));
    }
}
